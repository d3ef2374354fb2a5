//! 命令帮助表
//!
//! 静态只读表：命令名（大写）→ 参数说明、分组。
//! 同时用于 `help <command>` 查询和 Tab 补全。

/// 一条命令的帮助信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandHelp {
    /// 命令名（大写）
    pub name: &'static str,
    /// 参数说明
    pub params: &'static str,
    /// 分组
    pub group: &'static str,
}

const fn entry(name: &'static str, params: &'static str, group: &'static str) -> CommandHelp {
    CommandHelp {
        name,
        params,
        group,
    }
}

/// 命令帮助表
pub const COMMANDS: &[CommandHelp] = &[
    // generic
    entry("DEL", "key [key ...]", "generic"),
    entry("DUMP", "key", "generic"),
    entry("EXISTS", "key [key ...]", "generic"),
    entry("EXPIRE", "key seconds", "generic"),
    entry("EXPIREAT", "key timestamp", "generic"),
    entry("KEYS", "pattern", "generic"),
    entry("MOVE", "key db", "generic"),
    entry("PERSIST", "key", "generic"),
    entry("PEXPIRE", "key milliseconds", "generic"),
    entry("PTTL", "key", "generic"),
    entry("RANDOMKEY", "-", "generic"),
    entry("RENAME", "key newkey", "generic"),
    entry("RENAMENX", "key newkey", "generic"),
    entry("SCAN", "cursor [MATCH pattern] [COUNT count]", "generic"),
    entry("SORT", "key [BY pattern] [LIMIT offset count] [GET pattern [GET pattern ...]] [ASC|DESC] [ALPHA] [STORE destination]", "generic"),
    entry("TTL", "key", "generic"),
    entry("TYPE", "key", "generic"),
    entry("UNLINK", "key [key ...]", "generic"),
    // string
    entry("APPEND", "key value", "string"),
    entry("BITCOUNT", "key [start end]", "string"),
    entry("DECR", "key", "string"),
    entry("DECRBY", "key decrement", "string"),
    entry("GET", "key", "string"),
    entry("GETRANGE", "key start end", "string"),
    entry("GETSET", "key value", "string"),
    entry("INCR", "key", "string"),
    entry("INCRBY", "key increment", "string"),
    entry("INCRBYFLOAT", "key increment", "string"),
    entry("MGET", "key [key ...]", "string"),
    entry("MSET", "key value [key value ...]", "string"),
    entry("MSETNX", "key value [key value ...]", "string"),
    entry("PSETEX", "key milliseconds value", "string"),
    entry("SET", "key value [EX seconds] [PX milliseconds] [NX|XX]", "string"),
    entry("SETEX", "key seconds value", "string"),
    entry("SETNX", "key value", "string"),
    entry("SETRANGE", "key offset value", "string"),
    entry("STRLEN", "key", "string"),
    // list
    entry("BLPOP", "key [key ...] timeout", "list"),
    entry("BRPOP", "key [key ...] timeout", "list"),
    entry("LINDEX", "key index", "list"),
    entry("LINSERT", "key BEFORE|AFTER pivot value", "list"),
    entry("LLEN", "key", "list"),
    entry("LPOP", "key", "list"),
    entry("LPUSH", "key value [value ...]", "list"),
    entry("LRANGE", "key start stop", "list"),
    entry("LREM", "key count value", "list"),
    entry("LSET", "key index value", "list"),
    entry("LTRIM", "key start stop", "list"),
    entry("RPOP", "key", "list"),
    entry("RPOPLPUSH", "source destination", "list"),
    entry("RPUSH", "key value [value ...]", "list"),
    // set
    entry("SADD", "key member [member ...]", "set"),
    entry("SCARD", "key", "set"),
    entry("SDIFF", "key [key ...]", "set"),
    entry("SINTER", "key [key ...]", "set"),
    entry("SISMEMBER", "key member", "set"),
    entry("SMEMBERS", "key", "set"),
    entry("SMOVE", "source destination member", "set"),
    entry("SPOP", "key [count]", "set"),
    entry("SRANDMEMBER", "key [count]", "set"),
    entry("SREM", "key member [member ...]", "set"),
    entry("SSCAN", "key cursor [MATCH pattern] [COUNT count]", "set"),
    entry("SUNION", "key [key ...]", "set"),
    // sorted_set
    entry("ZADD", "key [NX|XX] [CH] [INCR] score member [score member ...]", "sorted_set"),
    entry("ZCARD", "key", "sorted_set"),
    entry("ZCOUNT", "key min max", "sorted_set"),
    entry("ZINCRBY", "key increment member", "sorted_set"),
    entry("ZRANGE", "key start stop [WITHSCORES]", "sorted_set"),
    entry("ZRANGEBYSCORE", "key min max [WITHSCORES] [LIMIT offset count]", "sorted_set"),
    entry("ZRANK", "key member", "sorted_set"),
    entry("ZREM", "key member [member ...]", "sorted_set"),
    entry("ZREVRANGE", "key start stop [WITHSCORES]", "sorted_set"),
    entry("ZREVRANK", "key member", "sorted_set"),
    entry("ZSCAN", "key cursor [MATCH pattern] [COUNT count]", "sorted_set"),
    entry("ZSCORE", "key member", "sorted_set"),
    // hash
    entry("HDEL", "key field [field ...]", "hash"),
    entry("HEXISTS", "key field", "hash"),
    entry("HGET", "key field", "hash"),
    entry("HGETALL", "key", "hash"),
    entry("HINCRBY", "key field increment", "hash"),
    entry("HKEYS", "key", "hash"),
    entry("HLEN", "key", "hash"),
    entry("HMGET", "key field [field ...]", "hash"),
    entry("HMSET", "key field value [field value ...]", "hash"),
    entry("HSCAN", "key cursor [MATCH pattern] [COUNT count]", "hash"),
    entry("HSET", "key field value", "hash"),
    entry("HSETNX", "key field value", "hash"),
    entry("HVALS", "key", "hash"),
    // pubsub
    entry("PUBLISH", "channel message", "pubsub"),
    entry("PUBSUB", "subcommand [argument [argument ...]]", "pubsub"),
    // transactions
    entry("DISCARD", "-", "transactions"),
    entry("EXEC", "-", "transactions"),
    entry("MULTI", "-", "transactions"),
    entry("UNWATCH", "-", "transactions"),
    entry("WATCH", "key [key ...]", "transactions"),
    // scripting
    entry("EVAL", "script numkeys key [key ...] arg [arg ...]", "scripting"),
    entry("EVALSHA", "sha1 numkeys key [key ...] arg [arg ...]", "scripting"),
    entry("SCRIPT EXISTS", "script [script ...]", "scripting"),
    entry("SCRIPT FLUSH", "-", "scripting"),
    entry("SCRIPT LOAD", "script", "scripting"),
    // connection
    entry("AUTH", "password", "connection"),
    entry("ECHO", "message", "connection"),
    entry("PING", "[message]", "connection"),
    entry("QUIT", "-", "connection"),
    entry("SELECT", "index", "connection"),
    // server
    entry("BGREWRITEAOF", "-", "server"),
    entry("BGSAVE", "-", "server"),
    entry("CLIENT LIST", "-", "server"),
    entry("CONFIG GET", "parameter", "server"),
    entry("CONFIG SET", "parameter value", "server"),
    entry("DBSIZE", "-", "server"),
    entry("FLUSHALL", "-", "server"),
    entry("FLUSHDB", "-", "server"),
    entry("INFO", "[section]", "server"),
    entry("LASTSAVE", "-", "server"),
    entry("SAVE", "-", "server"),
    entry("SLOWLOG", "subcommand [argument]", "server"),
    entry("TIME", "-", "server"),
    // hyperloglog
    entry("PFADD", "key element [element ...]", "hyperloglog"),
    entry("PFCOUNT", "key [key ...]", "hyperloglog"),
    entry("PFMERGE", "destkey sourcekey [sourcekey ...]", "hyperloglog"),
    // geo
    entry("GEOADD", "key longitude latitude member [longitude latitude member ...]", "geo"),
    entry("GEODIST", "key member1 member2 [unit]", "geo"),
    entry("GEOPOS", "key member [member ...]", "geo"),
    entry("GEORADIUS", "key longitude latitude radius m|km|ft|mi [WITHCOORD] [WITHDIST] [COUNT count]", "geo"),
];

/// 按命令名查找（不区分大小写）
pub fn lookup(name: &str) -> Option<&'static CommandHelp> {
    let upper = name.to_uppercase();
    COMMANDS.iter().find(|cmd| cmd.name == upper)
}

/// 返回某个分组下的所有命令
pub fn group(name: &str) -> Vec<&'static CommandHelp> {
    let lower = name.to_lowercase();
    COMMANDS.iter().filter(|cmd| cmd.group == lower).collect()
}

/// 补全候选：名称以输入（转大写）为前缀的所有命令
pub fn complete(prefix: &str) -> Vec<String> {
    let upper = prefix.to_uppercase();
    COMMANDS
        .iter()
        .filter(|cmd| cmd.name.starts_with(&upper))
        .map(|cmd| cmd.name.to_string())
        .collect()
}

/// 通用帮助文本
pub fn generic_help() -> String {
    "rcli\nType:\t\"help <command>\" for help on <command>\n\t\"help @<group>\" to list the commands of <group>\n".to_string()
}

/// 单条命令的帮助文本
pub fn command_help(cmd: &CommandHelp) -> String {
    format!("\n\t{} {} \n\tGroup: {} \n", cmd.name, cmd.params, cmd.group)
}
