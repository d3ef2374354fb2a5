//! 回复模型
//!
//! 服务端对单条命令的回复，形状在运行时才确定。
//! 使用带标签的枚举表示，渲染器按标签分派。

use redis::Value;

/// 单条命令的回复
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// 整数回复
    Integer(i64),
    /// 状态回复（如 `OK`、`PONG`），标准模式下不加引号
    Status(String),
    /// 二进制安全字符串
    Bulk(Vec<u8>),
    /// 空回复
    Nil,
    /// 嵌套在数组中的错误回复
    Error(String),
    /// 有序序列（可递归嵌套）
    Array(Vec<Reply>),
    /// 模型未覆盖的协议值，保存其调试表示
    Unknown(String),
}

impl Reply {
    /// 便捷构造：文本 bulk 字符串
    pub fn bulk(text: impl Into<String>) -> Self {
        Reply::Bulk(text.into().into_bytes())
    }
}

/// 服务端错误的原始文本，形如 `ERR value is not an integer`
pub(crate) fn server_error_text(code: &str, details: Option<&str>) -> String {
    match details {
        Some(details) => format!("{} {}", code, details),
        None => code.to_string(),
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        match value {
            Value::Nil => Reply::Nil,
            Value::Int(n) => Reply::Integer(n),
            Value::BulkString(bytes) => Reply::Bulk(bytes),
            Value::SimpleString(s) => Reply::Status(s),
            Value::Okay => Reply::Status("OK".to_string()),
            Value::ServerError(err) => Reply::Error(server_error_text(err.code(), err.details())),
            Value::Array(items) | Value::Set(items) => {
                Reply::Array(items.into_iter().map(Reply::from).collect())
            },
            // RESP3 map 展开为 key/value 交替的数组
            Value::Map(pairs) => Reply::Array(
                pairs
                    .into_iter()
                    .flat_map(|(k, v)| [Reply::from(k), Reply::from(v)])
                    .collect(),
            ),
            other => Reply::Unknown(format!("{:?}", other)),
        }
    }
}
