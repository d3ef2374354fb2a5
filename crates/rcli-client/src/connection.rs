//! # 连接管理
//!
//! 进程内只持有一个连接，首次使用时惰性建立：
//!
//! 1. 通过 [`Dialer`] 拨号（TCP 或 Unix socket，必要时由 redis crate 完成 AUTH/SELECT）
//! 2. 发送 `PING` 做存活探测
//! 3. 之后所有命令复用同一连接
//!
//! 没有连接池，没有断线重连，也没有重试。探测失败返回
//! [`ClientError::Unreachable`]，首次连接时由调用方以状态码 1 退出。
//!
//! [`Dialer`] / [`Transport`] 是会话与网络之间的接缝，测试中可替换为内存实现。

use redis::ConnectionLike;

use crate::error::ClientError;
use crate::reply::{Reply, server_error_text};

/// 默认主机
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// 默认端口
pub const DEFAULT_PORT: u16 = 6379;

/// 连接参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// 主机名
    pub host: String,
    /// 端口
    pub port: u16,
    /// Unix socket 路径（设置后覆盖 host/port）
    pub socket: Option<String>,
    /// 数据库编号
    pub db: i64,
    /// 密码
    pub password: Option<String>,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            socket: None,
            db: 0,
            password: None,
        }
    }
}

impl ConnectionSettings {
    /// 服务端地址：优先 socket 路径，否则 `host:port`
    pub fn address(&self) -> String {
        match self.socket.as_deref() {
            Some(socket) if !socket.is_empty() => socket.to_string(),
            _ => format!("{}:{}", self.host, self.port),
        }
    }

    fn connection_info(&self) -> Result<redis::ConnectionInfo, ClientError> {
        let addr = match self.socket.as_deref() {
            Some(socket) if !socket.is_empty() => unix_addr(socket)?,
            _ => redis::ConnectionAddr::Tcp(self.host.clone(), self.port),
        };

        Ok(redis::ConnectionInfo {
            addr,
            redis: redis::RedisConnectionInfo {
                db: self.db,
                password: self.password.clone().filter(|p| !p.is_empty()),
                ..Default::default()
            },
        })
    }
}

#[cfg(unix)]
fn unix_addr(socket: &str) -> Result<redis::ConnectionAddr, ClientError> {
    Ok(redis::ConnectionAddr::Unix(socket.into()))
}

#[cfg(not(unix))]
fn unix_addr(socket: &str) -> Result<redis::ConnectionAddr, ClientError> {
    Err(ClientError::Connect(format!(
        "unix socket {} is not supported on this platform",
        socket
    )))
}

/// 已建立的连接：发送命令并取回回复
pub trait Transport {
    /// 存活探测
    fn ping(&mut self) -> Result<(), ClientError>;

    /// 发送一条命令
    ///
    /// 服务端错误以 [`ClientError::Server`] 返回。
    fn execute(&mut self, name: &str, args: &[&str]) -> Result<Reply, ClientError>;
}

/// 根据连接参数建立 [`Transport`]
pub trait Dialer {
    type Conn: Transport;

    fn dial(&self, settings: &ConnectionSettings) -> Result<Self::Conn, ClientError>;
}

/// 惰性单连接管理器
pub struct ConnectionManager<D: Dialer> {
    settings: ConnectionSettings,
    dialer: D,
    conn: Option<D::Conn>,
}

impl<D: Dialer> ConnectionManager<D> {
    /// 创建管理器（不会立即连接）
    pub fn new(settings: ConnectionSettings, dialer: D) -> Self {
        Self {
            settings,
            dialer,
            conn: None,
        }
    }

    /// 连接参数
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// 服务端地址
    pub fn address(&self) -> String {
        self.settings.address()
    }

    /// 是否已建立连接
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// 获取连接，必要时建立并探测（幂等）
    pub fn connect(&mut self) -> Result<&mut D::Conn, ClientError> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => self.open()?,
        };
        Ok(self.conn.insert(conn))
    }

    fn open(&self) -> Result<D::Conn, ClientError> {
        let addr = self.settings.address();
        let unreachable = |source: ClientError| ClientError::Unreachable {
            addr: addr.clone(),
            source: Box::new(source),
        };

        tracing::debug!("dialing {}", addr);
        let mut conn = self.dialer.dial(&self.settings).map_err(unreachable)?;

        tracing::debug!("liveness probe to {}", addr);
        if let Err(err) = conn.ping() {
            tracing::warn!("liveness probe to {} failed: {}", addr, err);
            return Err(unreachable(err));
        }

        Ok(conn)
    }
}

impl<D: Dialer + Clone> ConnectionManager<D> {
    /// 用新参数创建一个未连接的管理器，复用同一个拨号器
    pub fn with_settings(&self, settings: ConnectionSettings) -> Self {
        Self::new(settings, self.dialer.clone())
    }
}

/// 基于 redis crate 的拨号器
#[derive(Debug, Clone, Copy, Default)]
pub struct RedisDialer;

/// 基于 redis crate 的同步连接
pub struct RedisTransport {
    conn: redis::Connection,
}

impl Dialer for RedisDialer {
    type Conn = RedisTransport;

    fn dial(&self, settings: &ConnectionSettings) -> Result<RedisTransport, ClientError> {
        let client = redis::Client::open(settings.connection_info()?)?;
        let conn = client.get_connection()?;
        Ok(RedisTransport { conn })
    }
}

impl RedisTransport {
    /// 发送一条命令；顶层错误回复转为 [`ClientError::Server`]，嵌套错误留在回复中
    fn request(&mut self, cmd: &redis::Cmd) -> Result<redis::Value, ClientError> {
        match self.conn.req_command(cmd)? {
            redis::Value::ServerError(err) => Err(ClientError::Server(server_error_text(err.code(), err.details()))),
            value => Ok(value),
        }
    }
}

impl Transport for RedisTransport {
    fn ping(&mut self) -> Result<(), ClientError> {
        self.request(&redis::cmd("PING"))?;
        Ok(())
    }

    fn execute(&mut self, name: &str, args: &[&str]) -> Result<Reply, ClientError> {
        let mut cmd = redis::cmd(name);
        for arg in args {
            cmd.arg(*arg);
        }
        let value = self.request(&cmd)?;
        Ok(Reply::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeConn {
        ping_ok: bool,
    }

    impl Transport for FakeConn {
        fn ping(&mut self) -> Result<(), ClientError> {
            if self.ping_ok {
                Ok(())
            } else {
                Err(ClientError::Transport("Connection refused".to_string()))
            }
        }

        fn execute(&mut self, _name: &str, _args: &[&str]) -> Result<Reply, ClientError> {
            Ok(Reply::Status("OK".to_string()))
        }
    }

    #[derive(Clone)]
    struct FakeDialer {
        dials: Rc<Cell<usize>>,
        ping_ok: bool,
    }

    impl Dialer for FakeDialer {
        type Conn = FakeConn;

        fn dial(&self, _settings: &ConnectionSettings) -> Result<FakeConn, ClientError> {
            self.dials.set(self.dials.get() + 1);
            Ok(FakeConn {
                ping_ok: self.ping_ok,
            })
        }
    }

    fn dialer(ping_ok: bool) -> FakeDialer {
        FakeDialer {
            dials: Rc::new(Cell::new(0)),
            ping_ok,
        }
    }

    #[test]
    fn test_address_prefers_socket() {
        let mut settings = ConnectionSettings::default();
        assert_eq!(settings.address(), "127.0.0.1:6379");

        settings.socket = Some("/tmp/kv.sock".to_string());
        assert_eq!(settings.address(), "/tmp/kv.sock");

        settings.socket = Some(String::new());
        assert_eq!(settings.address(), "127.0.0.1:6379");
    }

    #[test]
    fn test_connect_is_idempotent() {
        let dialer = dialer(true);
        let dials = dialer.dials.clone();
        let mut manager = ConnectionManager::new(ConnectionSettings::default(), dialer);

        assert!(!manager.is_connected());
        manager.connect().unwrap();
        manager.connect().unwrap();
        assert!(manager.is_connected());
        assert_eq!(dials.get(), 1);
    }

    #[test]
    fn test_failed_probe_is_unreachable() {
        let mut manager = ConnectionManager::new(ConnectionSettings::default(), dialer(false));

        match manager.connect() {
            Err(ClientError::Unreachable { addr, .. }) => assert_eq!(addr, "127.0.0.1:6379"),
            Err(other) => panic!("Expected Unreachable, got {:?}", other),
            Ok(_) => panic!("Expected probe failure"),
        }
        assert!(!manager.is_connected());
    }

    #[test]
    fn test_with_settings_starts_disconnected() {
        let mut manager = ConnectionManager::new(ConnectionSettings::default(), dialer(true));
        manager.connect().unwrap();

        let other = manager.with_settings(ConnectionSettings {
            port: 6380,
            ..Default::default()
        });
        assert!(!other.is_connected());
        assert_eq!(other.address(), "127.0.0.1:6380");
    }

    #[cfg(unix)]
    #[test]
    fn test_connection_info_for_socket() {
        let settings = ConnectionSettings {
            socket: Some("/tmp/kv.sock".to_string()),
            db: 2,
            password: Some("pw".to_string()),
            ..Default::default()
        };
        let info = settings.connection_info().unwrap();
        assert!(matches!(info.addr, redis::ConnectionAddr::Unix(_)));
        assert_eq!(info.redis.db, 2);
        assert_eq!(info.redis.password.as_deref(), Some("pw"));
    }

    /// 回环地址上的最小 RESP 服务端：按命令名（大写）返回预置的原始回复，其余回复 `+OK`
    fn spawn_server(replies: &[(&'static str, &'static str)]) -> ConnectionSettings {
        use std::collections::HashMap;
        use std::io::{BufRead, BufReader, Read, Write};
        use std::net::TcpListener;

        fn read_request(reader: &mut impl BufRead) -> std::io::Result<Option<Vec<String>>> {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let count: usize = line.trim_end().trim_start_matches('*').parse().unwrap();
            let mut args = Vec::with_capacity(count);
            for _ in 0..count {
                line.clear();
                reader.read_line(&mut line)?;
                let len: usize = line.trim_end().trim_start_matches('$').parse().unwrap();
                let mut buf = vec![0u8; len + 2];
                reader.read_exact(&mut buf)?;
                buf.truncate(len);
                args.push(String::from_utf8_lossy(&buf).into_owned());
            }
            Ok(Some(args))
        }

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let replies: HashMap<&str, &str> = replies.iter().copied().collect();

        std::thread::spawn(move || {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let mut writer = stream.try_clone().unwrap();
            let mut reader = BufReader::new(stream);
            while let Ok(Some(args)) = read_request(&mut reader) {
                let name = args.first().map(|a| a.to_uppercase()).unwrap_or_default();
                let reply = replies.get(name.as_str()).copied().unwrap_or("+OK\r\n");
                if writer.write_all(reply.as_bytes()).is_err() {
                    break;
                }
            }
        });

        ConnectionSettings {
            port,
            ..Default::default()
        }
    }

    fn redis_manager(replies: &[(&'static str, &'static str)]) -> ConnectionManager<RedisDialer> {
        let mut replies = replies.to_vec();
        replies.push(("PING", "+PONG\r\n"));
        ConnectionManager::new(spawn_server(&replies), RedisDialer)
    }

    #[test]
    fn test_redis_transport_status_reply() {
        let mut manager = redis_manager(&[]);
        let conn = manager.connect().unwrap();

        let reply = conn.execute("set", &["k", "v"]).unwrap();
        assert_eq!(reply, Reply::Status("OK".to_string()));
    }

    #[test]
    fn test_redis_transport_nested_array() {
        let mut manager = redis_manager(&[(
            "LRANGE",
            "*3\r\n:1\r\n$3\r\ntwo\r\n*2\r\n:3\r\n$-1\r\n",
        )]);
        let conn = manager.connect().unwrap();

        let reply = conn.execute("lrange", &["l", "0", "-1"]).unwrap();
        assert_eq!(
            reply,
            Reply::Array(vec![
                Reply::Integer(1),
                Reply::bulk("two"),
                Reply::Array(vec![Reply::Integer(3), Reply::Nil]),
            ])
        );
    }

    #[test]
    fn test_redis_transport_keeps_nested_error() {
        let mut manager =
            redis_manager(&[("EXEC", "*2\r\n+OK\r\n-ERR value is not an integer\r\n")]);
        let conn = manager.connect().unwrap();

        let reply = conn.execute("exec", &[]).unwrap();
        assert_eq!(
            reply,
            Reply::Array(vec![
                Reply::Status("OK".to_string()),
                Reply::Error("ERR value is not an integer".to_string()),
            ])
        );
        assert_eq!(
            crate::render::render(&reply, crate::render::OutputMode::Std),
            "1)  OK\n2)  (error) ERR value is not an integer"
        );
    }

    #[test]
    fn test_redis_transport_top_level_error() {
        let mut manager = redis_manager(&[("BOGUS", "-ERR unknown command 'bogus'\r\n")]);
        let conn = manager.connect().unwrap();

        match conn.execute("bogus", &[]) {
            Err(ClientError::Server(msg)) => assert_eq!(msg, "ERR unknown command 'bogus'"),
            other => panic!("Expected server error, got {:?}", other),
        }
        // 错误回复之后连接仍可用
        assert_eq!(
            conn.execute("set", &["k", "v"]).unwrap(),
            Reply::Status("OK".to_string())
        );
    }

    #[test]
    fn test_empty_password_is_not_sent() {
        let settings = ConnectionSettings {
            password: Some(String::new()),
            ..Default::default()
        };
        let info = settings.connection_info().unwrap();
        assert!(info.redis.password.is_none());
    }
}
