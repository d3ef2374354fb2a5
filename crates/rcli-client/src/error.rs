//! 客户端错误类型定义

use thiserror::Error;

/// 客户端错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    /// 无法建立连接或存活探测（PING）失败
    ///
    /// 首次连接时出现该错误，调用方应以状态码 1 退出进程。
    #[error("Could not connect to {addr}: {source}")]
    Unreachable {
        addr: String,
        #[source]
        source: Box<ClientError>,
    },

    /// 服务端返回的错误回复（如 `ERR unknown command`）
    #[error("{0}")]
    Server(String),

    /// IO 或协议层错误
    #[error("{0}")]
    Transport(String),

    /// 连接参数无效
    #[error("invalid connection settings: {0}")]
    Connect(String),

    /// 输出写入失败
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl From<redis::RedisError> for ClientError {
    fn from(err: redis::RedisError) -> Self {
        // 服务端错误保留原始 "CODE detail" 形式，与服务端输出一致
        match err.code() {
            Some(code) if !err.is_io_error() => match err.detail() {
                Some(detail) => ClientError::Server(format!("{} {}", code, detail)),
                None => ClientError::Server(code.to_string()),
            },
            _ => ClientError::Transport(err.to_string()),
        }
    }
}

impl ClientError {
    /// 是否为服务端报告的错误
    pub fn is_server_error(&self) -> bool {
        matches!(self, ClientError::Server(_))
    }
}

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Server("ERR unknown command 'foo'".to_string());
        assert_eq!(format!("{}", err), "ERR unknown command 'foo'");
        assert!(err.is_server_error());

        let err = ClientError::Transport("broken pipe".to_string());
        assert_eq!(format!("{}", err), "broken pipe");
        assert!(!err.is_server_error());

        let err = ClientError::Unreachable {
            addr: "127.0.0.1:6379".to_string(),
            source: Box::new(ClientError::Transport("Connection refused".to_string())),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("127.0.0.1:6379") && msg.contains("Connection refused"));
    }

    #[test]
    fn test_from_redis_response_error() {
        let err = redis::RedisError::from((
            redis::ErrorKind::ResponseError,
            "An error was signalled by the server",
            "WRONGTYPE Operation against a key".to_string(),
        ));
        let client_err: ClientError = err.into();
        assert!(client_err.is_server_error(), "got {:?}", client_err);
    }

    #[test]
    fn test_from_redis_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let client_err: ClientError = redis::RedisError::from(io).into();
        match client_err {
            ClientError::Transport(msg) => assert!(msg.contains("refused")),
            other => panic!("Expected Transport variant, got {:?}", other),
        }
    }
}
