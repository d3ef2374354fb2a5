//! 内存 Mock 服务端（仅用于测试）
//!
//! 通过 `mock` feature 启用。[`MockDialer`] 的克隆共享同一个服务端状态，
//! 便于在测试中检查已发送的命令。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::connection::{ConnectionSettings, Dialer, Transport};
use crate::error::ClientError;
use crate::reply::Reply;

#[derive(Debug, Default)]
struct MockServer {
    unreachable: bool,
    replies: HashMap<String, Result<Reply, String>>,
    sent: Vec<Vec<String>>,
    dials: Vec<ConnectionSettings>,
}

/// Mock 拨号器
#[derive(Debug, Clone, Default)]
pub struct MockDialer {
    server: Rc<RefCell<MockServer>>,
}

impl MockDialer {
    /// 可达的空服务端（未预设的命令返回 `ERR unknown command`）
    pub fn new() -> Self {
        Self::default()
    }

    /// 存活探测失败的服务端
    pub fn unreachable() -> Self {
        let dialer = Self::default();
        dialer.set_unreachable(true);
        dialer
    }

    /// 预设某条命令（小写命令名）的回复
    pub fn reply(self, name: &str, reply: Reply) -> Self {
        self.server
            .borrow_mut()
            .replies
            .insert(name.to_lowercase(), Ok(reply));
        self
    }

    /// 预设某条命令返回服务端错误
    pub fn server_error(self, name: &str, msg: &str) -> Self {
        self.server
            .borrow_mut()
            .replies
            .insert(name.to_lowercase(), Err(msg.to_string()));
        self
    }

    /// 切换可达状态（影响之后的拨号）
    pub fn set_unreachable(&self, unreachable: bool) {
        self.server.borrow_mut().unreachable = unreachable;
    }

    /// 已发送的命令（命令名 + 参数）
    pub fn sent(&self) -> Vec<Vec<String>> {
        self.server.borrow().sent.clone()
    }

    /// 每次拨号使用的连接参数
    pub fn dials(&self) -> Vec<ConnectionSettings> {
        self.server.borrow().dials.clone()
    }
}

/// Mock 连接
#[derive(Debug)]
pub struct MockTransport {
    server: Rc<RefCell<MockServer>>,
    reachable: bool,
}

impl Dialer for MockDialer {
    type Conn = MockTransport;

    fn dial(&self, settings: &ConnectionSettings) -> Result<MockTransport, ClientError> {
        let mut server = self.server.borrow_mut();
        server.dials.push(settings.clone());
        Ok(MockTransport {
            server: Rc::clone(&self.server),
            reachable: !server.unreachable,
        })
    }
}

impl Transport for MockTransport {
    fn ping(&mut self) -> Result<(), ClientError> {
        if self.reachable {
            Ok(())
        } else {
            Err(ClientError::Transport("Connection refused (os error 111)".to_string()))
        }
    }

    fn execute(&mut self, name: &str, args: &[&str]) -> Result<Reply, ClientError> {
        let mut server = self.server.borrow_mut();
        let mut command = vec![name.to_string()];
        command.extend(args.iter().map(|a| a.to_string()));
        server.sent.push(command);

        match server.replies.get(name) {
            Some(Ok(reply)) => Ok(reply.clone()),
            Some(Err(msg)) => Err(ClientError::Server(msg.clone())),
            None => Err(ClientError::Server(format!(
                "ERR unknown command '{}'",
                name
            ))),
        }
    }
}
