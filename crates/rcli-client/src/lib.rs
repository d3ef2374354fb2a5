//! # rcli-client
//!
//! 键值存储交互客户端的核心库：
//! - 惰性单连接管理与存活探测（[`connection`]）
//! - 带标签的回复模型与两种渲染模式（[`reply`]、[`render`]）
//! - 命令行分词（[`tokenize`]）
//! - 带敏感参数屏蔽的历史记录（[`history`]）
//! - 命令帮助表（[`help`]）
//! - 会话状态与命令发送（[`session`]）
//!
//! 传输协议由 `redis` crate 负责，本库只做会话和展示。
//!
//! # Example
//!
//! ```no_run
//! use rcli_client::{ConnectionSettings, OutputMode, RedisDialer, Session};
//!
//! let mut session = Session::new(ConnectionSettings::default(), RedisDialer, OutputMode::Std);
//! let tokens = rcli_client::tokenize::tokenize("ping");
//! session.send_command(&tokens, &mut std::io::stdout()).unwrap();
//! ```

pub mod connection;
pub mod error;
pub mod help;
pub mod history;
pub mod render;
pub mod reply;
pub mod session;
pub mod tokenize;

// Mock 服务端（测试用）
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// 重新导出常用类型
pub use connection::{ConnectionManager, ConnectionSettings, Dialer, RedisDialer, Transport};
pub use error::ClientError;
pub use history::History;
pub use render::OutputMode;
pub use reply::Reply;
pub use session::{CommandStatus, Session};
