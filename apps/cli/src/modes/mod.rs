//! 运行模式
//!
//! 支持两种模式：
//! - One-shot 模式：命令来自进程参数，发送一次后退出
//! - REPL 模式：交互式 Shell

pub mod oneshot;
pub mod repl;

/// 首次连接失败时的进程退出码
pub const EXIT_UNREACHABLE: i32 = 1;
