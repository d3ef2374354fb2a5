//! # 会话
//!
//! 进程内唯一的可变状态：连接管理器、当前数据库编号、当前输出模式。
//! 显式传给 REPL 和一次性执行模式，不使用全局变量。
//!
//! 命令发送流程：
//!
//! ```text
//! tokens ──► 命令名转小写 ──► connect()（惰性）──► execute
//!                                                   │
//!              ┌────────────────────────────────────┤
//!              ▼ Ok                                 ▼ Err
//!   select 成功 → 更新数据库编号              "(error) <msg>"
//!   info → 原样输出，其它 → render()           返回 Failed
//! ```

use std::io::Write;

use crate::connection::{ConnectionManager, ConnectionSettings, Dialer, Transport};
use crate::error::ClientError;
use crate::render::{OutputMode, render, render_info};

/// 单条命令的执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// 命令成功
    Ok,
    /// 服务端或传输错误（已打印）
    Failed,
}

impl CommandStatus {
    /// 对应的内部退出码：成功 0，失败 -1
    pub fn exit_code(self) -> i32 {
        match self {
            CommandStatus::Ok => 0,
            CommandStatus::Failed => -1,
        }
    }
}

/// 会话状态
pub struct Session<D: Dialer> {
    connection: ConnectionManager<D>,
    db: i64,
    mode: OutputMode,
}

impl<D: Dialer> Session<D> {
    /// 创建会话（连接惰性建立）
    pub fn new(settings: ConnectionSettings, dialer: D, mode: OutputMode) -> Self {
        let db = settings.db;
        Self {
            connection: ConnectionManager::new(settings, dialer),
            db,
            mode,
        }
    }

    /// 确保连接可用（首次调用时拨号并探测）
    pub fn connect(&mut self) -> Result<(), ClientError> {
        self.connection.connect().map(|_| ())
    }

    /// 服务端地址
    pub fn address(&self) -> String {
        self.connection.address()
    }

    /// 当前数据库编号
    pub fn db(&self) -> i64 {
        self.db
    }

    /// 当前输出模式
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// 切换输出模式
    pub fn set_mode(&mut self, mode: OutputMode) {
        tracing::debug!("output mode switched to {}", mode);
        self.mode = mode;
    }

    /// 交互提示符：`addr[db]> `（仅 0 < db < 16 时显示编号）
    pub fn prompt(&self) -> String {
        if self.db > 0 && self.db < 16 {
            format!("{}[{}]> ", self.address(), self.db)
        } else {
            format!("{}> ", self.address())
        }
    }

    /// 发送一条命令并把渲染结果写入 `out`
    ///
    /// 参数原样发送；交互模式下的引号由调用方先去除。
    /// 连接失败（[`ClientError::Unreachable`]）向上传递，由调用方决定是否退出；
    /// 命令本身的错误打印为 `(error) <msg>` 并返回 [`CommandStatus::Failed`]。
    pub fn send_command<W: Write>(
        &mut self,
        tokens: &[String],
        out: &mut W,
    ) -> Result<CommandStatus, ClientError> {
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(CommandStatus::Ok);
        };

        let name = first.to_lowercase();
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        let conn = self.connection.connect()?;
        match conn.execute(&name, &args) {
            Ok(reply) => {
                if name == "select" {
                    // 与服务端保持一致；解析失败时归零，不做校验
                    self.db = args.first().and_then(|a| a.parse().ok()).unwrap_or(0);
                }

                let text = if name == "info" {
                    render_info(&reply)
                } else {
                    render(&reply, self.mode)
                };
                writeln!(out, "{}", text)?;
                Ok(CommandStatus::Ok)
            },
            Err(err) => {
                if err.is_server_error() {
                    tracing::debug!("command {} rejected: {}", name, err);
                } else {
                    tracing::warn!("command {} failed: {}", name, err);
                }
                writeln!(out, "(error) {}", err)?;
                Ok(CommandStatus::Failed)
            },
        }
    }
}

impl<D: Dialer + Clone> Session<D> {
    /// 切换到另一个服务端
    ///
    /// 新连接探测成功后才替换；失败时保留原连接并返回错误。
    pub fn reconnect(
        &mut self,
        host: &str,
        port: u16,
        password: Option<&str>,
    ) -> Result<(), ClientError> {
        let settings = ConnectionSettings {
            host: host.to_string(),
            port,
            socket: None,
            db: 0,
            password: password.map(str::to_string),
        };

        let mut next = self.connection.with_settings(settings);
        next.connect()?;

        tracing::info!("switched connection to {}", next.address());
        self.connection = next;
        self.db = 0;
        Ok(())
    }
}
