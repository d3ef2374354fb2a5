//! 命令行参数
//!
//! 沿用 redis-cli 风格的短参数：`-h` 是主机名，因此帮助只保留 `--help`。

use std::ffi::OsString;

use clap::{ArgAction, Parser};
use rcli_client::OutputMode;
use rcli_client::connection::{ConnectionSettings, DEFAULT_HOST, DEFAULT_PORT};

use crate::config::CliConfig;

/// rcli - 键值存储交互式客户端
#[derive(Parser, Debug)]
#[command(name = "rcli")]
#[command(about = "Interactive command-line client for Redis-protocol key-value stores", long_about = None)]
#[command(version, disable_help_flag = true)]
pub struct Cli {
    /// Server hostname
    #[arg(short = 'h', env = "REDIS_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(short = 'p', env = "REDIS_PORT")]
    pub port: Option<u16>,

    /// Server socket (overrides hostname and port)
    #[arg(short = 's')]
    pub socket: Option<String>,

    /// Database number
    #[arg(short = 'n')]
    pub db: Option<i64>,

    /// Password to use when connecting to the server
    #[arg(short = 'a')]
    pub password: Option<String>,

    /// Use raw formatting for replies
    #[arg(long)]
    pub raw: bool,

    /// Show the welcome message in interactive mode
    #[arg(long)]
    pub welcome: bool,

    /// Print help
    #[allow(dead_code)]
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Command to run once; starts the interactive shell when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// 合并配置文件得到连接参数（参数/环境变量优先）
    pub fn settings(&self, file: &CliConfig) -> ConnectionSettings {
        ConnectionSettings {
            host: self
                .host
                .clone()
                .or_else(|| file.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.or(file.port).unwrap_or(DEFAULT_PORT),
            socket: self.socket.clone().or_else(|| file.socket.clone()),
            db: self.db.or(file.db).unwrap_or(0),
            password: self.password.clone().or_else(|| file.password.clone()),
        }
    }

    /// 初始输出模式
    pub fn output_mode(&self, file: &CliConfig) -> OutputMode {
        if self.raw || file.raw.unwrap_or(false) {
            OutputMode::Raw
        } else {
            OutputMode::Std
        }
    }

    /// 是否进入交互模式
    pub fn is_interactive(&self) -> bool {
        self.command.is_empty()
    }
}

/// 带值的短参数，其后一个参数是取值而不是命令
const VALUE_FLAGS: [&str; 5] = ["-h", "-p", "-s", "-n", "-a"];

/// 把单横线写法 `-raw`/`-welcome` 改写成 `--raw`/`--welcome`
///
/// 只处理第一个位置参数之前的部分，命令及其参数原样保留。
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut out: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        match arg.to_str() {
            Some("-raw") => out.push("--raw".into()),
            Some("-welcome") => out.push("--welcome".into()),
            Some(flag) if VALUE_FLAGS.contains(&flag) => {
                out.push(arg);
                out.extend(args.next());
            },
            Some(flag) if flag.starts_with('-') && flag != "--" && flag != "-" => out.push(arg),
            _ => {
                out.push(arg);
                break;
            },
        }
    }

    out.extend(args);
    out
}
