//! # rcli
//!
//! Interactive command-line client for Redis-protocol key-value stores.
//!
//! ## 双模式
//!
//! ### One-shot 模式（推荐用于脚本）
//!
//! ```bash
//! rcli -h 10.0.0.5 -p 6380 set greeting hello
//! rcli --raw lrange mylist 0 -1
//! ```
//!
//! ### REPL 模式
//!
//! ```bash
//! $ rcli
//! 127.0.0.1:6379> set key "hello world"
//! OK
//! 127.0.0.1:6379> select 2
//! OK
//! 127.0.0.1:6379[2]> mode raw
//! 127.0.0.1:6379[2]> exit
//! ```
//!
//! ## 退出码
//!
//! - `0`：正常退出 / 命令成功
//! - `1`：首次连接或存活探测失败，配置文件无效
//! - `255`：one-shot 命令返回错误

use anyhow::{Context, Result};
use clap::Parser;
use rcli_client::{RedisDialer, Session};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod helper;
mod modes;

use cli::Cli;
use config::CliConfig;
use modes::oneshot::run_oneshot;
use modes::repl::run_repl;

fn main() {
    let cli = Cli::parse_from(cli::normalize_args(std::env::args_os()));

    // 初始化日志（写到 stderr，不与回复输出混在一起）
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rcli=warn,rcli_client=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        },
    };

    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let file = CliConfig::load().context("failed to load configuration")?;
    let settings = cli.settings(&file);
    let mode = cli.output_mode(&file);

    tracing::debug!("server address {}, output mode {}", settings.address(), mode);
    let mut session = Session::new(settings, RedisDialer, mode);

    if cli.is_interactive() {
        // REPL 模式：交互式 Shell
        run_repl(&mut session, cli.welcome)
    } else {
        // One-shot 模式：发送一次后退出
        run_oneshot(&mut session, &cli.command)
    }
}
