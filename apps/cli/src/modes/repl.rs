//! REPL 模式（交互式 Shell）
//!
//! 单线程阻塞读取：每轮一次 `readline`，每条命令一次网络往返。
//!
//! ```text
//! prompting ──非空行──► dispatching ──► prompting
//!     │                     │
//!     └──Ctrl-C/Ctrl-D──────┴──quit/exit──► exiting（保存历史，退出码 0）
//! ```
//!
//! 本地元命令（首个 token，不区分大小写）：
//! `help`/`?`、`quit`/`exit`、`clear`、`mode`、`connect`。
//! 其它命令转小写后发送给服务端。

use std::io::{self, Write};

use anyhow::Result;
use rcli_client::history::{self, History};
use rcli_client::tokenize::{tokenize, unquote};
use rcli_client::{ClientError, Dialer, OutputMode, Session, help};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use super::EXIT_UNREACHABLE;
use crate::helper::CommandHelper;

const MODE_USAGE: &str = "invalid args. Should be MODE [raw|std]";
const CONNECT_USAGE: &str = "invalid args. Should be CONNECT host port [auth]";

/// 单行处理后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// 继续下一轮提示
    Continue,
    /// 退出 REPL
    Quit,
}

/// 运行 REPL 模式，返回进程退出码
pub fn run_repl<D: Dialer + Clone>(session: &mut Session<D>, welcome: bool) -> Result<i32> {
    let mut rl = Editor::<CommandHelper, DefaultHistory>::new()
        .map_err(|e| anyhow::anyhow!("Failed to initialize readline: {}", e))?;
    rl.set_helper(Some(CommandHelper));

    // 历史持久化由 History 负责，行编辑器只用于上下键浏览
    let mut history = History::load(history::default_history_path());
    for entry in history.entries() {
        let _ = rl.add_history_entry(entry.as_str());
    }

    if let Err(err) = session.connect() {
        println!("{}", err);
        return Ok(EXIT_UNREACHABLE);
    }

    if welcome {
        print_welcome();
    }

    let code = loop {
        match rl.readline(&session.prompt()) {
            Ok(line) => {
                let tokens = tokenize(&line);
                if tokens.is_empty() {
                    continue;
                }

                let stored = history.append(&tokens);
                let _ = rl.add_history_entry(stored);

                match dispatch_line(session, &tokens, &mut io::stdout().lock()) {
                    Ok(Flow::Continue) => {},
                    Ok(Flow::Quit) => break 0,
                    Err(err @ ClientError::Unreachable { .. }) => {
                        println!("{}", err);
                        break EXIT_UNREACHABLE;
                    },
                    Err(err) => {
                        let _ = history.save();
                        return Err(err.into());
                    },
                }
            },

            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break 0;
            },

            Err(ReadlineError::Eof) => break 0,

            Err(err) => {
                eprintln!("Error: {:?}", err);
                break 0;
            },
        }
    };

    let _ = history.save();
    Ok(code)
}

/// 处理一行已分词的输入
pub fn dispatch_line<D: Dialer + Clone, W: Write>(
    session: &mut Session<D>,
    tokens: &[String],
    out: &mut W,
) -> Result<Flow, ClientError> {
    let Some(first) = tokens.first() else {
        return Ok(Flow::Continue);
    };
    let args = &tokens[1..];

    match first.to_lowercase().as_str() {
        "help" | "?" => print_help(args, out)?,

        "quit" | "exit" => return Ok(Flow::Quit),

        "clear" => writeln!(out, "Please use Ctrl + L instead")?,

        "mode" => switch_mode(session, args, out)?,

        "connect" => connect(session, args, out)?,

        _ => {
            let words: Vec<String> = tokens.iter().map(|t| unquote(t).to_string()).collect();
            session.send_command(&words, out)?;
        },
    }

    Ok(Flow::Continue)
}

/// 处理 help 命令
fn print_help<W: Write>(args: &[String], out: &mut W) -> io::Result<()> {
    match args {
        [] => writeln!(out, "{}", help::generic_help()),
        [topic] => {
            if let Some(group) = topic.strip_prefix('@') {
                for cmd in help::group(group) {
                    write!(out, "{}", help::command_help(cmd))?;
                }
                writeln!(out)
            } else if let Some(cmd) = help::lookup(topic) {
                writeln!(out, "{}", help::command_help(cmd))
            } else {
                Ok(())
            }
        },
        _ => writeln!(out),
    }
}

/// 处理 mode 命令
fn switch_mode<D: Dialer, W: Write>(
    session: &mut Session<D>,
    args: &[String],
    out: &mut W,
) -> io::Result<()> {
    match args {
        [mode] => match OutputMode::parse(mode) {
            Some(mode) => {
                session.set_mode(mode);
                Ok(())
            },
            None => writeln!(out, "{}", MODE_USAGE),
        },
        _ => writeln!(out, "{}", MODE_USAGE),
    }
}

/// 处理 connect 命令
fn connect<D: Dialer + Clone, W: Write>(
    session: &mut Session<D>,
    args: &[String],
    out: &mut W,
) -> io::Result<()> {
    let (host, port, password) = match args {
        [host, port] => (host, port, None),
        [host, port, password] => (host, port, Some(unquote(password))),
        _ => return writeln!(out, "{}", CONNECT_USAGE),
    };
    let Ok(port) = port.parse::<u16>() else {
        return writeln!(out, "{}", CONNECT_USAGE);
    };

    if let Err(err) = session.reconnect(unquote(host), port, password) {
        writeln!(out, "(error) {}", err)?;
    }
    Ok(())
}

/// 打印欢迎信息
fn print_welcome() {
    println!();
    println!("\tWelcome to rcli.");
    println!("\tYou can switch to a different server instance with the CONNECT command.");
    println!("\tUsage: CONNECT host port [auth]");
    println!();
    println!("\tSwitch output mode with the MODE command.");
    println!("\tUsage: MODE [std | raw]");
    println!();
}
