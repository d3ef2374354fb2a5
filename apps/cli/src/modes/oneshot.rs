//! One-shot 模式
//!
//! 进程参数组成一条命令：
//! 1. 建立连接并探测（失败退出码 1，不发送命令）
//! 2. 发送命令（所有参数都会发送）
//! 3. 用与交互模式相同的渲染器输出
//! 4. 成功返回 0，失败返回 -1

use std::io::{self, Write};

use anyhow::Result;
use rcli_client::{Dialer, Session};

use super::EXIT_UNREACHABLE;

/// 执行一条命令并返回退出码
pub fn run_oneshot<D: Dialer>(session: &mut Session<D>, command: &[String]) -> Result<i32> {
    run_oneshot_with(session, command, &mut io::stdout().lock())
}

fn run_oneshot_with<D: Dialer, W: Write>(
    session: &mut Session<D>,
    command: &[String],
    out: &mut W,
) -> Result<i32> {
    if let Err(err) = session.connect() {
        writeln!(out, "{}", err)?;
        return Ok(EXIT_UNREACHABLE);
    }

    let status = session.send_command(command, out)?;
    Ok(status.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcli_client::mock::MockDialer;
    use rcli_client::{ConnectionSettings, OutputMode, Reply};

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    fn run(dialer: MockDialer, line: &str) -> (i32, String) {
        let mut session = Session::new(ConnectionSettings::default(), dialer, OutputMode::Std);
        let mut out = Vec::new();
        let code = run_oneshot_with(&mut session, &args(line), &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_success_exit_code() {
        let dialer = MockDialer::new().reply("get", Reply::bulk("v"));
        let (code, out) = run(dialer, "GET k");
        assert_eq!(code, 0);
        assert_eq!(out, "\"v\"\n");
    }

    #[test]
    fn test_all_arguments_are_sent() {
        let dialer = MockDialer::new().reply("mset", Reply::Status("OK".into()));
        run(dialer.clone(), "mset a 1 b 2");
        assert_eq!(dialer.sent(), vec![args("mset a 1 b 2")]);
    }

    #[test]
    fn test_store_error_exit_code() {
        let dialer = MockDialer::new().server_error("incr", "ERR value is not an integer");
        let (code, out) = run(dialer, "incr k");
        assert_eq!(code, -1);
        assert_eq!(out, "(error) ERR value is not an integer\n");
    }

    #[test]
    fn test_unreachable_exits_without_sending() {
        let dialer = MockDialer::unreachable();
        let (code, out) = run(dialer.clone(), "set k v");
        assert_eq!(code, EXIT_UNREACHABLE);
        assert!(out.contains("Could not connect to 127.0.0.1:6379"));
        assert!(dialer.sent().is_empty());
    }
}
