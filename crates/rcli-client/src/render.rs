//! # 回复渲染
//!
//! 把 [`Reply`] 渲染成终端文本。支持两种输出模式：
//!
//! | 类型    | 标准模式 (`std`)        | 原始模式 (`raw`) |
//! |---------|-------------------------|------------------|
//! | 整数    | `(integer) 5`           | `5`              |
//! | 状态    | `OK`                    | `OK`             |
//! | 字符串  | `"hello"`               | `hello`          |
//! | 空值    | `(nil)`                 | （不输出）       |
//! | 错误    | `(error) ERR ...`       | `ERR ...` + 换行 |
//! | 数组    | `1)  ...` 编号列表      | 逐行输出         |
//!
//! 嵌套数组按层级缩进，每层 4 个空格：
//!
//! ```text
//! 1)  (integer) 1
//! 2)  "two"
//! 3)  1)  (integer) 3
//!     2)  (nil)
//! ```
//!
//! 渲染结果不带结尾换行，由调用方决定。

use std::fmt::{self, Write};

use crate::reply::Reply;

/// 每层嵌套的缩进宽度
const INDENT_WIDTH: usize = 4;

/// 输出模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// 标准模式：带类型标注，便于阅读
    #[default]
    Std,
    /// 原始模式：最少修饰，便于脚本处理
    Raw,
}

impl OutputMode {
    /// 解析 `raw` / `std`（不区分大小写）
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "std" => Some(OutputMode::Std),
            "raw" => Some(OutputMode::Raw),
            _ => None,
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Std => write!(f, "std"),
            OutputMode::Raw => write!(f, "raw"),
        }
    }
}

/// 按指定模式渲染回复
pub fn render(reply: &Reply, mode: OutputMode) -> String {
    let mut out = String::new();
    // 写入 String 不会失败
    let _ = match mode {
        OutputMode::Std => write_std(&mut out, 0, reply),
        OutputMode::Raw => write_raw(&mut out, 0, reply),
    };
    out
}

/// 渲染 `info` 命令的回复
///
/// 文本原样输出，错误带 `(error)` 前缀，其它形状不输出。
pub fn render_info(reply: &Reply) -> String {
    match reply {
        Reply::Bulk(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Reply::Status(text) => text.clone(),
        Reply::Error(msg) => format!("(error) {}", msg),
        _ => String::new(),
    }
}

fn write_std(out: &mut String, level: usize, reply: &Reply) -> fmt::Result {
    match reply {
        Reply::Integer(n) => write!(out, "(integer) {}", n),
        Reply::Status(text) => out.write_str(text),
        Reply::Bulk(bytes) => write_quoted(out, bytes),
        Reply::Nil => out.write_str("(nil)"),
        Reply::Error(msg) => write!(out, "(error) {}", msg),
        Reply::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i != 0 {
                    write!(out, "{:width$}", "", width = level * INDENT_WIDTH)?;
                }
                let label = format!("{}) ", i + 1);
                write!(out, "{:<width$}", label, width = INDENT_WIDTH)?;

                write_std(out, level + 1, item)?;
                if i != items.len() - 1 {
                    out.write_char('\n')?;
                }
            }
            Ok(())
        },
        Reply::Unknown(repr) => write!(out, "Unknown reply type: {}", repr),
    }
}

fn write_raw(out: &mut String, level: usize, reply: &Reply) -> fmt::Result {
    match reply {
        Reply::Integer(n) => write!(out, "{}", n),
        Reply::Status(text) => out.write_str(text),
        Reply::Bulk(bytes) => out.write_str(&String::from_utf8_lossy(bytes)),
        Reply::Nil => Ok(()),
        Reply::Error(msg) => writeln!(out, "{}", msg),
        Reply::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i != 0 {
                    write!(out, "{:width$}", "", width = level * INDENT_WIDTH)?;
                }

                write_raw(out, level + 1, item)?;
                if i != items.len() - 1 {
                    out.write_char('\n')?;
                }
            }
            Ok(())
        },
        Reply::Unknown(repr) => write!(out, "Unknown reply type: {}", repr),
    }
}

/// 带转义的双引号字符串
///
/// 非法 UTF-8 字节逐个写成 `\xNN`，不做替换。
fn write_quoted(out: &mut String, bytes: &[u8]) -> fmt::Result {
    out.write_char('"')?;
    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            match c {
                '"' => out.write_str("\\\"")?,
                '\\' => out.write_str("\\\\")?,
                '\x07' => out.write_str("\\a")?,
                '\x08' => out.write_str("\\b")?,
                '\x0c' => out.write_str("\\f")?,
                '\n' => out.write_str("\\n")?,
                '\r' => out.write_str("\\r")?,
                '\t' => out.write_str("\\t")?,
                '\x0b' => out.write_str("\\v")?,
                c if c.is_ascii_control() => write!(out, "\\x{:02x}", c as u32)?,
                c if c.is_control() => write!(out, "\\u{:04x}", c as u32)?,
                c => out.write_char(c)?,
            }
        }
        for byte in chunk.invalid() {
            write!(out, "\\x{:02x}", byte)?;
        }
    }
    out.write_char('"')
}
