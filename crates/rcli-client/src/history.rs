//! # 历史记录
//!
//! 命令历史保存在 `~/.rcli_history`，纯文本，每行一条，最新的在最后。
//!
//! 写入内存前先屏蔽敏感参数：
//!
//! | 命令                             | 屏蔽位置 |
//! |----------------------------------|----------|
//! | `auth <password>`                | 第 2 个  |
//! | `connect <host> <port> <auth>`   | 第 4 个  |
//!
//! 读取失败静默忽略（从空历史开始）；写入失败打印提示，但不中止进程。
//! 行编辑器只负责上下键浏览，持久化由 [`History`] 完成，
//! 因此内存中的条目数始终等于保存时写出的行数。

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const DEFAULT_HISTORY_FILE: &str = ".rcli_history";

/// 屏蔽字符串
pub const MASK: &str = "******";

/// 默认历史文件路径 `$HOME/.rcli_history`
///
/// 无法确定 home 目录时返回 `None`（不持久化）。
pub fn default_history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_HISTORY_FILE))
}

/// 返回屏蔽敏感参数后的 token 副本
pub fn mask_sensitive(tokens: &[String]) -> Vec<String> {
    let mut masked = tokens.to_vec();
    match masked.first().map(|t| t.to_lowercase()).as_deref() {
        Some("auth") if masked.len() == 2 => masked[1] = MASK.to_string(),
        Some("connect") if masked.len() == 4 => masked[3] = MASK.to_string(),
        _ => {},
    }
    masked
}

/// 内存中的历史记录，绑定一个可选的持久化文件
#[derive(Debug, Default)]
pub struct History {
    path: Option<PathBuf>,
    entries: Vec<String>,
}

impl History {
    /// 创建不落盘的空历史
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// 从文件加载历史
    ///
    /// 文件不存在或不可读时返回空历史。
    pub fn load(path: Option<PathBuf>) -> Self {
        let entries = match path.as_deref().map(fs::read_to_string) {
            Some(Ok(content)) => content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Some(Err(err)) => {
                tracing::debug!("history file not loaded: {}", err);
                Vec::new()
            },
            None => Vec::new(),
        };

        Self { path, entries }
    }

    /// 追加一条命令（先屏蔽），返回实际存储的行
    pub fn append(&mut self, tokens: &[String]) -> &str {
        let line = mask_sensitive(tokens).join(" ");
        self.entries.push(line);
        self.entries.last().map(String::as_str).unwrap_or_default()
    }

    /// 所有条目（旧的在前）
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// 条目数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 历史文件路径
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 覆盖写入历史文件
    ///
    /// 写入失败时打印提示并返回错误，调用方无需中止。
    pub fn save(&self) -> io::Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let result = self.write_to(path);
        if let Err(ref err) = result {
            tracing::warn!("failed to write history to {}: {}", path.display(), err);
            println!("Error writing history file: {}", err);
        }
        result
    }

    fn write_to(&self, path: &Path) -> io::Result<()> {
        let mut file = io::BufWriter::new(fs::File::create(path)?);
        for entry in &self.entries {
            writeln!(file, "{}", entry)?;
        }
        file.flush()
    }
}
