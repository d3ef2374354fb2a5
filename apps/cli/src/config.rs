//! 配置文件
//!
//! 可选的 TOML 文件，为命令行参数提供默认值：
//! - Linux: `~/.config/rcli/config.toml`
//! - macOS: `~/Library/Application Support/rcli/config.toml`
//! - 可用 `RCLI_CONFIG` 环境变量覆盖（设为空字符串则禁用）
//!
//! ```toml
//! host = "10.0.0.5"
//! port = 6380
//! db = 1
//! raw = true
//! ```
//!
//! 优先级：命令行参数 > 环境变量 > 配置文件 > 内置默认值。

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_ENV_VAR: &str = "RCLI_CONFIG";

/// 配置文件错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件存在但读取失败
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// TOML 格式错误或包含未知字段
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// 配置文件路径
pub fn config_file() -> Option<PathBuf> {
    if let Ok(custom_path) = env::var(CONFIG_ENV_VAR) {
        if custom_path.is_empty() {
            return None;
        }
        return Some(PathBuf::from(custom_path));
    }

    dirs::config_dir().map(|dir| dir.join("rcli").join("config.toml"))
}

/// CLI 配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// 默认主机
    pub host: Option<String>,

    /// 默认端口
    pub port: Option<u16>,

    /// Unix socket 路径
    pub socket: Option<String>,

    /// 数据库编号
    pub db: Option<i64>,

    /// 密码
    pub password: Option<String>,

    /// 默认使用原始输出
    pub raw: Option<bool>,
}

impl CliConfig {
    /// 从默认位置加载配置（文件不存在时返回默认配置）
    pub fn load() -> Result<Self, ConfigError> {
        match config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// 从指定文件加载配置
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no config file at {}", path.display());
                return Ok(Self::default());
            },
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            },
        };

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = CliConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_load_all_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
host = "10.0.0.5"
port = 6380
socket = "/tmp/kv.sock"
db = 2
password = "secret"
raw = true
"#,
        )
        .unwrap();

        let config = CliConfig::load_from(&path).unwrap();
        assert_eq!(config.host.as_deref(), Some("10.0.0.5"));
        assert_eq!(config.port, Some(6380));
        assert_eq!(config.socket.as_deref(), Some("/tmp/kv.sock"));
        assert_eq!(config.db, Some(2));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.raw, Some(true));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "hostname = \"x\"\n").unwrap();

        let err = CliConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        unsafe { env::set_var(CONFIG_ENV_VAR, "/custom/rcli.toml") };
        let path = config_file();
        unsafe { env::remove_var(CONFIG_ENV_VAR) };

        assert_eq!(path, Some(PathBuf::from("/custom/rcli.toml")));
    }

    #[test]
    #[serial]
    fn test_empty_env_disables_config() {
        unsafe { env::set_var(CONFIG_ENV_VAR, "") };
        let path = config_file();
        unsafe { env::remove_var(CONFIG_ENV_VAR) };

        assert_eq!(path, None);
        unsafe { env::set_var(CONFIG_ENV_VAR, "") };
        let config = CliConfig::load();
        unsafe { env::remove_var(CONFIG_ENV_VAR) };
        assert_eq!(config.unwrap(), CliConfig::default());
    }
}
