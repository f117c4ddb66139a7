use crate::error::{AppResult, ConfigError};
use std::path::PathBuf;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 API 地址
    pub api_base_url: String,
    /// 会话（token）持久化文件
    pub session_file: PathBuf,
    /// CSV 导出目录
    pub export_dir: PathBuf,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            session_file: PathBuf::from(".unireg/session.json"),
            export_dir: PathBuf::from("."),
            request_timeout_secs: 30,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("UNIREG_API_URL").unwrap_or(default.api_base_url),
            session_file: std::env::var("UNIREG_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(default.session_file),
            export_dir: std::env::var("UNIREG_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.export_dir),
            request_timeout_secs: std::env::var("UNIREG_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("UNIREG_VERBOSE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> AppResult<()> {
        let url = self.api_base_url.trim();
        if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.api_base_url.clone()).into());
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout.into());
        }
        Ok(())
    }

    /// 拼接完整的接口地址
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            api_base_url: "localhost:5000".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let config = Config {
            api_base_url: "https://uni.example/api/".into(),
            ..Config::default()
        };
        assert_eq!(config.endpoint_url("/auth/login"), "https://uni.example/api/auth/login");
        assert_eq!(config.endpoint_url("form/submit"), "https://uni.example/api/form/submit");
    }
}
