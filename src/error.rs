//! 错误类型
//!
//! 分为五类：客户端校验、认证、后端 API、文件、配置。
//! 校验错误的 `Display` 即为界面上展示给用户的文本。

use thiserror::Error;

/// 网络不可达时展示给用户的文本
pub const SERVICE_UNAVAILABLE: &str = "Backend service unavailable. Please try again later.";

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 客户端校验失败（不会发出网络请求）
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// 认证错误（由视图重定向到登录页处理）
    #[error("认证错误: {0}")]
    Auth(#[from] AuthError),
    /// 后端 API 错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 客户端校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("USN must be 10 alphanumeric characters")]
    InvalidUsn,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Phone number must be 10 digits")]
    InvalidPhone,
    #[error("Pincode must be 6 digits")]
    InvalidPincode,
    #[error("Semester must be a number")]
    InvalidSemester { value: String },
    #[error("Please select at least one subject")]
    NoSubjects,
    #[error("Please upload the fee receipt")]
    MissingReceipt,
    #[error("Please verify that the above data is correct")]
    NotVerified,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Unknown form field: {path}")]
    UnknownField { path: String },
    #[error("{subject} is not offered in semester {semester}")]
    UnknownSubject { subject: String, semester: u8 },
    #[error("The form has already been submitted")]
    AlreadySubmitted,
    #[error("Fee receipt file is empty")]
    EmptyReceipt,
}

/// 认证错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// 本地没有保存 token
    #[error("未登录（本地无 token）")]
    MissingToken,
    /// 后端拒绝了 token
    #[error("token 无效或已过期 (status: {status})")]
    Unauthorized { status: u16 },
}

/// 后端 API 错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 后端不可达（连接失败或超时）
    #[error("后端服务不可用 ({endpoint})")]
    Unavailable { endpoint: String },
    /// 后端返回非 2xx 响应
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 响应缺少必需字段
    #[error("API响应缺少字段 `{field}` ({endpoint})")]
    MissingField {
        endpoint: String,
        field: &'static str,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("会话文件损坏 ({path}): {source}")]
    CorruptSession {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("无效的后端地址: '{0}'")]
    InvalidBaseUrl(String),
    #[error("请求超时必须大于 0 秒")]
    ZeroTimeout,
}

// JSON 错误统一归入 API 错误
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed(err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return AppError::File(FileError::NotFound { path });
        }
        AppError::File(FileError::ReadFailed { path, source })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 转换为展示给用户的文本
    ///
    /// 校验错误显示自身文本；后端返回的 message 原样显示；
    /// 网络不可达显示 [`SERVICE_UNAVAILABLE`]；其余使用 `fallback`。
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::Api(ApiError::BadResponse {
                message: Some(message),
                ..
            }) if !message.trim().is_empty() => message.clone(),
            AppError::Api(ApiError::Unavailable { .. }) => SERVICE_UNAVAILABLE.to_string(),
            _ => fallback.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = AppError::Api(ApiError::BadResponse {
            endpoint: "/auth/login".into(),
            status: 401,
            message: Some("Invalid credentials".into()),
        });
        assert_eq!(err.user_message("Login failed"), "Invalid credentials");
    }

    #[test]
    fn test_user_message_falls_back() {
        let blank = AppError::Api(ApiError::BadResponse {
            endpoint: "/auth/login".into(),
            status: 500,
            message: Some("  ".into()),
        });
        assert_eq!(blank.user_message("Login failed"), "Login failed");

        let missing = AppError::Api(ApiError::MissingField {
            endpoint: "/auth/login".into(),
            field: "token",
        });
        assert_eq!(missing.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn test_user_message_unavailable_and_validation() {
        let down = AppError::Api(ApiError::Unavailable {
            endpoint: "/form/submit".into(),
        });
        assert_eq!(down.user_message("Submission failed"), SERVICE_UNAVAILABLE);

        let invalid = AppError::from(ValidationError::NoSubjects);
        assert_eq!(invalid.user_message("x"), "Please select at least one subject");
    }

    #[test]
    fn test_missing_file_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AppError::file_read_failed("receipt.pdf", io);
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }

    #[test]
    fn test_json_error_converts_to_app_error() {
        fn parse(body: &str) -> AppResult<serde_json::Value> {
            Ok(serde_json::from_str(body)?)
        }
        let err = parse("not json").unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::JsonParseFailed(_))));
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }
}
