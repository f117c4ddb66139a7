//! 传输层抽象
//!
//! 客户端只构造 [`ApiRequest`]，由 [`Transport`] 负责真正发出请求。
//! 生产环境用 reqwest 实现，测试中可替换为脚本化的实现。

use crate::error::AppResult;
use serde_json::Value;
use std::future::Future;

/// HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// multipart 表单的一个字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// 请求体
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// 发往后端的请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// 相对于后端地址的路径，如 `/auth/login`
    pub path: String,
    /// Bearer token
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            bearer: None,
            body: RequestBody::Json(body),
        }
    }

    pub fn post_multipart(path: impl Into<String>, parts: Vec<FormPart>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            bearer: None,
            body: RequestBody::Multipart(parts),
        }
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// 按名称查找文本字段
    pub fn text_part(&self, name: &str) -> Option<&str> {
        match &self.body {
            RequestBody::Multipart(parts) => parts.iter().find_map(|part| match part {
                FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            }),
            _ => None,
        }
    }
}

/// 后端响应（状态码 + 原始响应体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// 解析为 JSON；空响应体视为 `null`
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body)
    }

    /// 提取响应体中的 `message` 字段
    pub fn message(&self) -> Option<String> {
        self.json()
            .ok()?
            .get("message")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

/// 传输层
///
/// 非 2xx 响应不是错误，原样返回；只有请求本身失败（连接、超时等）才返回 `Err`。
pub trait Transport: Send + Sync {
    fn send(&self, request: ApiRequest) -> impl Future<Output = AppResult<ApiResponse>> + Send;
}
