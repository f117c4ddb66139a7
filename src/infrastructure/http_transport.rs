//! 基于 reqwest 的传输层实现

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::transport::{
    ApiRequest, ApiResponse, FormPart, Method, RequestBody, Transport,
};
use crate::utils::{mask_token, truncate_text};
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::debug;

/// HTTP 传输层
pub struct HttpTransport {
    client: reqwest::Client,
    config: Config,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输层
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed(&config.api_base_url, e))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn build_form(parts: Vec<FormPart>, endpoint: &str) -> AppResult<Form> {
        let mut form = Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    file_name,
                    content_type,
                    bytes,
                } => {
                    let file = Part::bytes(bytes)
                        .file_name(file_name)
                        .mime_str(&content_type)
                        .map_err(|e| AppError::api_request_failed(endpoint, e))?;
                    form.part(name, file)
                }
            };
        }
        Ok(form)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<ApiResponse> {
        let url = self.config.endpoint_url(&request.path);
        let endpoint = request.path.clone();

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(token) = &request.bearer {
            debug!("携带 token: {}", mask_token(token));
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => builder.multipart(Self::build_form(parts, &endpoint)?),
        };

        debug!("发送请求: {:?} {}", request.method, url);

        let response = builder.send().await.map_err(|e| map_send_error(&endpoint, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| map_send_error(&endpoint, e))?;

        debug!("响应 {} ({}): {}", endpoint, status, truncate_text(&body, 200));

        Ok(ApiResponse { status, body })
    }
}

fn map_send_error(endpoint: &str, err: reqwest::Error) -> AppError {
    if err.is_connect() || err.is_timeout() {
        AppError::Api(ApiError::Unavailable {
            endpoint: endpoint.to_string(),
        })
    } else {
        AppError::api_request_failed(endpoint, err)
    }
}
