/// UniReg 后端客户端
///
/// 封装所有与后端 REST API 相关的调用逻辑
use crate::error::{ApiError, AppResult, AuthError};
use crate::infrastructure::transport::{ApiRequest, ApiResponse, FormPart, Transport};
use crate::models::credentials::{LoginRequest, RegisterRequest, TokenResponse};
use crate::models::form::RegistrationForm;
use crate::models::submission::{Submission, SubmissionList};
use tracing::{debug, info, warn};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const SUBMIT_PATH: &str = "/form/submit";
pub const SUBMISSIONS_PATH: &str = "/form/submissions";

/// UniReg 客户端
pub struct UniRegClient<T: Transport> {
    transport: T,
}

impl<T: Transport> UniRegClient<T> {
    /// 创建新的客户端
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// 登录
    ///
    /// # 返回
    /// 返回后端签发的 token
    pub async fn login(&self, request: &LoginRequest) -> AppResult<String> {
        debug!("登录请求: 学号 {} 角色 {:?}", request.student_id, request.role);

        let body = serde_json::to_value(request)?;
        let response = self
            .transport
            .send(ApiRequest::post_json(LOGIN_PATH, body))
            .await?;
        let response = ensure_success(LOGIN_PATH, response)?;

        let token = parse_token(&response)?.ok_or(ApiError::MissingField {
            endpoint: LOGIN_PATH.to_string(),
            field: "token",
        })?;

        info!("✓ 登录成功: {}", request.student_id);
        Ok(token)
    }

    /// 注册学生账号
    ///
    /// # 返回
    /// 响应中若带有 token 则一并返回
    pub async fn register(&self, request: &RegisterRequest) -> AppResult<Option<String>> {
        debug!("注册请求: 学号 {}", request.student_id);

        let body = serde_json::to_value(request)?;
        let response = self
            .transport
            .send(ApiRequest::post_json(REGISTER_PATH, body))
            .await?;
        let response = ensure_success(REGISTER_PATH, response)?;

        info!("✓ 注册成功: {}", request.student_id);
        // 注册接口不保证返回 JSON
        Ok(parse_token(&response).ok().flatten())
    }

    /// 提交学期注册表单
    ///
    /// 调用方负责先校验；这里只做规范化与 multipart 序列化。
    pub async fn submit_form(&self, token: &str, form: &RegistrationForm) -> AppResult<()> {
        ensure_token(token)?;
        let parts = build_form_parts(form)?;
        debug!("提交表单: {} 个字段", parts.len());

        let response = self
            .transport
            .send(ApiRequest::post_multipart(SUBMIT_PATH, parts).with_bearer(token))
            .await?;
        ensure_authorized(SUBMIT_PATH, &response)?;
        ensure_success(SUBMIT_PATH, response)?;

        info!("✓ 表单提交成功");
        Ok(())
    }

    /// 获取全部提交记录
    pub async fn fetch_submissions(&self, token: &str) -> AppResult<Vec<Submission>> {
        ensure_token(token)?;
        let response = self
            .transport
            .send(ApiRequest::get(SUBMISSIONS_PATH).with_bearer(token))
            .await?;
        ensure_authorized(SUBMISSIONS_PATH, &response)?;
        let response = ensure_success(SUBMISSIONS_PATH, response)?;

        let list: SubmissionList = if response.body.trim().is_empty() {
            SubmissionList::default()
        } else {
            serde_json::from_str(&response.body)?
        };
        let submissions = list.into_submissions();

        info!("✓ 获取到 {} 条提交记录", submissions.len());
        Ok(submissions)
    }
}

/// 将表单序列化为 multipart 字段
///
/// 附件为二进制字段；`address` 与 `subjects` 序列化为 JSON 字符串；
/// USN 转大写，邮箱转小写。
pub fn build_form_parts(form: &RegistrationForm) -> AppResult<Vec<FormPart>> {
    let form = form.normalized();

    let mut parts = vec![
        FormPart::text("firstName", form.first_name.trim()),
        FormPart::text("lastName", form.last_name.trim()),
        FormPart::text("usn", form.usn.as_str()),
        FormPart::text("email", form.email.as_str()),
        FormPart::text("address", serde_json::to_string(&form.address)?),
        FormPart::text("phone", form.phone.trim()),
        FormPart::text("scheme", form.scheme.as_str()),
        FormPart::text("semester", form.semester.to_string()),
        FormPart::text("subjects", serde_json::to_string(&form.subjects)?),
        FormPart::text("dataVerified", form.data_verified.to_string()),
    ];

    if let Some(receipt) = form.fee_receipt {
        parts.push(FormPart::File {
            name: "feeReceipt".to_string(),
            file_name: receipt.file_name,
            content_type: receipt.content_type,
            bytes: receipt.bytes,
        });
    }

    Ok(parts)
}

fn ensure_token(token: &str) -> AppResult<()> {
    if token.trim().is_empty() {
        return Err(AuthError::MissingToken.into());
    }
    Ok(())
}

fn ensure_authorized(endpoint: &str, response: &ApiResponse) -> AppResult<()> {
    if response.is_unauthorized() {
        warn!("⚠️ {} 返回 {}，token 无效", endpoint, response.status);
        return Err(AuthError::Unauthorized {
            status: response.status,
        }
        .into());
    }
    Ok(())
}

fn ensure_success(endpoint: &str, response: ApiResponse) -> AppResult<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let message = response.message();
    warn!(
        "⚠️ {} 返回错误: status={} message={:?}",
        endpoint, response.status, message
    );
    Err(ApiError::BadResponse {
        endpoint: endpoint.to_string(),
        status: response.status,
        message,
    }
    .into())
}

fn parse_token(response: &ApiResponse) -> AppResult<Option<String>> {
    if response.body.trim().is_empty() {
        return Ok(None);
    }
    let parsed: TokenResponse = serde_json::from_str(&response.body)?;
    Ok(parsed.token.filter(|token| !token.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::{Address, FeeReceipt};

    #[test]
    fn test_build_form_parts_layout() {
        let form = RegistrationForm {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            usn: "abc1234567".into(),
            email: "Foo@Bar.com".into(),
            phone: "9876543210".into(),
            semester: 3,
            subjects: vec!["Mathematics".into(), "Operating System".into()],
            address: Address {
                street: "1 Main".into(),
                city: "Mysuru".into(),
                state: "KA".into(),
                pincode: "570001".into(),
            },
            fee_receipt: Some(FeeReceipt::new("fee.pdf", vec![7, 7])),
            data_verified: true,
            ..RegistrationForm::default()
        };

        let parts = build_form_parts(&form).unwrap();
        let names: Vec<&str> = parts.iter().map(FormPart::name).collect();
        assert_eq!(
            names,
            [
                "firstName",
                "lastName",
                "usn",
                "email",
                "address",
                "phone",
                "scheme",
                "semester",
                "subjects",
                "dataVerified",
                "feeReceipt"
            ]
        );

        let request = ApiRequest::post_multipart(SUBMIT_PATH, parts);
        assert_eq!(request.text_part("usn"), Some("ABC1234567"));
        assert_eq!(request.text_part("email"), Some("foo@bar.com"));
        assert_eq!(request.text_part("semester"), Some("3"));
        assert_eq!(request.text_part("scheme"), Some("2024"));
        assert_eq!(request.text_part("dataVerified"), Some("true"));
        assert_eq!(
            request.text_part("subjects"),
            Some(r#"["Mathematics","Operating System"]"#)
        );
        assert_eq!(
            request.text_part("address"),
            Some(r#"{"street":"1 Main","city":"Mysuru","state":"KA","pincode":"570001"}"#)
        );
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(
            parse_token(&ApiResponse::new(200, r#"{"token":"abc"}"#)).unwrap().as_deref(),
            Some("abc")
        );
        assert_eq!(parse_token(&ApiResponse::new(200, r#"{"token":""}"#)).unwrap(), None);
        assert_eq!(parse_token(&ApiResponse::new(201, "")).unwrap(), None);
        assert!(parse_token(&ApiResponse::new(200, "ok")).is_err());
    }

    #[test]
    fn test_ensure_success_carries_message() {
        let response = ApiResponse::new(409, r#"{"message":"Student already exists"}"#);
        let err = ensure_success(LOGIN_PATH, response).unwrap_err();
        assert_eq!(err.user_message("Registration failed"), "Student already exists");
    }

    #[test]
    fn test_blank_token_is_missing() {
        assert!(matches!(
            ensure_token("  "),
            Err(crate::error::AppError::Auth(AuthError::MissingToken))
        ));
        assert!(ensure_token("tok").is_ok());
    }
}
