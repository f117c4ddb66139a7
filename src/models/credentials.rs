use serde::{Deserialize, Serialize};

/// 登录角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// `POST /auth/login` 请求体
///
/// 学生登录不带 `role` 字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl LoginRequest {
    pub fn new(student_id: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            student_id: student_id.into(),
            password: password.into(),
            role: match role {
                Role::Admin => Some(Role::Admin),
                Role::Student => None,
            },
        }
    }
}

/// `POST /auth/register` 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub student_id: String,
    pub password: String,
}

/// 登录/注册成功的响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}
