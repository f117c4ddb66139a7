//! 认证视图：学生登录、管理员登录、学生注册

use crate::error::{AppError, ValidationError};
use crate::infrastructure::{KeyValueStore, Transport};
use crate::models::credentials::{LoginRequest, RegisterRequest, Role};
use crate::models::route::Route;
use crate::workflow::context::AppContext;
use tracing::{info, warn};

/// 注册成功后带到登录页的提示
pub const REGISTRATION_SUCCESS: &str = "Registration successful!";

/// 登录视图（学生 / 管理员）
#[derive(Debug, Clone)]
pub struct LoginView {
    pub role: Role,
    pub student_id: String,
    pub password: String,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl LoginView {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            student_id: String::new(),
            password: String::new(),
            error: None,
            is_loading: false,
        }
    }

    pub fn with_credentials(
        role: Role,
        student_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            password: password.into(),
            ..Self::new(role)
        }
    }

    fn fallback_message(&self) -> &'static str {
        match self.role {
            Role::Student => "Login failed",
            Role::Admin => "An error occurred during login",
        }
    }

    /// 提交登录
    ///
    /// # 返回
    /// 成功时返回要跳转的主页；失败时返回 `None` 并设置 `error`
    pub async fn submit<T, S>(&mut self, ctx: &AppContext<T, S>) -> Option<Route>
    where
        T: Transport,
        S: KeyValueStore,
    {
        if self.is_loading {
            return None;
        }
        self.is_loading = true;
        self.error = None;

        let request = LoginRequest::new(self.student_id.trim(), self.password.as_str(), self.role);
        let result = match ctx.client.login(&request).await {
            Ok(token) => ctx.session.set(&token),
            Err(e) => Err(e),
        };
        self.is_loading = false;

        match result {
            Ok(()) => {
                info!("✓ {} 登录成功，跳转到主页", self.role);
                Some(Route::dashboard_for(self.role))
            }
            Err(e) => {
                warn!("⚠️ 登录失败: {}", e);
                self.error = Some(e.user_message(self.fallback_message()));
                None
            }
        }
    }
}

/// 学生注册视图
#[derive(Debug, Clone, Default)]
pub struct SignupView {
    pub student_id: String,
    pub password: String,
    pub confirm_password: String,
    pub error: Option<String>,
    /// 跳转后在登录页显示的提示
    pub flash: Option<String>,
    pub is_loading: bool,
}

impl SignupView {
    pub fn new(
        student_id: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            ..Self::default()
        }
    }

    /// 提交前校验
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.student_id.trim().is_empty() {
            return Err(ValidationError::Required { field: "Student ID" });
        }
        if self.password.is_empty() {
            return Err(ValidationError::Required { field: "Password" });
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    /// 提交注册
    ///
    /// 校验不通过时不发请求。成功后跳转到学生登录页。
    pub async fn submit<T, S>(&mut self, ctx: &AppContext<T, S>) -> Option<Route>
    where
        T: Transport,
        S: KeyValueStore,
    {
        if self.is_loading {
            return None;
        }
        self.error = None;
        self.flash = None;

        if let Err(e) = self.validate() {
            self.error = Some(e.to_string());
            return None;
        }

        self.is_loading = true;
        let request = RegisterRequest {
            student_id: self.student_id.trim().to_string(),
            password: self.password.clone(),
        };
        let result = match ctx.client.register(&request).await {
            Ok(Some(token)) => ctx.session.set(&token),
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.flash = Some(REGISTRATION_SUCCESS.to_string());
                Some(Route::StudentLogin)
            }
            Err(e) => {
                warn!("⚠️ 注册失败: {}", e);
                self.error = Some(registration_error(&e));
                None
            }
        }
    }
}

fn registration_error(err: &AppError) -> String {
    err.user_message("Registration failed")
}

/// 退出登录：清除 token 并回到对应的登录页
pub fn logout<T, S>(ctx: &AppContext<T, S>, role: Role) -> Route
where
    T: Transport,
    S: KeyValueStore,
{
    ctx.drop_session();
    info!("👋 {} 已退出登录", role);
    Route::login_for(role)
}
