use crate::models::credentials::Role;

/// 视图导航目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    StudentLogin,
    AdminLogin,
    StudentDashboard,
    AdminDashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::StudentLogin => "/student-login",
            Route::AdminLogin => "/admin-login",
            Route::StudentDashboard => "/student-dashboard",
            Route::AdminDashboard => "/admin-dashboard",
        }
    }

    /// 角色对应的登录页
    pub fn login_for(role: Role) -> Self {
        match role {
            Role::Student => Route::StudentLogin,
            Role::Admin => Route::AdminLogin,
        }
    }

    /// 角色对应的主页
    pub fn dashboard_for(role: Role) -> Self {
        match role {
            Role::Student => Route::StudentDashboard,
            Role::Admin => Route::AdminDashboard,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
