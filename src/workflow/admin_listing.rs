//! 管理员提交列表视图

use crate::error::AppError;
use crate::infrastructure::{KeyValueStore, Transport};
use crate::models::credentials::Role;
use crate::models::route::Route;
use crate::models::submission::Submission;
use crate::services::csv_export::{export_submissions, CsvExport};
use crate::services::submission_filter::filter_submissions;
use crate::services::table_render::render_table;
use crate::workflow::auth_view::logout;
use crate::workflow::context::AppContext;
use chrono::NaiveDate;
use tracing::{info, warn};

/// 管理员提交列表
///
/// `filtered` 是派生数据：基础列表或搜索词变化后都会重新计算。
#[derive(Debug, Clone)]
pub struct AdminListing {
    submissions: Vec<Submission>,
    filtered: Vec<Submission>,
    search_term: String,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl Default for AdminListing {
    fn default() -> Self {
        Self {
            submissions: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            error: None,
            is_loading: true,
        }
    }
}

impl AdminListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// 挂载视图：一次性拉取全部提交
    ///
    /// # 返回
    /// 需要重定向时返回目标页（无 token 或 token 被拒绝）
    pub async fn mount<T, S>(&mut self, ctx: &AppContext<T, S>) -> Option<Route>
    where
        T: Transport,
        S: KeyValueStore,
    {
        let Some(token) = ctx.token() else {
            self.is_loading = false;
            return Some(Route::AdminLogin);
        };

        self.is_loading = true;
        self.error = None;
        let result = ctx.client.fetch_submissions(&token).await;
        self.is_loading = false;

        match result {
            Ok(submissions) => {
                self.set_submissions(submissions);
                None
            }
            Err(AppError::Auth(e)) => {
                warn!("⚠️ 获取提交列表时认证失败: {}", e);
                ctx.drop_session();
                Some(Route::AdminLogin)
            }
            Err(e) => {
                warn!("⚠️ 获取提交列表失败: {}", e);
                self.error = Some(e.user_message("Failed to load submissions"));
                None
            }
        }
    }

    /// 替换基础列表
    pub fn set_submissions(&mut self, submissions: Vec<Submission>) {
        self.submissions = submissions;
        self.refilter();
    }

    /// 更新搜索词
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_submissions(&self.submissions, &self.search_term);
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// 提交总数（不受搜索影响）
    pub fn total(&self) -> usize {
        self.submissions.len()
    }

    /// 当前显示的记录
    pub fn filtered(&self) -> &[Submission] {
        &self.filtered
    }

    /// 渲染当前显示的表格
    pub fn render_table(&self) -> String {
        render_table(&self.filtered)
    }

    /// 导出当前显示的记录
    pub fn export_csv(&self, date: NaiveDate) -> CsvExport {
        let export = export_submissions(&self.filtered, date);
        info!("📄 导出 {} 行 → {}", export.rows, export.file_name);
        export
    }

    /// 退出登录
    pub fn logout<T, S>(&self, ctx: &AppContext<T, S>) -> Route
    where
        T: Transport,
        S: KeyValueStore,
    {
        logout(ctx, Role::Admin)
    }
}
