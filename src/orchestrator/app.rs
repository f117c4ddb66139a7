//! 命令编排
//!
//! 每个命令挂载对应视图、驱动其操作，并把结果整理为输出行。
//! 视图要求重定向到登录页时命令以错误结束。

use crate::config::Config;
use crate::infrastructure::{KeyValueStore, Transport};
use crate::models::credentials::Role;
use crate::models::form::FeeReceipt;
use crate::models::loaders::load_form_draft;
use crate::models::route::Route;
use crate::models::subject::subjects_for;
use crate::orchestrator::cli::Command;
use crate::utils::logging::{log_listing_stats, log_startup};
use crate::workflow::{
    logout, AdminListing, AppContext, FormState, HttpContext, LoginView, RegistrationController,
    SignupView,
};
use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

/// 提交成功后的提示
pub const SUBMITTED_MESSAGE: &str =
    "Your details have been successfully submitted and recorded in our system.";

/// 命令执行结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// 输出到终端的行
    pub lines: Vec<String>,
    /// 跳转目标
    pub navigate: Option<Route>,
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            navigate: None,
        }
    }

    fn navigate(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    ctx: HttpContext,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        log_startup(&config);
        let ctx = HttpContext::from_config(&config).context("无法创建 HTTP 客户端")?;
        Ok(Self { config, ctx })
    }

    /// 执行命令
    pub async fn run(&self, command: Command) -> Result<Outcome> {
        execute(&self.ctx, &self.config, command).await
    }
}

fn redirect_error(reason: &str, route: Route) -> anyhow::Error {
    anyhow!("{} → {}", reason, route)
}

/// 在给定上下文中执行命令
pub async fn execute<T, S>(
    ctx: &AppContext<T, S>,
    config: &Config,
    command: Command,
) -> Result<Outcome>
where
    T: Transport,
    S: KeyValueStore,
{
    match command {
        Command::Subjects { semester } => Ok(list_subjects(semester)),
        Command::Login {
            student_id,
            password,
            admin,
        } => {
            let role = if admin { Role::Admin } else { Role::Student };
            let mut view = LoginView::with_credentials(role, student_id, password);
            match view.submit(ctx).await {
                Some(route) => Ok(Outcome::lines(vec![format!(
                    "Signed in as {} ({})",
                    view.student_id, role
                )])
                .navigate(route)),
                None => bail!(view.error.unwrap_or_else(|| "Login failed".to_string())),
            }
        }
        Command::Register {
            student_id,
            password,
            confirm_password,
        } => {
            let mut view = SignupView::new(student_id, password, confirm_password);
            match view.submit(ctx).await {
                Some(route) => Ok(Outcome::lines(view.flash.into_iter().collect()).navigate(route)),
                None => bail!(view.error.unwrap_or_else(|| "Registration failed".to_string())),
            }
        }
        Command::Logout { admin } => {
            let role = if admin { Role::Admin } else { Role::Student };
            let route = logout(ctx, role);
            Ok(Outcome::lines(vec!["Signed out".to_string()]).navigate(route))
        }
        Command::Submit {
            form,
            receipt,
            verified,
        } => submit_form(ctx, &form, &receipt, verified).await,
        Command::Submissions {
            search,
            export,
            out,
        } => {
            let dir = out.unwrap_or_else(|| config.export_dir.clone());
            list_submissions(ctx, search.as_deref(), export.then_some(dir.as_path())).await
        }
    }
}

fn list_subjects(semester: i64) -> Outcome {
    let subjects = subjects_for(semester);
    if subjects.is_empty() {
        return Outcome::lines(vec![format!(
            "No subjects configured for semester {}",
            semester
        )]);
    }
    let mut lines = vec![format!("Semester {}:", semester)];
    lines.extend(
        subjects
            .iter()
            .enumerate()
            .map(|(i, subject)| format!("  {}. {}", i + 1, subject)),
    );
    Outcome::lines(lines)
}

async fn submit_form<T, S>(
    ctx: &AppContext<T, S>,
    form_path: &std::path::Path,
    receipt_path: &std::path::Path,
    verified: bool,
) -> Result<Outcome>
where
    T: Transport,
    S: KeyValueStore,
{
    let mut controller = RegistrationController::mount(ctx)
        .map_err(|route| redirect_error("Please sign in first", route))?;

    let draft = load_form_draft(form_path).await?;
    controller.apply_draft(&draft)?;
    if verified {
        controller.set_data_verified(true)?;
    }
    controller.attach_receipt(FeeReceipt::load(receipt_path).await?)?;

    info!(
        "📝 提交表单: 学期 {} / {} 门课程",
        controller.form().semester,
        controller.form().subjects.len()
    );

    if let Some(route) = controller.submit(ctx).await {
        return Err(redirect_error("Session expired, please sign in again", route));
    }
    if let Some(error) = controller.error.take() {
        bail!(error);
    }
    if controller.state() != FormState::Submitted {
        bail!("Submission failed");
    }

    Ok(Outcome::lines(vec![SUBMITTED_MESSAGE.to_string()]))
}

async fn list_submissions<T, S>(
    ctx: &AppContext<T, S>,
    search: Option<&str>,
    export_dir: Option<&std::path::Path>,
) -> Result<Outcome>
where
    T: Transport,
    S: KeyValueStore,
{
    let mut listing = AdminListing::new();
    if let Some(route) = listing.mount(ctx).await {
        return Err(redirect_error("Please sign in as an admin", route));
    }
    if let Some(error) = listing.error.take() {
        bail!(error);
    }

    if let Some(term) = search {
        listing.set_search(term);
    }
    log_listing_stats(listing.total(), listing.filtered().len(), listing.search_term());

    let mut lines = vec![
        format!("Total Submissions: {}", listing.total()),
        String::new(),
        listing.render_table(),
    ];

    if let Some(dir) = export_dir {
        let export = listing.export_csv(chrono::Utc::now().date_naive());
        let path = export.write_to(dir).await?;
        lines.push(String::new());
        lines.push(format!("Exported {} rows to {}", export.rows, path.display()));
    }

    Ok(Outcome::lines(lines))
}
