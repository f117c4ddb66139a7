//! # UniReg Client
//!
//! 大学学期注册系统的客户端：学生注册 / 登录、提交学期注册表单，
//! 管理员查看、搜索并导出全部提交。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有网络与本地存储，只暴露能力
//! - `Transport` - 发送请求的抽象，`HttpTransport` 为 reqwest 实现
//! - `SessionStore` - 会话 token 的持久化
//!
//! ### ② 客户端层（Clients）
//! - `UniRegClient` - 登录、注册、提交表单、拉取提交列表
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 无副作用的纯函数
//! - 提交过滤、CSV 导出、表格渲染
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 每个页面一个视图，持有页面状态
//! - `LoginView` / `SignupView` / `RegistrationController` / `AdminListing`
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/` - 命令行解析与命令调度
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::UniRegClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{HttpTransport, Transport};
pub use models::{RegistrationForm, Role, Route, Submission};
pub use orchestrator::{App, Cli, Command};
pub use workflow::{AdminListing, AppContext, LoginView, RegistrationController, SignupView};
