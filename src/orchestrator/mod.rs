//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 解析命令行、组装配置与上下文，把每条命令交给对应视图执行。
//!
//! ### `cli` - 命令行定义
//! - clap 派生的参数与子命令
//! - 命令行参数覆盖环境变量配置
//!
//! ### `app` - 应用生命周期
//! - 校验配置、创建 HTTP 上下文
//! - 挂载视图并驱动其操作
//! - 把结果整理为输出行与跳转目标
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (命令)
//!     ↓
//! workflow (视图：登录 / 注册 / 表单 / 管理列表)
//!     ↓
//! services (纯函数：过滤 / CSV / 表格)  clients (UniRegClient)
//!     ↓
//! infrastructure (Transport / 会话存储)
//! ```

pub mod app;
pub mod cli;

pub use app::{execute, App, Outcome, SUBMITTED_MESSAGE};
pub use cli::{Cli, Command};
