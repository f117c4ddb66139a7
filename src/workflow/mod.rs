//! 流程层（视图）
//!
//! 每个视图持有自己的界面状态，通过注入的 [`AppContext`] 访问后端与会话。
//! 操作返回导航目标（`Route`），由调用方决定如何跳转。

pub mod admin_listing;
pub mod auth_view;
pub mod context;
pub mod registration_controller;

pub use admin_listing::AdminListing;
pub use auth_view::{logout, LoginView, SignupView, REGISTRATION_SUCCESS};
pub use context::{AppContext, HttpContext};
pub use registration_controller::{FormState, RegistrationController};
