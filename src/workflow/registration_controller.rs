//! 学期注册表单控制器
//!
//! 两个状态：`Editing` 与 `Submitted`。提交成功后进入 `Submitted`，
//! 只能通过 [`RegistrationController::submit_another`] 回到空白表单。

use crate::error::{AppError, ValidationError};
use crate::infrastructure::{KeyValueStore, Transport};
use crate::models::credentials::Role;
use crate::models::form::{FeeReceipt, FormDraft, RegistrationForm};
use crate::models::route::Route;
use crate::models::subject::{is_offered, subjects_for};
use crate::workflow::auth_view::logout;
use crate::workflow::context::AppContext;
use tracing::{debug, info, warn};

/// 表单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitted,
}

/// 学期注册表单控制器
#[derive(Debug, Clone)]
pub struct RegistrationController {
    state: FormState,
    form: RegistrationForm,
    available_subjects: &'static [&'static str],
    token: String,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl RegistrationController {
    /// 挂载视图：读取一次 token，无 token 时重定向到学生登录页
    pub fn mount<T, S>(ctx: &AppContext<T, S>) -> Result<Self, Route>
    where
        T: Transport,
        S: KeyValueStore,
    {
        let token = ctx.token().ok_or(Route::StudentLogin)?;
        let form = RegistrationForm::default();
        Ok(Self {
            state: FormState::Editing,
            available_subjects: subjects_for(i64::from(form.semester)),
            form,
            token,
            error: None,
            is_loading: false,
        })
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// 当前学期可选的课程
    pub fn available_subjects(&self) -> &'static [&'static str] {
        self.available_subjects
    }

    fn ensure_editing(&self) -> Result<(), ValidationError> {
        match self.state {
            FormState::Editing => Ok(()),
            FormState::Submitted => Err(ValidationError::AlreadySubmitted),
        }
    }

    /// 按字段路径更新表单
    ///
    /// 地址字段使用 `address.street` 形式的点路径。
    pub fn set_field(&mut self, path: &str, value: &str) -> Result<(), ValidationError> {
        self.ensure_editing()?;

        let slot = match path {
            "firstName" => &mut self.form.first_name,
            "lastName" => &mut self.form.last_name,
            "usn" => &mut self.form.usn,
            "email" => &mut self.form.email,
            "phone" => &mut self.form.phone,
            "scheme" => &mut self.form.scheme,
            "address.street" => &mut self.form.address.street,
            "address.city" => &mut self.form.address.city,
            "address.state" => &mut self.form.address.state,
            "address.pincode" => &mut self.form.address.pincode,
            "semester" => {
                let semester = value.trim().parse::<u8>().map_err(|_| {
                    ValidationError::InvalidSemester {
                        value: value.to_string(),
                    }
                })?;
                return self.set_semester(semester);
            }
            _ => {
                return Err(ValidationError::UnknownField {
                    path: path.to_string(),
                })
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    /// 切换学期：重新查询课程目录并清空已选课程
    pub fn set_semester(&mut self, semester: u8) -> Result<(), ValidationError> {
        self.ensure_editing()?;
        self.form.semester = semester;
        self.available_subjects = subjects_for(i64::from(semester));
        self.form.subjects.clear();
        debug!(
            "学期切换为 {}，可选课程 {} 门",
            semester,
            self.available_subjects.len()
        );
        Ok(())
    }

    /// 勾选 / 取消勾选课程；已选列表始终按目录顺序排列
    pub fn toggle_subject(&mut self, subject: &str) -> Result<(), ValidationError> {
        self.ensure_editing()?;
        if !is_offered(self.form.semester, subject) {
            return Err(ValidationError::UnknownSubject {
                subject: subject.to_string(),
                semester: self.form.semester,
            });
        }

        let mut selected = std::mem::take(&mut self.form.subjects);
        if let Some(index) = selected.iter().position(|s| s == subject) {
            selected.remove(index);
        } else {
            selected.push(subject.to_string());
        }

        self.form.subjects = self
            .available_subjects
            .iter()
            .filter(|candidate| selected.iter().any(|s| s == *candidate))
            .map(|candidate| candidate.to_string())
            .collect();
        Ok(())
    }

    /// 是否已选中某课程
    pub fn is_selected(&self, subject: &str) -> bool {
        self.form.subjects.iter().any(|s| s == subject)
    }

    pub fn attach_receipt(&mut self, receipt: FeeReceipt) -> Result<(), ValidationError> {
        self.ensure_editing()?;
        if receipt.bytes.is_empty() {
            return Err(ValidationError::EmptyReceipt);
        }
        self.form.fee_receipt = Some(receipt);
        Ok(())
    }

    pub fn set_data_verified(&mut self, verified: bool) -> Result<(), ValidationError> {
        self.ensure_editing()?;
        self.form.data_verified = verified;
        Ok(())
    }

    /// 按草稿逐字段填写表单
    ///
    /// 学期先于课程设置，保证切换学期时的清空不会吞掉草稿中的课程。
    pub fn apply_draft(&mut self, draft: &FormDraft) -> Result<(), ValidationError> {
        let fields = [
            ("firstName", &draft.first_name),
            ("lastName", &draft.last_name),
            ("usn", &draft.usn),
            ("email", &draft.email),
            ("phone", &draft.phone),
            ("address.street", &draft.address.street),
            ("address.city", &draft.address.city),
            ("address.state", &draft.address.state),
            ("address.pincode", &draft.address.pincode),
        ];
        for (path, value) in fields {
            self.set_field(path, value)?;
        }
        if let Some(scheme) = &draft.scheme {
            self.set_field("scheme", scheme)?;
        }
        if let Some(semester) = draft.semester {
            self.set_semester(semester)?;
        }
        for subject in &draft.subjects {
            if !self.is_selected(subject) {
                self.toggle_subject(subject)?;
            }
        }
        self.set_data_verified(draft.data_verified)
    }

    /// 提交表单
    ///
    /// 先同步校验，不通过时设置 `error` 且不发请求。
    /// token 被后端拒绝时清除会话并返回学生登录页。
    pub async fn submit<T, S>(&mut self, ctx: &AppContext<T, S>) -> Option<Route>
    where
        T: Transport,
        S: KeyValueStore,
    {
        if self.is_loading {
            return None;
        }
        self.error = None;

        if let Err(e) = self.ensure_editing().and_then(|_| self.form.validate()) {
            debug!("表单校验未通过: {}", e);
            self.error = Some(e.to_string());
            return None;
        }

        self.is_loading = true;
        let result = ctx.client.submit_form(&self.token, &self.form).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                info!("✓ 学期注册表单已提交 (USN {})", self.form.normalized().usn);
                self.state = FormState::Submitted;
                None
            }
            Err(AppError::Auth(e)) => {
                warn!("⚠️ 提交时认证失败: {}", e);
                ctx.drop_session();
                Some(Route::StudentLogin)
            }
            Err(e) => {
                warn!("⚠️ 表单提交失败: {}", e);
                self.error = Some(e.user_message("Submission failed"));
                None
            }
        }
    }

    /// "再提交一份"：回到空白表单并重新计算课程列表
    pub fn submit_another(&mut self) {
        self.form = RegistrationForm::default();
        self.available_subjects = subjects_for(i64::from(self.form.semester));
        self.state = FormState::Editing;
        self.error = None;
    }

    /// 退出登录
    pub fn logout<T, S>(&self, ctx: &AppContext<T, S>) -> Route
    where
        T: Transport,
        S: KeyValueStore,
    {
        logout(ctx, Role::Student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use crate::infrastructure::MemoryStore;
    use crate::infrastructure::{ApiRequest, ApiResponse};

    struct NoTransport;

    impl Transport for NoTransport {
        async fn send(&self, _request: ApiRequest) -> AppResult<ApiResponse> {
            unreachable!("controller tests never reach the network")
        }
    }

    fn mounted() -> RegistrationController {
        let ctx = AppContext::new(NoTransport, MemoryStore::new());
        ctx.session.set("token-1").unwrap();
        RegistrationController::mount(&ctx).unwrap()
    }

    #[test]
    fn test_mount_without_token_redirects() {
        let ctx = AppContext::new(NoTransport, MemoryStore::new());
        assert_eq!(
            RegistrationController::mount(&ctx).unwrap_err(),
            Route::StudentLogin
        );
    }

    #[test]
    fn test_mount_defaults() {
        let controller = mounted();
        assert_eq!(controller.state(), FormState::Editing);
        assert_eq!(controller.form().semester, 1);
        assert_eq!(controller.form().scheme, "2024");
        assert_eq!(controller.available_subjects().len(), 8);
    }

    #[test]
    fn test_dotted_paths_update_address() {
        let mut controller = mounted();
        controller.set_field("address.city", "Mysuru").unwrap();
        controller.set_field("firstName", "Asha").unwrap();
        assert_eq!(controller.form().address.city, "Mysuru");
        assert_eq!(controller.form().first_name, "Asha");
        assert_eq!(
            controller.set_field("address.country", "IN"),
            Err(ValidationError::UnknownField {
                path: "address.country".into()
            })
        );
    }

    #[test]
    fn test_semester_change_clears_subjects() {
        let mut controller = mounted();
        controller.toggle_subject("Applied Physics").unwrap();
        assert_eq!(controller.form().subjects.len(), 1);

        controller.set_field("semester", "3").unwrap();
        assert!(controller.form().subjects.is_empty());
        assert_eq!(controller.available_subjects()[0], "Mathematics");

        controller.toggle_subject("Operating System").unwrap();
        controller.set_semester(3).unwrap();
        assert!(controller.form().subjects.is_empty());

        controller.set_semester(12).unwrap();
        assert!(controller.available_subjects().is_empty());
    }

    #[test]
    fn test_invalid_semester_value() {
        let mut controller = mounted();
        assert!(matches!(
            controller.set_field("semester", "third"),
            Err(ValidationError::InvalidSemester { .. })
        ));
        assert_eq!(controller.form().semester, 1);
    }

    #[test]
    fn test_toggle_keeps_catalog_order() {
        let mut controller = mounted();
        controller.toggle_subject("Indian Constitution").unwrap();
        controller.toggle_subject("Applied Physics").unwrap();
        controller.toggle_subject("Essential Mathematics 1").unwrap();
        assert_eq!(
            controller.form().subjects,
            ["Essential Mathematics 1", "Applied Physics", "Indian Constitution"]
        );

        controller.toggle_subject("Applied Physics").unwrap();
        assert_eq!(
            controller.form().subjects,
            ["Essential Mathematics 1", "Indian Constitution"]
        );
    }

    #[test]
    fn test_toggle_rejects_other_semester_subject() {
        let mut controller = mounted();
        assert!(matches!(
            controller.toggle_subject("Operating System"),
            Err(ValidationError::UnknownSubject { semester: 1, .. })
        ));
    }

    #[test]
    fn test_apply_draft_selects_subjects_after_semester() {
        let mut controller = mounted();
        let draft = FormDraft {
            first_name: "Asha".into(),
            semester: Some(3),
            subjects: vec!["Operating System".into(), "Mathematics".into()],
            data_verified: true,
            ..FormDraft::default()
        };
        controller.apply_draft(&draft).unwrap();
        assert_eq!(controller.form().semester, 3);
        assert_eq!(controller.form().subjects, ["Mathematics", "Operating System"]);
        assert!(controller.form().data_verified);
    }

    #[test]
    fn test_submit_another_resets() {
        let mut controller = mounted();
        controller.set_semester(5).unwrap();
        controller.set_field("usn", "1MS22CS001").unwrap();
        controller.state = FormState::Submitted;
        assert_eq!(
            controller.set_field("usn", "x"),
            Err(ValidationError::AlreadySubmitted)
        );

        controller.submit_another();
        assert_eq!(controller.state(), FormState::Editing);
        assert_eq!(controller.form(), &RegistrationForm::default());
        assert_eq!(controller.available_subjects(), subjects_for(1));
    }
}
