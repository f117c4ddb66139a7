pub mod credentials;
pub mod form;
pub mod loaders;
pub mod route;
pub mod subject;
pub mod submission;

pub use credentials::{LoginRequest, RegisterRequest, Role, TokenResponse};
pub use form::{Address, FeeReceipt, FormDraft, RegistrationForm};
pub use loaders::load_form_draft;
pub use route::Route;
pub use subject::{subjects_for, SEMESTERS};
pub use submission::{Submission, SubmissionList, SubmissionUser};
