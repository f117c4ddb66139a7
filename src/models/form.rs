//! 学期注册表单

use crate::error::{AppError, AppResult, ValidationError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// 默认方案（scheme）
pub const DEFAULT_SCHEME: &str = "2024";

/// 默认学期
pub const DEFAULT_SEMESTER: u8 = 1;

fn usn_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{10}$").expect("static regex"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("static regex"))
}

fn pincode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{6}$").expect("static regex"))
}

/// 字段为 `null` 时按缺省值处理
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 地址
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub street: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pincode: String,
}

impl Address {
    /// 单行展示：`street, city, state - pincode`
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} - {}",
            self.street, self.city, self.state, self.pincode
        )
    }
}

/// 缴费凭证附件
#[derive(Clone, PartialEq, Eq)]
pub struct FeeReceipt {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FeeReceipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeeReceipt")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FeeReceipt {
    /// 根据文件名推断类型并创建附件
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// 从磁盘读取附件
    pub async fn load(path: &Path) -> AppResult<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        if bytes.is_empty() {
            return Err(ValidationError::EmptyReceipt.into());
        }
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "receipt".to_string());
        Ok(Self::new(file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

/// 学期注册表单
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub usn: String,
    pub email: String,
    pub phone: String,
    pub scheme: String,
    pub semester: u8,
    pub subjects: Vec<String>,
    pub address: Address,
    #[serde(skip)]
    pub fee_receipt: Option<FeeReceipt>,
    pub data_verified: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            usn: String::new(),
            email: String::new(),
            phone: String::new(),
            scheme: DEFAULT_SCHEME.to_string(),
            semester: DEFAULT_SEMESTER,
            subjects: Vec::new(),
            address: Address::default(),
            fee_receipt: None,
            data_verified: false,
        }
    }
}

impl RegistrationForm {
    /// 提交前校验
    ///
    /// 依次检查必填项、字段格式、课程、附件与确认勾选；
    /// 任一不通过即返回对应错误。
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("First name", &self.first_name),
            ("Last name", &self.last_name),
            ("USN", &self.usn),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Scheme", &self.scheme),
            ("Street", &self.address.street),
            ("City", &self.address.city),
            ("State", &self.address.state),
            ("Pincode", &self.address.pincode),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::Required { field });
            }
        }

        if !usn_pattern().is_match(self.usn.trim()) {
            return Err(ValidationError::InvalidUsn);
        }
        if !email_pattern().is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail);
        }
        if !phone_pattern().is_match(self.phone.trim()) {
            return Err(ValidationError::InvalidPhone);
        }
        if !pincode_pattern().is_match(self.address.pincode.trim()) {
            return Err(ValidationError::InvalidPincode);
        }

        if self.subjects.is_empty() {
            return Err(ValidationError::NoSubjects);
        }
        if self.fee_receipt.is_none() {
            return Err(ValidationError::MissingReceipt);
        }
        if !self.data_verified {
            return Err(ValidationError::NotVerified);
        }
        Ok(())
    }

    /// 规范化后的副本：USN 大写、邮箱小写
    pub fn normalized(&self) -> Self {
        Self {
            usn: self.usn.trim().to_uppercase(),
            email: self.email.trim().to_lowercase(),
            ..self.clone()
        }
    }
}

/// 表单草稿（从 TOML 文件加载）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormDraft {
    pub first_name: String,
    pub last_name: String,
    pub usn: String,
    pub email: String,
    pub phone: String,
    pub scheme: Option<String>,
    pub semester: Option<u8>,
    pub subjects: Vec<String>,
    pub address: Address,
    pub data_verified: bool,
}
