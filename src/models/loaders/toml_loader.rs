use crate::error::{AppError, AppResult, FileError};
use crate::models::form::FormDraft;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载表单草稿
pub async fn load_form_draft(toml_file_path: &Path) -> AppResult<FormDraft> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(toml_file_path.display().to_string(), e))?;

    let draft = parse_form_draft(&content).map_err(|source| FileError::TomlParseFailed {
        path: toml_file_path.display().to_string(),
        source,
    })?;

    tracing::debug!(
        "已加载表单草稿: {} (学期 {:?}, {} 门课程)",
        toml_file_path.display(),
        draft.semester,
        draft.subjects.len()
    );

    Ok(draft)
}

/// 解析表单草稿内容
pub fn parse_form_draft(content: &str) -> Result<FormDraft, toml::de::Error> {
    toml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAFT: &str = r#"
first_name = "Asha"
last_name = "Rao"
usn = "1ms22cs001"
email = "Asha@Example.com"
phone = "9876543210"
semester = 3
subjects = ["Operating System", "Mathematics"]
data_verified = true

[address]
street = "12 MG Road"
city = "Bengaluru"
state = "Karnataka"
pincode = "560001"
"#;

    #[test]
    fn test_parse_full_draft() {
        let draft = parse_form_draft(DRAFT).unwrap();
        assert_eq!(draft.first_name, "Asha");
        assert_eq!(draft.semester, Some(3));
        assert_eq!(draft.scheme, None);
        assert_eq!(draft.subjects.len(), 2);
        assert_eq!(draft.address.pincode, "560001");
        assert!(draft.data_verified);
    }

    #[test]
    fn test_parse_partial_draft() {
        let draft = parse_form_draft("usn = \"x\"").unwrap();
        assert_eq!(draft.usn, "x");
        assert!(draft.subjects.is_empty());
        assert!(!draft.data_verified);
    }

    #[test]
    fn test_load_missing_file() {
        let result = tokio_test::block_on(load_form_draft(Path::new("/nonexistent/draft.toml")));
        assert!(matches!(result, Err(AppError::File(FileError::NotFound { .. }))));
    }
}
