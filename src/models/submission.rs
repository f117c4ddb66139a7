use crate::models::form::{null_as_default, Address};
use chrono::{DateTime, Local, NaiveDate};
use serde::Deserialize;
use tracing::warn;

/// 提交者账号信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionUser {
    pub student_id: Option<String>,
}

/// 后端返回的一条表单提交（只读）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Submission {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub user: Option<SubmissionUser>,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub usn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scheme: String,
    #[serde(deserialize_with = "deserialize_semester")]
    pub semester: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subjects: Vec<String>,
    pub address: Option<Address>,
    /// 后端原样返回的时间文本，展示时再解析
    pub submitted_at: Option<String>,
}

impl Submission {
    /// 学号（可能缺失）
    pub fn student_id(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.student_id.as_deref())
    }

    /// `名 姓`
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 本地时间格式的提交时间
    ///
    /// RFC 3339 时间转换为本地时间；纯日期原样保留；无法解析时返回原文。
    pub fn submitted_at_local(&self) -> Option<String> {
        let raw = self.submitted_at.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Some(
                at.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            );
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.format("%Y-%m-%d").to_string());
        }
        Some(raw.to_string())
    }
}

/// `GET /form/submissions` 的响应体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionList {
    #[serde(default)]
    pub data: serde_json::Value,
}

impl SubmissionList {
    /// `data` 不是数组时视为空列表；无法解析的单条记录跳过
    pub fn into_submissions(self) -> Vec<Submission> {
        let serde_json::Value::Array(items) = self.data else {
            return Vec::new();
        };
        items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(submission) => Some(submission),
                Err(e) => {
                    warn!("⚠️ 跳过第 {} 条无法解析的提交记录: {}", index + 1, e);
                    None
                }
            })
            .collect()
    }
}

// 学期可能是数字也可能是字符串
fn deserialize_semester<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct SemesterVisitor;

    impl<'de> Visitor<'de> for SemesterVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer representing a semester")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(SemesterVisitor)
}
