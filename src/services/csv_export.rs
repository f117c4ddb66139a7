//! CSV 导出
//!
//! 只导出当前过滤后的记录，不访问后端。

use crate::error::{AppError, AppResult};
use crate::models::submission::Submission;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// 固定列顺序
pub const CSV_HEADER: [&str; 9] = [
    "Student ID",
    "USN",
    "Name",
    "Email",
    "Phone",
    "Scheme",
    "Semester",
    "Subjects",
    "Address",
];

/// 导出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
    /// 数据行数（不含表头）
    pub rows: usize,
}

impl CsvExport {
    /// 写入目录，返回完整路径
    pub async fn write_to(&self, dir: &Path) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, self.content.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
        info!("💾 已导出 {} 行到 {}", self.rows, path.display());
        Ok(path)
    }
}

/// 导出文件名：`student_submissions_YYYY-MM-DD.csv`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("student_submissions_{}.csv", date.format("%Y-%m-%d"))
}

/// 将记录序列化为 CSV
pub fn export_submissions(submissions: &[Submission], date: NaiveDate) -> CsvExport {
    let mut lines = Vec::with_capacity(submissions.len() + 1);
    lines.push(CSV_HEADER.join(","));
    lines.extend(submissions.iter().map(csv_row));

    CsvExport {
        file_name: export_file_name(date),
        content: lines.join("\n"),
        rows: submissions.len(),
    }
}

fn csv_row(submission: &Submission) -> String {
    let address = submission
        .address
        .as_ref()
        .map(|address| address.one_line())
        .unwrap_or_else(|| ", ,  - ".to_string());

    [
        escape_field(submission.student_id().unwrap_or_default()),
        escape_field(&submission.usn),
        escape_field(&submission.full_name()),
        escape_field(&submission.email),
        escape_field(&submission.phone),
        escape_field(&submission.scheme),
        escape_field(&submission.semester),
        quote_field(&submission.subjects.join("; ")),
        quote_field(&address),
    ]
    .join(",")
}

// 含分隔符、引号或换行时才加引号
fn escape_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        quote_field(value)
    } else {
        value.to_string()
    }
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
