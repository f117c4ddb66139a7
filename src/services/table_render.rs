//! 提交记录表格渲染（终端输出）

use crate::models::submission::Submission;

/// 表格列
pub const TABLE_COLUMNS: [&str; 8] = [
    "Student ID",
    "Name",
    "USN",
    "Semester",
    "Subjects",
    "Email",
    "Scheme",
    "Submitted At",
];

/// 无记录时的占位行
pub const EMPTY_PLACEHOLDER: &str = "No submissions found";

/// 单行的各列文本
pub fn table_cells(submission: &Submission) -> [String; 8] {
    [
        submission.student_id().unwrap_or("N/A").to_string(),
        submission.full_name(),
        submission.usn.clone(),
        submission.semester.clone(),
        submission.subjects.join(", "),
        submission.email.clone(),
        submission.scheme.clone(),
        submission
            .submitted_at_local()
            .unwrap_or_else(|| "N/A".to_string()),
    ]
}

/// 渲染为对齐的文本表格
pub fn render_table(submissions: &[Submission]) -> String {
    let rows: Vec<[String; 8]> = submissions.iter().map(table_cells).collect();

    let mut widths = TABLE_COLUMNS.map(|column| column.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let header = render_line(TABLE_COLUMNS.to_vec());
    let separator = "-".repeat(header.chars().count());

    let mut lines = vec![header, separator];
    if rows.is_empty() {
        lines.push(EMPTY_PLACEHOLDER.to_string());
    } else {
        lines.extend(
            rows.iter()
                .map(|row| render_line(row.iter().map(String::as_str).collect())),
        );
    }
    lines.join("\n")
}
