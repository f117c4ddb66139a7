//! 提交记录搜索
//!
//! 纯函数：每次搜索词或基础列表变化时重新计算。

use crate::models::submission::Submission;

/// 判断单条记录是否匹配搜索词（不区分大小写）
///
/// 学号、USN、邮箱、`名 姓` 任一包含搜索词即匹配。
pub fn matches(submission: &Submission, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |field: &str| field.to_lowercase().contains(&needle);

    submission.student_id().is_some_and(contains)
        || contains(&submission.usn)
        || contains(&submission.email)
        || contains(&submission.full_name())
}

/// 过滤提交列表，保持原有顺序；空搜索词返回全部
pub fn filter_submissions(submissions: &[Submission], term: &str) -> Vec<Submission> {
    submissions
        .iter()
        .filter(|submission| matches(submission, term))
        .cloned()
        .collect()
}
