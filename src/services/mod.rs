//! 业务能力层
//!
//! 纯函数能力：搜索过滤、CSV 导出、表格渲染。不持有状态，不发请求。

pub mod csv_export;
pub mod submission_filter;
pub mod table_render;

pub use csv_export::{export_submissions, CsvExport, CSV_HEADER};
pub use submission_filter::filter_submissions;
pub use table_render::{render_table, EMPTY_PLACEHOLDER};
