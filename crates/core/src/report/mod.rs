//! Plain-text and structured period reports for export and email digests.

pub mod formatter;
pub mod types;

pub use formatter::ReportFormatter;
pub use types::{FormattedReport, ReportBudgetLine, ReportCategoryLine, ReportData};
