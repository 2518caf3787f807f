//! Output formatting module
//!
//! Console banners, the pass/fail summary and the JSON run report.

mod formatter;
mod report;

pub use formatter::{format_banner, summarize};
pub use report::RunReport;
