//! Report generation

mod report;

pub use report::{format_duration, render_report};
