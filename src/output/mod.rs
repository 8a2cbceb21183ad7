//! Output formatters for bikeshare reports

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::{FormatConfig, RawPager, TextFormatter};
