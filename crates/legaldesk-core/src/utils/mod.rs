//! Utility functions for string formatting and matching.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{
    contains_ignore_case, format_date, format_file_size, format_money, truncate_string,
};
