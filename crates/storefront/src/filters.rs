//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_current_year_is_plausible() {
        use chrono::Datelike;
        let year = chrono::Utc::now().year();
        assert!(year >= 2026);
    }
}
