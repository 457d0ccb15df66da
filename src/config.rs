use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::services::document_service::UpdatePolicy;

pub const DEFAULT_SYMBOLS: [&str; 4] = ["GOOGL", "SOFI", "QQQ", "RKLB"];
pub const DEFAULT_START_MARKER: &str = "<!-- STOCK_TABLE_START -->";
pub const DEFAULT_END_MARKER: &str = "<!-- STOCK_TABLE_END -->";

/// 一次运行的全部参数，构建后不再修改
#[derive(Debug, Clone)]
pub struct Config {
    pub symbols: Vec<String>,
    pub baseline: NaiveDate,
    pub readme_path: String,
    pub timezone: Tz,
    pub policy: UpdatePolicy,
    pub start_marker: String,
    pub end_marker: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            baseline: NaiveDate::from_ymd_opt(2025, 6, 1).expect("2025-06-01 is a valid date"),
            readme_path: "README.md".to_string(),
            timezone: chrono_tz::Asia::Taipei,
            policy: UpdatePolicy::MarkedRegion,
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: DEFAULT_END_MARKER.to_string(),
        }
    }

    pub fn with_symbols<S: AsRef<str>>(mut self, symbols: &[S]) -> Self {
        self.symbols = symbols.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_baseline(mut self, baseline: NaiveDate) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn with_readme_path(mut self, path: &str) -> Self {
        self.readme_path = path.to_string();
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_markers(mut self, start: &str, end: &str) -> Self {
        self.start_marker = start.to_string();
        self.end_marker = end.to_string();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.symbols, vec!["GOOGL", "SOFI", "QQQ", "RKLB"]);
        assert_eq!(config.baseline, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(config.readme_path, "README.md");
        assert_eq!(config.timezone, chrono_tz::Asia::Taipei);
        assert_eq!(config.policy, UpdatePolicy::MarkedRegion);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::new()
            .with_symbols(&["AAA", "BBB"])
            .with_baseline(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap())
            .with_policy(UpdatePolicy::Overwrite)
            .with_markers("<!-- a -->", "<!-- b -->");

        assert_eq!(config.symbols, vec!["AAA", "BBB"]);
        assert_eq!(config.baseline.to_string(), "2025-06-09");
        assert_eq!(config.policy, UpdatePolicy::Overwrite);
        assert_eq!(config.start_marker, "<!-- a -->");
        assert_eq!(config.end_marker, "<!-- b -->");
    }
}
