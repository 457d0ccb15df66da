use crate::config::Config;
use crate::models::quote::{Outcome, Report, SymbolResult, SymbolSeries};
use crate::scrapers::base::PriceSource;
use crate::services::normalize::{self, SeriesResult};
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

/// 行情汇总服务，负责抓取并计算每个代码的涨跌幅
pub struct QuoteService {
    config: Config,
    source: Arc<dyn PriceSource + Send + Sync>,
}

impl QuoteService {
    pub fn new(config: Config, source: Arc<dyn PriceSource + Send + Sync>) -> Self {
        Self { config, source }
    }

    /// Builds a report with exactly one row per configured symbol, in order.
    /// Never fails: batch and per-symbol failures become `Error` rows.
    pub async fn fetch(&self) -> Report {
        let symbols = &self.config.symbols;
        let baseline = self.config.baseline;
        info!(
            "Fetching {} symbols from {} since {}",
            symbols.len(),
            self.source.source_name(),
            baseline
        );

        let normalized = match self.source.fetch_history(symbols, &baseline).await {
            Ok(raw) => normalize::normalize(symbols, raw, &baseline),
            Err(e) => {
                warn!("Bulk fetch failed: {}", e);
                // 整批失败时每一行共享同一个原因
                let reason = e.to_string();
                return self.build_report(
                    symbols
                        .iter()
                        .map(|s| SymbolResult::new(s, Outcome::Error { reason: reason.clone() }))
                        .collect(),
                );
            }
        };

        let mut results = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let series = normalized
                .get(symbol)
                .cloned()
                .unwrap_or_else(|| Err(format!("no result for {}", symbol)));
            let outcome = classify(series);

            match &outcome {
                Outcome::Ok { percent_change, .. } => {
                    info!("{}: {:+.2}%", symbol, percent_change);
                }
                Outcome::NoData => warn!("No data for {}", symbol),
                Outcome::Error { reason } => warn!("Error fetching {}: {}", symbol, reason),
            }

            results.push(SymbolResult::new(symbol, outcome));
        }

        let ok = results.iter().filter(|r| r.is_ok()).count();
        info!("Summarized {}/{} symbols", ok, results.len());

        self.build_report(results)
    }

    fn build_report(&self, results: Vec<SymbolResult>) -> Report {
        let now = Utc::now().with_timezone(&self.config.timezone);
        Report::new(now, self.config.baseline, results)
    }
}

fn classify(series: SeriesResult) -> Outcome {
    match series {
        Ok(series) => summarize(&series),
        Err(reason) => Outcome::Error { reason },
    }
}

/// Reduces a series to start price, current price and percent change.
pub fn summarize(series: &SymbolSeries) -> Outcome {
    let (start, current) = match (series.first(), series.latest()) {
        (Some(start), Some(current)) => (start.close, current.close),
        _ => return Outcome::NoData,
    };

    if start <= 0.0 {
        return Outcome::Error {
            reason: format!("non-positive start price {}", start),
        };
    }

    Outcome::Ok {
        start_price: start,
        current_price: current,
        percent_change: (current - start) / start * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{Result, TrackerError};
    use crate::models::quote::PricePoint;
    use crate::scrapers::base::RawHistory;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::collections::HashMap;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn series(prices: &[f64]) -> SymbolSeries {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint { date: date(9 + i as u32), close })
            .collect();
        SymbolSeries::new("AAA", points)
    }

    #[test]
    fn test_summarize_percent_change() {
        let cases = [(100.0, 110.0), (50.0, 25.0), (3.3, 3.3), (0.01, 1234.5)];
        for (start, current) in cases {
            match summarize(&series(&[start, 42.0, current])) {
                Outcome::Ok { start_price, current_price, percent_change } => {
                    assert_eq!(start_price, start);
                    assert_eq!(current_price, current);
                    let expected = (current - start) / start * 100.0;
                    assert!((percent_change - expected).abs() < 1e-9);
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
    }

    #[test]
    fn test_summarize_single_point_is_flat() {
        match summarize(&series(&[100.0])) {
            Outcome::Ok { percent_change, .. } => assert_eq!(percent_change, 0.0),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_summarize_empty_and_zero_start_are_not_ok() {
        assert_eq!(summarize(&series(&[])), Outcome::NoData);
        assert!(matches!(summarize(&series(&[0.0, 10.0])), Outcome::Error { .. }));
        assert!(matches!(summarize(&series(&[-1.0, 10.0])), Outcome::Error { .. }));
    }

    struct FailingSource;

    #[async_trait]
    impl PriceSource for FailingSource {
        fn source_name(&self) -> &'static str {
            "failing"
        }

        async fn fetch_history(&self, _symbols: &[String], _start: &NaiveDate) -> Result<RawHistory> {
            Err(TrackerError::ProviderError("network unreachable".to_string()))
        }
    }

    struct FixedSource(RawHistory);

    #[async_trait]
    impl PriceSource for FixedSource {
        fn source_name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_history(&self, _symbols: &[String], _start: &NaiveDate) -> Result<RawHistory> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_bulk_failure_marks_every_row() {
        let config = Config::new().with_symbols(&["AAA", "BBB", "CCC"]);
        let service = QuoteService::new(config, Arc::new(FailingSource));

        let report = service.fetch().await;
        let symbols: Vec<&str> = report.results().iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAA", "BBB", "CCC"]);
        for result in report.results() {
            assert_eq!(
                result.outcome,
                Outcome::Error { reason: "Provider error: network unreachable".to_string() }
            );
        }
    }

    #[tokio::test]
    async fn test_per_symbol_isolation() {
        let frame = json!({
            "chart": {
                "result": [{
                    "timestamp": [1_749_475_800_i64, 1_749_562_200_i64],
                    "indicators": {"adjclose": [{"adjclose": [100.0, 120.0]}]}
                }],
                "error": null
            }
        });
        let mut frames = HashMap::new();
        frames.insert("BBB".to_string(), Err("HTTP status 500".to_string()));
        frames.insert("CCC".to_string(), Ok(frame));

        let config = Config::new()
            .with_symbols(&["AAA", "BBB", "CCC"])
            .with_baseline(date(9));
        let service = QuoteService::new(config, Arc::new(FixedSource(RawHistory::Multi(frames))));

        let report = service.fetch().await;
        let results = report.results();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].outcome, Outcome::NoData);
        assert_eq!(results[1].outcome, Outcome::Error { reason: "HTTP status 500".to_string() });
        assert!(results[2].is_ok());
        assert_eq!(report.generated_at().timezone(), chrono_tz::Asia::Taipei);
    }

    #[tokio::test]
    async fn test_repeated_symbol_gets_identical_rows() {
        let frame = json!({
            "chart": {
                "result": [{
                    "timestamp": [1_749_475_800_i64, 1_749_562_200_i64],
                    "indicators": {"adjclose": [{"adjclose": [100.0, 110.0]}]}
                }],
                "error": null
            }
        });
        let mut frames = HashMap::new();
        frames.insert("AAA".to_string(), Ok(frame));

        let config = Config::new()
            .with_symbols(&["AAA", "BBB", "AAA"])
            .with_baseline(date(9));
        let service = QuoteService::new(config, Arc::new(FixedSource(RawHistory::Multi(frames))));

        let report = service.fetch().await;
        let results = report.results();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert_eq!(results[1].outcome, Outcome::NoData);
        assert_eq!(results[0], results[2]);
    }
}
