use crate::errors::Result;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

/// 单个交易日的复权收盘价
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// 基准日之后按日期升序排列的价格序列
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SymbolSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl SymbolSeries {
    pub fn new(symbol: &str, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.to_string(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First entry at-or-after the baseline.
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok {
        start_price: f64,
        current_price: f64,
        percent_change: f64,
    },
    NoData,
    Error {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolResult {
    pub symbol: String,
    pub outcome: Outcome,
}

impl SymbolResult {
    pub fn new(symbol: &str, outcome: Outcome) -> Self {
        Self {
            symbol: symbol.to_string(),
            outcome,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok { .. })
    }
}

/// 一次抓取的结果，生成后不可变
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    generated_at: DateTime<Tz>,
    baseline: NaiveDate,
    results: Vec<SymbolResult>,
}

impl Report {
    pub fn new(generated_at: DateTime<Tz>, baseline: NaiveDate, results: Vec<SymbolResult>) -> Self {
        Self {
            generated_at,
            baseline,
            results,
        }
    }

    pub fn generated_at(&self) -> &DateTime<Tz> {
        &self.generated_at
    }

    pub fn baseline(&self) -> NaiveDate {
        self.baseline
    }

    pub fn results(&self) -> &[SymbolResult] {
        &self.results
    }

    /// 以 JSON 导出报告，供调试日志使用
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::Value;

    #[test]
    fn test_report_to_json() {
        let generated_at = chrono_tz::Asia::Taipei
            .with_ymd_and_hms(2025, 7, 1, 9, 30, 0)
            .unwrap();
        let report = Report::new(
            generated_at,
            NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
            vec![
                SymbolResult::new(
                    "AAA",
                    Outcome::Ok { start_price: 100.0, current_price: 110.0, percent_change: 10.0 },
                ),
                SymbolResult::new("BBB", Outcome::NoData),
                SymbolResult::new("CCC", Outcome::Error { reason: "boom".to_string() }),
            ],
        );

        let json: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["baseline"], "2025-06-09");
        assert!(json["generated_at"].as_str().unwrap().starts_with("2025-07-01T09:30:00"));
        assert_eq!(json["results"][0]["symbol"], "AAA");
        assert_eq!(json["results"][0]["outcome"]["status"], "ok");
        assert_eq!(json["results"][0]["outcome"]["percent_change"], 10.0);
        assert_eq!(json["results"][1]["outcome"]["status"], "no_data");
        assert_eq!(json["results"][2]["outcome"]["reason"], "boom");
    }
}
