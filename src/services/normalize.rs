//! Converts whatever shape the provider returned into one series per symbol.
//!
//! A chart frame looks like
//! `{"chart": {"result": [{"meta": {..}, "timestamp": [..], "indicators": {..}}], "error": null}}`.
//! The adjusted close lives in `indicators.adjclose[0].adjclose`; when the
//! provider omits it, `indicators.quote[0].close` is used instead. A frame with
//! no `timestamp` key means no trading days in range.

use crate::models::quote::{PricePoint, SymbolSeries};
use crate::scrapers::base::RawHistory;
use crate::util;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

pub type SeriesResult = std::result::Result<SymbolSeries, String>;

/// Maps every requested symbol to its series or a failure reason.
pub fn normalize(symbols: &[String], raw: RawHistory, baseline: &NaiveDate) -> HashMap<String, SeriesResult> {
    let mut normalized = HashMap::new();

    match raw {
        RawHistory::Single(frame) => {
            if symbols.len() == 1 {
                let symbol = &symbols[0];
                normalized.insert(symbol.clone(), parse_frame(symbol, &frame, baseline));
            } else {
                let reason = format!(
                    "ambiguous single-series result for {} requested symbols",
                    symbols.len()
                );
                for symbol in symbols {
                    normalized.insert(symbol.clone(), Err(reason.clone()));
                }
            }
        }
        RawHistory::Multi(frames) => {
            for symbol in symbols {
                // 同一代码可能重复出现，按引用查找
                let series = match frames.get(symbol) {
                    Some(Ok(frame)) => parse_frame(symbol, frame, baseline),
                    Some(Err(reason)) => Err(reason.clone()),
                    None => Ok(SymbolSeries::new(symbol, Vec::new())),
                };
                normalized.insert(symbol.clone(), series);
            }
        }
    }

    normalized
}

/// Parses one chart frame into a date-ordered series starting at `baseline`.
pub fn parse_frame(symbol: &str, frame: &Value, baseline: &NaiveDate) -> SeriesResult {
    let chart = frame
        .get("chart")
        .ok_or_else(|| "missing chart object".to_string())?;

    if let Some(error) = chart.get("error").filter(|e| !e.is_null()) {
        let description = error
            .get("description")
            .and_then(|d| d.as_str())
            .map(|d| d.to_string())
            .unwrap_or_else(|| error.to_string());
        return Err(description);
    }

    let results = chart
        .get("result")
        .and_then(|r| r.as_array())
        .ok_or_else(|| "missing chart result".to_string())?;

    let result = match results.as_slice() {
        [] => return Ok(SymbolSeries::new(symbol, Vec::new())),
        [single] => single,
        many => return Err(format!("expected 1 series, got {}", many.len())),
    };

    let timestamps = match result.get("timestamp").and_then(|t| t.as_array()) {
        Some(ts) => ts,
        None => return Ok(SymbolSeries::new(symbol, Vec::new())),
    };

    let prices = price_column(result)?;
    if prices.len() != timestamps.len() {
        return Err(format!(
            "{} timestamps but {} prices",
            timestamps.len(),
            prices.len()
        ));
    }

    let gmt_offset = result
        .get("meta")
        .and_then(|m| m.get("gmtoffset"))
        .and_then(|o| o.as_i64())
        .unwrap_or_default();

    let mut points = Vec::with_capacity(prices.len());
    for (ts, price) in timestamps.iter().zip(prices) {
        let close = match price.as_f64() {
            Some(p) if p.is_finite() => p,
            _ => continue,
        };
        let ts = ts
            .as_i64()
            .ok_or_else(|| format!("invalid timestamp {}", ts))?;
        let date = util::timestamp_to_local_date(ts, gmt_offset).map_err(|e| e.to_string())?;
        if date >= *baseline {
            points.push(PricePoint { date, close });
        }
    }

    points.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(SymbolSeries::new(symbol, points))
}

fn price_column(result: &Value) -> std::result::Result<&Vec<Value>, String> {
    let indicators = result
        .get("indicators")
        .ok_or_else(|| "missing indicators".to_string())?;

    let adjusted = indicators
        .get("adjclose")
        .and_then(|a| a.get(0))
        .and_then(|a| a.get("adjclose"))
        .and_then(|a| a.as_array());

    adjusted
        .or_else(|| {
            indicators
                .get("quote")
                .and_then(|q| q.get(0))
                .and_then(|q| q.get("close"))
                .and_then(|c| c.as_array())
        })
        .ok_or_else(|| "no price column in result".to_string())
}
