use chrono::{DateTime, NaiveDate};
use crate::errors::{Result, TrackerError};

// 日期转换工具
/// Converts a provider timestamp to the exchange-local trading date.
pub fn timestamp_to_local_date(timestamp: i64, gmt_offset: i64) -> Result<NaiveDate> {
    timestamp
        .checked_add(gmt_offset)
        .and_then(|local| DateTime::from_timestamp(local, 0))
        .map(|dt| dt.date_naive())
        .ok_or_else(|| TrackerError::DataError(format!("Invalid timestamp: {}", timestamp)))
}

/// Seconds since the epoch for midnight UTC of `date`.
pub fn date_to_timestamp(date: &NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

// 价格格式化工具
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// 涨跌方向，按两位小数精度判断
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn of(change: f64) -> Self {
        let rounded = (change * 100.0).round();
        if rounded > 0.0 {
            Direction::Up
        } else if rounded < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            Direction::Up => "🟢",
            Direction::Down => "🔴",
            Direction::Flat => "⚪",
        }
    }
}

/// 格式化涨跌幅，如 `🟢 +10.00%`、`🔴 -3.25%`、`⚪ 0.00%`
pub fn format_change(change: f64) -> String {
    let direction = Direction::of(change);
    match direction {
        Direction::Up => format!("{} +{:.2}%", direction.marker(), change),
        Direction::Down => format!("{} {:.2}%", direction.marker(), change),
        // 避免输出 -0.00%
        Direction::Flat => format!("{} {:.2}%", direction.marker(), 0.0),
    }
}
