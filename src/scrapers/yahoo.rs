use crate::errors::{Result, TrackerError};
use crate::scrapers::base::{PriceSource, RawHistory};
use crate::util;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Yahoo Finance 日线数据抓取器
pub struct YahooScraper {
    client: Client,
    base_url: String,
}

impl YahooScraper {
    /// 创建新的 Yahoo 数据抓取器
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(TrackerError::RequestError)?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// 获取单个代码的 chart 数据帧
    async fn fetch_frame(&self, symbol: &str, period1: i64, period2: i64) -> Result<Value> {
        debug!("获取 {} 的历史K线数据", symbol);

        let response = self.client
            .get(format!("{}/{}", self.base_url, symbol))
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "div,split".to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // 未知代码时 Yahoo 返回 404，但 body 里仍带有 chart.error，交给归一化处理
        match serde_json::from_str::<Value>(&text) {
            Ok(json) => Ok(json),
            Err(_) if !status.is_success() => Err(TrackerError::ProviderError(format!(
                "HTTP status {} for {}", status, symbol
            ))),
            Err(e) => Err(TrackerError::JsonError(e)),
        }
    }
}

/// Transport-level failure: the request never got an HTTP answer.
fn is_transport_failure(err: &TrackerError) -> bool {
    matches!(err, TrackerError::RequestError(e) if e.is_connect() || e.is_timeout())
}

#[async_trait]
impl PriceSource for YahooScraper {
    fn source_name(&self) -> &'static str {
        "Yahoo Finance"
    }

    async fn fetch_history(&self, symbols: &[String], start: &NaiveDate) -> Result<RawHistory> {
        let period1 = util::date_to_timestamp(start);
        let period2 = Utc::now().timestamp();
        info!("获取 {} 支代码自 {} 起的复权收盘价", symbols.len(), start);

        let mut frames = HashMap::new();
        let mut transport_failures = 0;
        let mut last_failure = None;

        for symbol in symbols {
            match self.fetch_frame(symbol, period1, period2).await {
                Ok(frame) => {
                    frames.insert(symbol.clone(), Ok(frame));
                }
                Err(e) => {
                    warn!("Failed to fetch history for {}: {}", symbol, e);
                    if is_transport_failure(&e) {
                        transport_failures += 1;
                    }
                    let reason = e.to_string();
                    last_failure = Some(reason.clone());
                    frames.insert(symbol.clone(), Err(reason));
                }
            }
        }

        if !symbols.is_empty() && transport_failures == symbols.len() {
            return Err(TrackerError::ProviderError(format!(
                "{} unreachable: {}",
                self.source_name(),
                last_failure.unwrap_or_default()
            )));
        }

        // 单个代码时直接返回数据帧，与批量查询的形状不同
        if let [symbol] = symbols {
            if let Some(Ok(frame)) = frames.get(symbol) {
                return Ok(RawHistory::Single(frame.clone()));
            }
        }

        Ok(RawHistory::Multi(frames))
    }
}
