//! Yahoo Finance 行情接口实现
//!
//! 对接 https://query1.finance.yahoo.com/v8/finance/chart/<symbol>
//! K线和证券名称都来自同一个 chart 接口

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{MarketDataClient, MarketDataError};
use crate::config::ApiConfig;
use crate::models::{History, HistoryPeriod, PriceBar, TickerMetadata};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ==================== chart 接口响应结构 ====================

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    long_name: Option<String>,
    short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
    #[serde(default)]
    adjclose: Vec<AdjCloseSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseSeries {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

// ==================== 客户端 ====================

/// Yahoo Finance chart 接口客户端
pub struct YahooClient {
    /// HTTP 客户端
    client: Client,
    /// 接口根地址
    base_url: Url,
}

impl YahooClient {
    /// 按配置创建客户端
    pub fn new(config: &ApiConfig) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| MarketDataError::Parse(format!("无效的接口地址 {}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(MarketDataError::Parse(format!("无效的接口地址 {}", config.base_url)));
        }

        Ok(Self { client, base_url })
    }

    /// 拼接 chart 接口地址，代码作为路径段编码
    fn chart_url(&self, symbol: &str, period: HistoryPeriod) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v8", "finance", "chart", symbol]);
        }
        url.query_pairs_mut()
            .append_pair("range", period.as_str())
            .append_pair("interval", "1d");
        url
    }

    /// 请求 chart 接口并取出第一条结果
    async fn fetch_chart(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<ChartResult, MarketDataError> {
        let url = self.chart_url(symbol, period);
        log::debug!("📡 请求 Yahoo chart: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        parse_chart(status.as_u16(), &text)
    }
}

#[async_trait]
impl MarketDataClient for YahooClient {
    async fn get_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<History, MarketDataError> {
        let chart = self.fetch_chart(symbol, period).await?;
        Ok(history_from_chart(chart))
    }

    async fn get_metadata(&self, symbol: &str) -> Result<TickerMetadata, MarketDataError> {
        let chart = self.fetch_chart(symbol, HistoryPeriod::FiveDays).await?;
        Ok(metadata_from_chart(chart))
    }
}

// ==================== 响应解析 ====================

/// 解析 chart 响应
///
/// 数据源在 404 等状态下仍会返回带 error 字段的 JSON，优先采用其中的错误信息
fn parse_chart(status: u16, text: &str) -> Result<ChartResult, MarketDataError> {
    let envelope = match serde_json::from_str::<ChartEnvelope>(text) {
        Ok(envelope) => envelope,
        Err(_) if !(200..300).contains(&status) => return Err(MarketDataError::HttpStatus(status)),
        Err(e) => return Err(MarketDataError::Parse(e.to_string())),
    };

    if let Some(error) = envelope.chart.error {
        return Err(MarketDataError::Upstream {
            code: error.code,
            description: error.description,
        });
    }
    if !(200..300).contains(&status) {
        return Err(MarketDataError::HttpStatus(status));
    }

    envelope
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| MarketDataError::Parse("chart 结果为空".to_string()))
}

fn metadata_from_chart(chart: ChartResult) -> TickerMetadata {
    TickerMetadata {
        long_name: chart.meta.long_name,
        short_name: chart.meta.short_name,
    }
}

/// K线和描述信息取自同一次响应
fn history_from_chart(chart: ChartResult) -> History {
    let bars = extract_bars(&chart);
    History {
        bars,
        metadata: Some(metadata_from_chart(chart)),
    }
}

/// 提取复权收盘价序列，缺少 adjclose 时退回 close，丢弃空值
fn extract_bars(chart: &ChartResult) -> Vec<PriceBar> {
    let adjusted = chart
        .indicators
        .adjclose
        .first()
        .map(|s| &s.adjclose)
        .filter(|closes| closes.len() == chart.timestamp.len());
    let closes = match adjusted {
        Some(closes) => closes,
        None => match chart.indicators.quote.first() {
            Some(series) => &series.close,
            None => return Vec::new(),
        },
    };

    chart
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(ts, close)| {
            let close = (*close).filter(|c| c.is_finite())?;
            let timestamp = DateTime::from_timestamp(*ts, 0)?;
            Some(PriceBar { timestamp, close })
        })
        .collect()
}
