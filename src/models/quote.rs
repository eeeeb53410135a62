//! 报价数据模型
//!
//! 定义报价查询相关的数据结构

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单只股票的最新报价
///
/// 序列化为扁平结构: `{"name": ..., "price": ..., "symbol": ...}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Quote {
    /// 显示名称（longName > shortName > 命中的代码）
    pub name: String,
    /// 最新收盘价，保留两位小数，恒大于 0
    pub price: f64,
    /// 实际命中的代码（可能带有交易所后缀）
    pub symbol: String,
}

/// 代码解析模式
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// 只查询用户给出的代码
    Strict,
    /// 依次尝试原始代码及各交易所后缀
    #[default]
    Fuzzy,
}

/// 报价查询参数
#[derive(Debug, Default, PartialEq)]
pub struct QuoteQuery {
    /// 股票代码
    pub symbol: Option<String>,
}

impl QuoteQuery {
    /// 解析查询字符串，参数重复时取第一个值
    pub fn parse(query_string: &str) -> Self {
        let symbol = url::form_urlencoded::parse(query_string.as_bytes())
            .find(|(key, _)| key == "symbol")
            .map(|(_, value)| value.into_owned());
        Self { symbol }
    }
}

/// 历史数据窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryPeriod {
    OneDay,
    FiveDays,
}

impl HistoryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryPeriod::OneDay => "1d",
            HistoryPeriod::FiveDays => "5d",
        }
    }
}

/// 日K线（只保留收盘价）
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    /// 复权收盘价
    pub close: f64,
}

/// 一次历史数据请求的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    /// 按时间升序的日K线，可能为空
    pub bars: Vec<PriceBar>,
    /// 数据源随K线一并返回的描述信息
    pub metadata: Option<TickerMetadata>,
}

/// 证券描述信息
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerMetadata {
    pub long_name: Option<String>,
    pub short_name: Option<String>,
}

impl TickerMetadata {
    /// 按 longName > shortName > fallback 的顺序确定显示名称，空字符串视为缺失
    pub fn display_name(&self, fallback: &str) -> String {
        [&self.long_name, &self.short_name]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_preference() {
        let meta = TickerMetadata {
            long_name: Some("Apple Inc.".to_string()),
            short_name: Some("Apple".to_string()),
        };
        assert_eq!(meta.display_name("AAPL"), "Apple Inc.");

        let meta = TickerMetadata {
            long_name: Some(String::new()),
            short_name: Some("Apple".to_string()),
        };
        assert_eq!(meta.display_name("AAPL"), "Apple");

        assert_eq!(TickerMetadata::default().display_name("D05.SI"), "D05.SI");
    }

    #[test]
    fn test_quote_serializes_flat() {
        let quote = Quote {
            name: "Apple Inc.".to_string(),
            price: 150.0,
            symbol: "AAPL".to_string(),
        };
        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Apple Inc.", "price": 150.0, "symbol": "AAPL"})
        );
    }

    #[test]
    fn test_query_takes_first_symbol() {
        assert_eq!(QuoteQuery::parse("symbol=AAPL&symbol=MSFT").symbol.as_deref(), Some("AAPL"));
        assert_eq!(QuoteQuery::parse("symbol=BRK%2DB").symbol.as_deref(), Some("BRK-B"));
        assert_eq!(QuoteQuery::parse("symbol=%zz").symbol.as_deref(), Some("%zz"));
        assert_eq!(QuoteQuery::parse("ticker=AAPL"), QuoteQuery::default());
        assert_eq!(QuoteQuery::parse(""), QuoteQuery::default());
    }

    #[test]
    fn test_lookup_mode_serde() {
        assert_eq!(serde_json::to_string(&LookupMode::Strict).unwrap(), "\"strict\"");
        let mode: LookupMode = serde_json::from_str("\"fuzzy\"").unwrap();
        assert_eq!(mode, LookupMode::Fuzzy);
    }
}
