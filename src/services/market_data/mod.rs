//! 行情数据源
//!
//! 报价服务只依赖 [`MarketDataClient`] trait，具体实现见 [`yahoo`]

mod yahoo;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{History, HistoryPeriod, TickerMetadata};

pub use yahoo::YahooClient;

/// 行情数据源错误
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// 连接失败、超时等传输层错误
    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP 状态码异常: {0}")]
    HttpStatus(u16),
    /// 数据源返回的业务错误（如代码不存在）
    #[error("数据源错误 {code}: {description}")]
    Upstream { code: String, description: String },
    #[error("解析响应失败: {0}")]
    Parse(String),
}

/// 行情数据客户端
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// 获取指定窗口内的日K线，收盘价均为有限值
    async fn get_history(
        &self,
        symbol: &str,
        period: HistoryPeriod,
    ) -> Result<History, MarketDataError>;

    /// 获取证券名称等描述信息，历史数据未附带时使用
    async fn get_metadata(&self, symbol: &str) -> Result<TickerMetadata, MarketDataError>;
}
