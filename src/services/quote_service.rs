//! 报价查询服务
//!
//! 依次尝试候选代码，返回第一个拿到有效价格的报价。
//! 单个候选的任何失败（无数据、价格非正、数据源错误）都只记为未命中，
//! 全部候选用尽后统一返回 [`LookupError::NotFound`]

use std::sync::Arc;

use thiserror::Error;

use crate::models::{HistoryPeriod, LookupMode, Quote};
use crate::services::market_data::{MarketDataClient, MarketDataError};
use crate::services::resolver;

/// 报价查询错误
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("未找到 {symbol} 的行情（尝试了 {attempted} 个代码）")]
    NotFound { symbol: String, attempted: usize },
}

/// 单个候选未命中的原因，仅用于日志
#[derive(Debug)]
pub enum MissReason {
    /// 1 日和 5 日窗口均无数据
    NoData,
    /// 最新收盘价四舍五入后不为正
    NonPositivePrice(f64),
    /// 数据源报错
    Client(MarketDataError),
}

/// 单个候选的结果
#[derive(Debug)]
pub enum CandidateOutcome {
    Hit(Quote),
    Miss(MissReason),
}

impl From<MarketDataError> for CandidateOutcome {
    fn from(err: MarketDataError) -> Self {
        CandidateOutcome::Miss(MissReason::Client(err))
    }
}

/// 保留两位小数
///
/// 按浮点数的精确值舍入，恰好处于中点时取偶数（2.675 -> 2.67，150.125 -> 150.12）
pub fn round_price(price: f64) -> f64 {
    format!("{:.2}", price).parse().unwrap_or(price)
}

/// 报价查询服务
pub struct QuoteService {
    /// 行情数据源
    client: Arc<dyn MarketDataClient>,
    /// 代码解析模式
    mode: LookupMode,
}

impl QuoteService {
    pub fn new(client: Arc<dyn MarketDataClient>, mode: LookupMode) -> Self {
        Self { client, mode }
    }

    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    /// 查询报价
    ///
    /// 候选代码严格按顺序串行尝试，命中即停止
    pub async fn lookup(&self, raw_symbol: &str) -> Result<Quote, LookupError> {
        let candidates = resolver::resolve(raw_symbol, self.mode);

        for candidate in &candidates {
            match self.try_candidate(candidate).await {
                CandidateOutcome::Hit(quote) => {
                    log::info!("{} 命中 {}: {} @ {}", raw_symbol, quote.symbol, quote.name, quote.price);
                    return Ok(quote);
                }
                CandidateOutcome::Miss(reason) => {
                    log::debug!("候选代码 {} 未命中: {:?}", candidate, reason);
                }
            }
        }

        log::info!("{} 的 {} 个候选代码均未命中", raw_symbol, candidates.len());
        Err(LookupError::NotFound {
            symbol: raw_symbol.to_string(),
            attempted: candidates.len(),
        })
    }

    /// 尝试单个候选代码
    async fn try_candidate(&self, candidate: &str) -> CandidateOutcome {
        let mut history = match self.client.get_history(candidate, HistoryPeriod::OneDay).await {
            Ok(history) => history,
            Err(e) => return e.into(),
        };

        // 非交易日 1 日窗口可能为空，放宽到 5 日再试一次
        if history.bars.is_empty() {
            history = match self.client.get_history(candidate, HistoryPeriod::FiveDays).await {
                Ok(history) => history,
                Err(e) => return e.into(),
            };
        }

        let Some(latest) = history.bars.last() else {
            return CandidateOutcome::Miss(MissReason::NoData);
        };

        let price = round_price(latest.close);
        if price <= 0.0 {
            return CandidateOutcome::Miss(MissReason::NonPositivePrice(price));
        }

        // 优先使用产生该价格的那次响应里的描述信息
        let metadata = match history.metadata {
            Some(metadata) => metadata,
            None => match self.client.get_metadata(candidate).await {
                Ok(metadata) => metadata,
                Err(e) => return e.into(),
            },
        };

        CandidateOutcome::Hit(Quote {
            name: metadata.display_name(candidate),
            price,
            symbol: candidate.to_string(),
        })
    }
}
