//! 错误响应模型
//!
//! 错误统一返回 `{"error": "..."}`，成功时直接返回 [`Quote`](super::Quote)

use serde::{Deserialize, Serialize};

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    /// 错误信息
    pub error: String,
}

impl ErrorResponse {
    /// 缺少 symbol 参数
    pub fn missing_symbol() -> Self {
        Self {
            error: "Missing 'symbol' parameter".to_string(),
        }
    }

    /// 所有候选代码均未命中
    ///
    /// # 参数
    /// - symbol: 用户原始输入
    pub fn not_found(symbol: &str) -> Self {
        Self {
            error: format!(
                "Could not find stock for '{}'. \
                 Please provide an exact ticker symbol. If it's an international stock, \
                 include its exchange suffix. Examples: \
                 'TATAMOTORS.NS' (India - NSE), 'D05.SI' (Singapore - SGX), \
                 'OR.PA' (France - Euronext Paris), 'HSBA.L' (UK - LSE), 'SHOP.TO' (Canada - TSX).",
                symbol
            ),
        }
    }
}
