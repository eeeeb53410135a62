//! 业务逻辑服务模块
//!
//! 封装代码解析、行情获取和报价查询逻辑

pub mod market_data;    // 行情数据源
pub mod quote_service;  // 报价查询服务
pub mod resolver;       // 候选代码生成
