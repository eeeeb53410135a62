//! 股票报价后端服务
//!
//! 提供单一 RESTful 接口：根据股票代码返回最新收盘价和公司名称
//! 数据来源：Yahoo Finance

mod config;     // 配置加载
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use std::sync::Arc;

use actix_web::{web, App, HttpServer, middleware::Logger};
use env_logger::Env;

use crate::config::AppConfig;
use crate::services::market_data::YahooClient;
use crate::services::quote_service::QuoteService;

/// 应用程序入口
///
/// 启动 HTTP 服务器，默认监听 127.0.0.1:5000
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let (config, notes) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件中的日志级别
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    for note in &notes {
        log::info!("{}", note);
    }

    let client = YahooClient::new(&config.api).map_err(|e| {
        log::error!("创建行情客户端失败: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let service = web::Data::new(QuoteService::new(Arc::new(client), config.lookup.mode));

    log::info!(
        "启动报价服务，监听 {}，解析模式 {:?}",
        config.bind_addr(),
        config.lookup.mode
    );

    // 创建并启动 HTTP 服务器
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(service.clone())
            .configure(handlers::config)  // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.bind_addr())?.run().await
}
