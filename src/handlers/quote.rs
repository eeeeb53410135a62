use actix_web::{web, HttpRequest, HttpResponse, Result};
use crate::models::{ErrorResponse, QuoteQuery};
use crate::services::quote_service::{LookupError, QuoteService};

/// 获取股票报价
///
/// GET /quote_api?symbol=AAPL
pub async fn get_quote(
    service: web::Data<QuoteService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let query = QuoteQuery::parse(req.query_string());
    let symbol = match query.symbol.as_deref() {
        Some(symbol) if !symbol.trim().is_empty() => symbol,
        _ => return Ok(HttpResponse::BadRequest().json(ErrorResponse::missing_symbol())),
    };

    log::info!("查询报价: {} ({:?})", symbol, service.mode());

    match service.lookup(symbol).await {
        Ok(quote) => Ok(HttpResponse::Ok().json(quote)),
        Err(LookupError::NotFound { symbol, .. }) => {
            Ok(HttpResponse::NotFound().json(ErrorResponse::not_found(&symbol)))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/quote_api", web::get().to(get_quote));
}
