use actix_web::{web, HttpResponse, Result};
use crate::services::quote_service::QuoteService;

pub async fn health_check(service: web::Data<QuoteService>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "mode": service.mode(),
    })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{test, App};

    use crate::models::LookupMode;
    use crate::services::market_data::stub::StubClient;

    #[actix_web::test]
    async fn test_health_reports_mode() {
        let service = web::Data::new(QuoteService::new(Arc::new(StubClient::empty()), LookupMode::Strict));
        let app = test::init_service(App::new().app_data(service).configure(config)).await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, serde_json::json!({"status": "ok", "mode": "strict"}));
    }
}
