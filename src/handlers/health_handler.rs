use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let has_api_key = state.config.has_api_key();

    let response = serde_json::json!({
        "status": if has_api_key { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "anthropic_api_key": if has_api_key { "ok" } else { "missing" },
            "dataset_rows": state.session_service.dataset_len(),
            "personas": state.persona_service.len()
        }
    });

    if has_api_key {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config, services::llm_client::MockChatCompletionClient,
        test_utils::test_helpers::assert_success_status,
    };
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    fn state(config: Config) -> web::Data<AppState> {
        web::Data::new(
            AppState::with_client(config, Arc::new(MockChatCompletionClient::new())).unwrap(),
        )
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
    }

    #[actix_web::test]
    async fn test_ready_reports_catalog_sizes() {
        let app = test::init_service(
            App::new()
                .app_data(state(Config::test_config()))
                .service(health_check_ready),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ready");
        assert_eq!(body["dependencies"]["personas"], 9);
        assert_eq!(body["dependencies"]["dataset_rows"], 0);
    }

    #[actix_web::test]
    async fn test_not_ready_without_api_key() {
        let mut config = Config::test_config();
        config.anthropic_api_key = None;

        let app = test::init_service(
            App::new()
                .app_data(state(config))
                .service(health_check_ready)
                .service(health_check_live),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::get().uri("/health/live").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
    }
}
