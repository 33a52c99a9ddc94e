use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, HttpResponse};

use super::error::ApiError;
use super::handlers::{import, misc, payables, receipts, reports, sales};
use super::middleware::auth::create_auth_middleware;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health checks
        .route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check))
        .route("/metrics", web::get().to(metrics_endpoint))
        // Superfície pública
        .route("/manifest.webmanifest", web::get().to(misc::manifest))
        .route("/api/chat-tutorial", web::post().to(misc::chat_tutorial))
        // API v1
        .service(
            web::scope("/api/v1")
                .wrap(create_auth_middleware())
                .wrap(Logger::default())
                .wrap(
                    Cors::default()
                        .allowed_origin_fn(|origin, _req_head| {
                            origin.as_bytes().starts_with(b"http://localhost")
                                || origin.as_bytes().starts_with(b"https://")
                        })
                        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
                        .allowed_headers(vec!["Content-Type", "Authorization"])
                        .max_age(3600),
                )
                // storeId precisa ser numérico; o resto é 400
                .app_data(web::PathConfig::default().error_handler(|err, _req| {
                    ApiError::bad_request(format!("parâmetro de rota inválido: {}", err)).into()
                }))
                .route("/templates", web::get().to(receipts::list_templates))
                .service(
                    web::scope("/stores/{store_id}")
                        // Vendas
                        .route("/vendas", web::post().to(sales::create_sale))
                        .route("/vendas/{venda_id}", web::get().to(sales::get_sale))
                        .route("/vendas/{venda_id}/status", web::patch().to(sales::update_status))
                        .route(
                            "/vendas/{venda_id}/desconto",
                            web::patch().to(sales::update_discount),
                        )
                        .route("/vendas/{venda_id}/itens", web::post().to(sales::add_item))
                        .route("/itens/{item_id}", web::delete().to(sales::delete_item))
                        .route(
                            "/vendas/{venda_id}/pagamentos",
                            web::post().to(sales::add_payment),
                        )
                        .route(
                            "/pagamentos/{payment_id}",
                            web::delete().to(sales::delete_payment),
                        )
                        .route("/pagamentos/impresso", web::post().to(sales::mark_printed))
                        // Carnê
                        .route(
                            "/vendas/{venda_id}/financiamento",
                            web::post().to(sales::save_financing),
                        )
                        .route(
                            "/vendas/{venda_id}/financiamento",
                            web::delete().to(sales::delete_financing),
                        )
                        .route(
                            "/vendas/{venda_id}/financiamento/receber",
                            web::post().to(sales::receive_installment),
                        )
                        // Recibos e Pix
                        .route(
                            "/vendas/{venda_id}/recibo/pdf",
                            web::post().to(receipts::receipt_pdf),
                        )
                        .route(
                            "/vendas/{venda_id}/recibo/preview",
                            web::post().to(receipts::receipt_preview),
                        )
                        .route("/vendas/{venda_id}/pix", web::get().to(receipts::pix_charge))
                        // Contas a pagar
                        .route("/contas", web::get().to(payables::list_bills))
                        .route("/contas", web::post().to(payables::save_bill))
                        .route("/contas/pagar", web::post().to(payables::pay_bill))
                        .route("/caixa/abrir", web::post().to(payables::open_drawer))
                        .route("/contas/{bill_id}", web::delete().to(payables::delete_bill))
                        // Importação e relatórios
                        .route("/import/lentes", web::post().to(import::import_lenses))
                        .route("/relatorios/vendas", web::get().to(reports::sales_report)),
                ),
        );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

async fn readiness_check(state: web::Data<crate::api::ApiState>) -> HttpResponse {
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&state.db).await.is_ok();

    if db_healthy {
        HttpResponse::Ok().json(serde_json::json!({
            "status": "ready",
            "checks": { "database": "ok" }
        }))
    } else {
        HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "not_ready",
            "checks": { "database": "failed" }
        }))
    }
}

async fn metrics_endpoint() -> HttpResponse {
    use prometheus::{Encoder, TextEncoder};

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiState;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    macro_rules! test_app {
        () => {{
            let state = web::Data::new(ApiState::for_tests().await);
            test::init_service(
                App::new()
                    .app_data(state.clone())
                    .configure(configure_routes),
            )
            .await
        }};
    }

    fn authed(req: test::TestRequest) -> test::TestRequest {
        req.insert_header(("Authorization", "Bearer token-dev"))
    }

    #[actix_web::test]
    async fn health_and_manifest_are_public() {
        let app = test_app!();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request())
            .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/manifest.webmanifest").to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["display"], "standalone");
    }

    #[actix_web::test]
    async fn non_numeric_store_id_is_bad_request() {
        let app = test_app!();

        let req = authed(test::TestRequest::get().uri("/api/v1/stores/abc/contas")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = authed(test::TestRequest::get().uri("/api/v1/stores/1/contas")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn api_requires_bearer_token() {
        let app = test_app!();

        let req = test::TestRequest::get().uri("/api/v1/stores/1/contas").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn sale_flow_and_receipt_preview() {
        let app = test_app!();

        let req = authed(test::TestRequest::post().uri("/api/v1/stores/1/vendas"))
            .set_json(json!({ "customer_id": null, "employee_id": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let sale: serde_json::Value = test::read_body_json(resp).await;
        let venda_id = sale["id"].as_i64().unwrap();

        let req = authed(test::TestRequest::post()
            .uri(&format!("/api/v1/stores/1/vendas/{}/itens", venda_id)))
        .set_json(json!({
            "item_tipo": "Lente",
            "descricao": "Lente CR-39",
            "quantidade": 2.0,
            "valor_unitario": 100.0
        }))
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = authed(test::TestRequest::post()
            .uri(&format!("/api/v1/stores/1/vendas/{}/pagamentos", venda_id)))
        .set_json(json!({
            "forma_pagamento": "Pix",
            "valor_pago": "200,00",
            "data_pagamento": "2026-03-10"
        }))
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let payment: serde_json::Value = test::read_body_json(resp).await;
        let payment_id = payment["id"].as_i64().unwrap();

        let req = authed(test::TestRequest::get()
            .uri(&format!("/api/v1/stores/1/vendas/{}", venda_id)))
        .to_request();
        let bundle: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(bundle["venda"]["valor_total"], 200.0);
        assert_eq!(bundle["venda"]["valor_restante"], 0.0);

        let req = authed(test::TestRequest::post()
            .uri(&format!("/api/v1/stores/1/vendas/{}/recibo/preview", venda_id)))
        .set_json(json!({ "payment_ids": [payment_id], "template_id": "receipt_thermal" }))
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let preview: serde_json::Value = test::read_body_json(resp).await;
        assert!(preview["markup"].as_str().unwrap().contains("RECIBO DE PAGAMENTO"));

        // recibo sem pagamento selecionado é erro de validação
        let req = authed(test::TestRequest::post()
            .uri(&format!("/api/v1/stores/1/vendas/{}/recibo/preview", venda_id)))
        .set_json(json!({ "payment_ids": [] }))
        .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn chat_tutorial_accepts_store_scoped_questions() {
        let app = test_app!();

        // sem arquivo de contexto a resposta degrada com HTTP 200
        let req = test::TestRequest::post()
            .uri("/api/chat-tutorial")
            .set_json(json!({ "message": "Como abro o caixa?", "storeId": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["reply"].as_str().unwrap().contains("contexto"));
    }

    #[actix_web::test]
    async fn lens_import_reports_counters() {
        let app = test_app!();

        let csv = "nome_completo;marca;linha;material;tipo_lente;preco_venda;preco_custo\n\
                   Lente CR-39 1.56;Acme;Conforto;Resina;Visão simples;150.0;60.0\n\
                   LENTE CR-39 1.56;Acme;Conforto;Resina;Visão simples;180.0;60.0\n";

        let req = authed(test::TestRequest::post().uri("/api/v1/stores/1/import/lentes"))
            .set_payload(csv)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let summary: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(summary["processed"], 2);
        assert_eq!(summary["created"], 1);
        assert_eq!(summary["updated"], 1);
    }
}
