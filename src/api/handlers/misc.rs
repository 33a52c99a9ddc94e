use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::{ApiResult, ApiState};

/// Descritor de instalação do app (PWA).
pub async fn manifest() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/manifest+json")
        .json(serde_json::json!({
            "name": "Gestão Ótica Pro",
            "short_name": "Ótica Pro",
            "description": "Sistema de Gestão para Óticas",
            "start_url": "/",
            "display": "standalone",
            "background_color": "#f3f4f6",
            "theme_color": "#2563eb",
            "orientation": "portrait",
            "icons": [
                {
                    "src": "/favicon.ico",
                    "sizes": "any",
                    "type": "image/x-icon"
                }
            ]
        }))
}

#[derive(Debug, Deserialize)]
pub struct TutorialQuestion {
    pub message: String,
    #[serde(rename = "storeId", default)]
    pub store_id: Option<i64>,
}

const QUOTA_REPLY: &str =
    "A IA está processando muitas informações agora (limite de cota). Aguarde 10 segundos e tente novamente.";
const FAILURE_REPLY: &str = "Desculpe, tive um problema ao ler o código agora.";

/// Chat de suporte: responde dúvidas de uso com base no arquivo de
/// contexto do sistema. Erros de cota degradam para uma resposta amigável
/// com HTTP 200, para o front não quebrar.
pub async fn chat_tutorial(
    state: web::Data<ApiState>,
    body: web::Json<TutorialQuestion>,
) -> ApiResult<HttpResponse> {
    tracing::info!(store_id = ?body.store_id, "pergunta recebida no chat de suporte");

    let context = match std::fs::read_to_string(&state.config.tutorial_context_path) {
        Ok(content) => content,
        Err(_) => {
            return Ok(HttpResponse::Ok().json(serde_json::json!({
                "reply": "Erro: Arquivo de contexto não encontrado na raiz."
            })));
        }
    };

    let prompt = format!(
        "Você é o suporte técnico do sistema Gestão Ótica Pro.\n\
         Baseie sua resposta EXCLUSIVAMENTE no código abaixo.\n\
         Se não encontrar no código, diga que não sabe.\n\
         Seja direto e use nomes literais de botões e menus.\n\n\
         CÓDIGO FONTE:\n{}\n\nPERGUNTA DO USUÁRIO:\n{}",
        context, body.message
    );

    let url = format!(
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key={}",
        state.config.gemini_api_key
    );

    let response = state
        .http
        .post(&url)
        .json(&serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        }))
        .send()
        .await;

    let response = match response {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "falha na chamada do chat de suporte");
            return Ok(HttpResponse::InternalServerError()
                .json(serde_json::json!({ "reply": FAILURE_REPLY })));
        }
    };

    if response.status().as_u16() == 429 {
        return Ok(HttpResponse::Ok().json(serde_json::json!({ "reply": QUOTA_REPLY })));
    }
    if !response.status().is_success() {
        tracing::error!(status = %response.status(), "erro da API do chat de suporte");
        return Ok(HttpResponse::InternalServerError()
            .json(serde_json::json!({ "reply": FAILURE_REPLY })));
    }

    let payload: serde_json::Value = match response.json().await {
        Ok(v) => v,
        Err(_) => {
            return Ok(HttpResponse::InternalServerError()
                .json(serde_json::json!({ "reply": FAILURE_REPLY })));
        }
    };

    let reply = payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or(FAILURE_REPLY);

    Ok(HttpResponse::Ok().json(serde_json::json!({ "reply": reply })))
}
