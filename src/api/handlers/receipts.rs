use actix_web::{web, HttpResponse};

use crate::api::{ApiError, ApiResult, ApiState};
use crate::core::PdfConfig;
use crate::models::receipt::{ReceiptContext, ReceiptRequest};
use crate::pdf::{render_receipt_form, PdfGenerator};
use crate::pix::PixPayload;
use crate::storage::repo;

fn check_rate_limit(state: &ApiState, store_id: i64) -> ApiResult<()> {
    let key = format!("store:{}", store_id);
    state
        .rate_limiter
        .check_key(&key)
        .map_err(|_| ApiError::too_many_requests("Limite de geração de documentos atingido"))
}

/// Gera o PDF do recibo sobre o formulário pré-impresso. Primeira emissão
/// marca os pagamentos como impressos; reimpressão não escreve nada.
pub async fn receipt_pdf(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<ReceiptRequest>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    check_rate_limit(&state, store_id)?;

    let bundle =
        repo::receipt_bundle(&state.db, store_id, venda_id, &body.payment_ids, body.reprint)
            .await?;

    let markup = render_receipt_form(&bundle, &state.layout);
    let generator =
        PdfGenerator::new(PdfConfig::receipt_form()).with_temp_dir(&state.config.temp_dir);
    let pdf = web::block(move || generator.compile_to_bytes(&markup)).await??;

    if !body.reprint {
        repo::mark_payments_printed(&state.db, store_id, &body.payment_ids).await?;
    }

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("inline; filename=\"recibo_venda_{}.pdf\"", venda_id),
        ))
        .body(pdf))
}

/// Pré-visualização em um dos modelos de tela (clássico ou bobina).
pub async fn receipt_preview(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<ReceiptRequest>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();

    let template = state
        .templates
        .get(&body.template_id)
        .ok_or_else(|| ApiError::not_found(format!("modelo {}", body.template_id)))?;

    let bundle =
        repo::receipt_bundle(&state.db, store_id, venda_id, &body.payment_ids, body.reprint)
            .await?;
    let context = ReceiptContext::from_bundle(&state.config.store_name, &bundle);
    let data = serde_json::to_value(&context)?;

    template.validate(&data)?;
    let markup = template.generate(&data)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "template_id": body.template_id,
        "markup": markup
    })))
}

pub async fn list_templates(state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let templates: Vec<_> = state
        .templates
        .list()
        .into_iter()
        .map(|(id, description)| serde_json::json!({ "id": id, "description": description }))
        .collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "templates": templates })))
}

/// Cobrança Pix do saldo devedor da venda: payload copia-e-cola + QR.
pub async fn pix_charge(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();

    if state.config.pix_key.is_empty() {
        return Err(ApiError::bad_request("Chave Pix da loja não configurada"));
    }

    let sale = repo::get_sale(&state.db, store_id, venda_id).await?;
    if sale.valor_restante <= 0.0 {
        return Err(ApiError::bad_request("Venda sem saldo devedor"));
    }

    let pix = PixPayload::new(
        &state.config.pix_key,
        &state.config.store_name,
        &state.config.store_city,
        sale.valor_restante,
        None,
    );
    let payload = pix.payload();
    let qr = pix.qr_png_base64()?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "venda_id": venda_id,
        "valor": sale.valor_restante,
        "payload": payload,
        "qr_code": qr
    })))
}
