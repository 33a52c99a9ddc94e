use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::{ApiResult, ApiState};
use crate::models::payable::{BillInput, PayBillInput};
use crate::storage::repo;

#[derive(Debug, Deserialize)]
pub struct BillsQuery {
    /// Qualquer data dentro do mês desejado; ausente usa o mês corrente.
    pub data: Option<String>,
}

pub async fn list_bills(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
    query: web::Query<BillsQuery>,
) -> ApiResult<HttpResponse> {
    let store_id = path.into_inner();
    let bills = repo::list_bills(&state.db, store_id, query.data.as_deref()).await?;
    Ok(HttpResponse::Ok().json(bills))
}

pub async fn save_bill(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
    body: web::Json<BillInput>,
) -> ApiResult<HttpResponse> {
    let store_id = path.into_inner();
    let created = body.id.is_none();
    let bill = repo::save_bill(&state.db, store_id, &body).await?;
    let response = if created {
        HttpResponse::Created().json(bill)
    } else {
        HttpResponse::Ok().json(bill)
    };
    Ok(response)
}

pub async fn pay_bill(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
    body: web::Json<PayBillInput>,
) -> ApiResult<HttpResponse> {
    let store_id = path.into_inner();
    let bill = repo::pay_bill(&state.db, store_id, &body).await?;
    Ok(HttpResponse::Ok().json(bill))
}

/// Abre o caixa do dia, pré-requisito para pagar contas em dinheiro.
pub async fn open_drawer(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let store_id = path.into_inner();
    let hoje = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let caixa_id = repo::open_drawer(&state.db, store_id, &hoje).await?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "caixa_id": caixa_id,
        "data_abertura": hoje
    })))
}

pub async fn delete_bill(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (store_id, bill_id) = path.into_inner();
    repo::delete_bill(&state.db, store_id, bill_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
