use actix_web::{web, HttpResponse};

use crate::api::{ApiResult, ApiState};
use crate::models::financing::{FinancingInput, ReceiveInstallmentInput};
use crate::models::sale::{DiscountUpdate, MarkPrinted, NewItem, NewPayment, NewSale, StatusUpdate};
use crate::storage::repo;

pub async fn create_sale(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
    body: web::Json<NewSale>,
) -> ApiResult<HttpResponse> {
    let store_id = path.into_inner();
    let sale = repo::create_sale(&state.db, store_id, &body).await?;
    Ok(HttpResponse::Created().json(sale))
}

pub async fn get_sale(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    let bundle = repo::get_sale_bundle(&state.db, store_id, venda_id).await?;
    Ok(HttpResponse::Ok().json(bundle))
}

pub async fn add_item(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<NewItem>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    let item = repo::add_item(&state.db, store_id, venda_id, &body).await?;
    Ok(HttpResponse::Created().json(item))
}

pub async fn delete_item(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (store_id, item_id) = path.into_inner();
    repo::delete_item(&state.db, store_id, item_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn add_payment(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<NewPayment>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    let payment = repo::add_payment(&state.db, store_id, venda_id, &body).await?;
    Ok(HttpResponse::Created().json(payment))
}

pub async fn delete_payment(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (store_id, payment_id) = path.into_inner();
    repo::delete_payment(&state.db, store_id, payment_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn update_status(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<StatusUpdate>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    let sale = repo::update_status(&state.db, store_id, venda_id, body.status).await?;
    Ok(HttpResponse::Ok().json(sale))
}

pub async fn update_discount(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<DiscountUpdate>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    let sale = repo::update_discount(&state.db, store_id, venda_id, body.valor_desconto).await?;
    Ok(HttpResponse::Ok().json(sale))
}

pub async fn mark_printed(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
    body: web::Json<MarkPrinted>,
) -> ApiResult<HttpResponse> {
    let store_id = path.into_inner();
    let marked = repo::mark_payments_printed(&state.db, store_id, &body.payment_ids).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "marked": marked })))
}

pub async fn save_financing(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<FinancingInput>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    let financing = repo::save_financing(&state.db, store_id, venda_id, &body).await?;
    Ok(HttpResponse::Created().json(financing))
}

pub async fn delete_financing(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    repo::delete_financing(&state.db, store_id, venda_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn receive_installment(
    state: web::Data<ApiState>,
    path: web::Path<(i64, i64)>,
    body: web::Json<ReceiveInstallmentInput>,
) -> ApiResult<HttpResponse> {
    let (store_id, venda_id) = path.into_inner();
    repo::receive_installment(&state.db, store_id, venda_id, &body).await?;
    let bundle = repo::get_sale_bundle(&state.db, store_id, venda_id).await?;
    Ok(HttpResponse::Ok().json(bundle))
}
