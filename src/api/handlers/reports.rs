use actix_web::{web, HttpResponse};

use crate::api::{ApiError, ApiResult, ApiState};
use crate::models::report::ReportQuery;
use crate::storage::repo;

pub async fn sales_report(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
    query: web::Query<ReportQuery>,
) -> ApiResult<HttpResponse> {
    let store_id = path.into_inner();

    if query.data_inicio.len() < 10 || query.data_fim.len() < 10 {
        return Err(ApiError::bad_request("Período inválido (use AAAA-MM-DD)"));
    }
    if query.data_inicio > query.data_fim {
        return Err(ApiError::bad_request("Data inicial posterior à final"));
    }

    let rows = repo::sales_report(&state.db, store_id, &query).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "periodo": { "inicio": query.data_inicio, "fim": query.data_fim },
        "total": rows.len(),
        "vendas": rows
    })))
}
