use actix_web::{web, HttpResponse};
use futures::StreamExt;

use crate::api::{ApiError, ApiResult, ApiState};
use crate::models::catalog::{ImportSummary, LensRecord};
use crate::storage::repo;

/// Detecta o separador pela primeira linha: tabelas de laboratório vêm
/// tanto com ponto-e-vírgula quanto com vírgula.
fn detect_delimiter(data: &[u8]) -> u8 {
    let first_line = data.split(|b| *b == b'\n').next().unwrap_or(&[]);
    if first_line.contains(&b';') {
        b';'
    } else {
        b','
    }
}

/// Importa a tabela de preços de lentes (CSV). Linhas inválidas entram na
/// lista de erros sem abortar o restante do arquivo.
pub async fn import_lenses(
    state: web::Data<ApiState>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let store_id = path.into_inner();

    if body.is_empty() {
        return Err(ApiError::bad_request("Arquivo vazio"));
    }

    let mut reader = csv_async::AsyncReaderBuilder::new()
        .delimiter(detect_delimiter(&body))
        .trim(csv_async::Trim::All)
        .flexible(true)
        .create_deserializer(body.as_ref());

    let mut summary = ImportSummary::default();
    let mut records = reader.deserialize::<LensRecord>();
    let mut line = 1usize;

    while let Some(result) = records.next().await {
        line += 1;
        summary.processed += 1;
        match result {
            Ok(record) => match repo::upsert_lens(&state.db, store_id, &record).await {
                Ok((_, true)) => summary.created += 1,
                Ok((_, false)) => summary.updated += 1,
                Err(e) => summary.errors.push(format!("linha {}: {}", line, e)),
            },
            Err(e) => summary.errors.push(format!("linha {}: {}", line, e)),
        }
    }

    Ok(HttpResponse::Ok().json(summary))
}
