use serde::{Deserialize, Serialize};

/// Linha achatada do relatório de vendas por período.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReportRow {
    pub id: i64,
    pub data: String,
    pub cliente: String,
    pub vendedor: String,
    pub itens_resumo: String,
    pub qtd_itens: i64,
    pub status: String,
    pub valor_total: f64,
    pub valor_desconto: f64,
    pub valor_final: f64,
    pub valor_pago: f64,
    pub saldo_devedor: f64,
    pub tem_carne: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    pub data_inicio: String,
    pub data_fim: String,
}

/// Resumo truncado em 50 caracteres, com reticências quando cortar.
pub fn summarize_items(descriptions: &[String]) -> String {
    let joined = descriptions.join(", ");
    if joined.chars().count() > 50 {
        let cut: String = joined.chars().take(50).collect();
        format!("{}...", cut)
    } else {
        joined
    }
}
