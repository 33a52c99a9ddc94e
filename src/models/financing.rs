use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum InstallmentStatus {
    Pendente,
    Pago,
}

/// Cabeçalho do carnê de financiamento em loja.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Financing {
    pub id: i64,
    pub venda_id: i64,
    pub store_id: i64,
    pub customer_id: Option<i64>,
    pub valor_total_financiado: f64,
    pub quantidade_parcelas: i64,
    pub data_inicio: String,
    pub obs: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Installment {
    pub id: i64,
    pub financiamento_id: i64,
    pub store_id: i64,
    pub customer_id: Option<i64>,
    pub numero_parcela: i64,
    pub data_vencimento: String,
    pub valor_parcela: f64,
    pub status: InstallmentStatus,
    pub data_pagamento: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancingWithInstallments {
    #[serde(flatten)]
    pub header: Financing,
    pub parcelas: Vec<Installment>,
}

/// O que fazer com a diferença quando o principal abatido não bate com o
/// valor de face da parcela.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleStrategy {
    /// Baixa a parcela e ignora a diferença.
    QuitacaoTotal,
    /// Cria uma parcela "filha" com o saldo restante.
    CriarPendencia,
    /// Soma o saldo à próxima parcela pendente (ou cria uma nova a +30 dias).
    SomarProxima,
}

impl Default for SettleStrategy {
    fn default() -> Self {
        SettleStrategy::QuitacaoTotal
    }
}

// --- DTOs de entrada ---

#[derive(Debug, Clone, Deserialize)]
pub struct InstallmentSpec {
    pub numero_parcela: i64,
    pub data_vencimento: String,
    pub valor_parcela: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinancingInput {
    pub customer_id: Option<i64>,
    pub valor_total_financiado: f64,
    pub data_inicio: String,
    pub parcelas: Vec<InstallmentSpec>,
    pub obs: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiveInstallmentInput {
    pub parcela_id: i64,
    pub valor_pago_total: f64,
    #[serde(default)]
    pub valor_juros: f64,
    pub forma_pagamento: String,
    pub data_pagamento: String,
    #[serde(default)]
    pub estrategia: SettleStrategy,
}
