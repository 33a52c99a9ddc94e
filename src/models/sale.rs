use serde::{Deserialize, Serialize};

/// Ciclo de vida de uma venda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum SaleStatus {
    #[serde(rename = "Em Aberto")]
    #[sqlx(rename = "Em Aberto")]
    EmAberto,
    #[serde(rename = "Fechada")]
    #[sqlx(rename = "Fechada")]
    Fechada,
    #[serde(rename = "Cancelada")]
    #[sqlx(rename = "Cancelada")]
    Cancelada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum ItemKind {
    Lente,
    Armacao,
    Tratamento,
    Servico,
    Outro,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sale {
    pub id: i64,
    pub store_id: i64,
    pub customer_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub status: SaleStatus,
    pub valor_total: f64,
    pub valor_desconto: f64,
    pub valor_final: f64,
    pub valor_restante: f64,
    pub obs: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SaleItem {
    pub id: i64,
    pub venda_id: i64,
    pub store_id: i64,
    pub item_tipo: ItemKind,
    pub descricao: String,
    pub quantidade: f64,
    pub valor_unitario: f64,
    pub valor_total_item: f64,
}

/// Um pagamento liquidado contra uma venda. Vendas parceladas acumulam
/// vários registros; o recibo é emitido por pagamento.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Payment {
    pub id: i64,
    pub venda_id: i64,
    pub store_id: i64,
    pub forma_pagamento: String,
    pub valor_pago: f64,
    pub parcelas: i64,
    pub data_pagamento: String,
    pub obs: Option<String>,
    pub impresso: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub store_id: i64,
    pub full_name: String,
    pub cpf: Option<String>,
    pub fone_movel: Option<String>,
}

/// Conjunto completo de uma venda para a página de detalhe e para a
/// geração de documentos.
#[derive(Debug, Clone, Serialize)]
pub struct SaleBundle {
    pub venda: Sale,
    pub customer: Option<Customer>,
    pub itens: Vec<SaleItem>,
    pub pagamentos: Vec<Payment>,
    pub financiamento: Option<super::financing::FinancingWithInstallments>,
}

// --- DTOs de entrada ---

#[derive(Debug, Clone, Deserialize)]
pub struct NewSale {
    pub customer_id: Option<i64>,
    pub employee_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub item_tipo: ItemKind,
    pub descricao: String,
    pub quantidade: f64,
    pub valor_unitario: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    pub forma_pagamento: String,
    /// Aceita tanto número JSON quanto string no formato pt-BR ("1.234,50").
    pub valor_pago: serde_json::Value,
    #[serde(default = "default_parcelas")]
    pub parcelas: i64,
    pub data_pagamento: String,
    pub obs: Option<String>,
}

fn default_parcelas() -> i64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub status: SaleStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscountUpdate {
    pub valor_desconto: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkPrinted {
    pub payment_ids: Vec<i64>,
}
