use serde::{Deserialize, Serialize};

use super::sale::{Customer, Payment, Sale, SaleItem};

/// Tudo que o gerador de documentos precisa para emitir um recibo.
/// O gerador é uma função pura deste pacote: reimprimir com os mesmos
/// registros produz o mesmo documento e não altera nada no banco.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptBundle {
    pub pagamentos: Vec<Payment>,
    pub venda: Sale,
    pub cliente: Option<Customer>,
    pub itens: Vec<SaleItem>,
    pub is_reprint: bool,
}

impl ReceiptBundle {
    pub fn customer_name(&self) -> &str {
        self.cliente
            .as_ref()
            .map(|c| c.full_name.as_str())
            .unwrap_or("Consumidor Final")
    }
}

/// Contexto achatado entregue aos modelos de recibo (tela/impressão).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptContext {
    pub store_name: String,
    pub venda: ContextSale,
    pub customer_name: String,
    pub pagamentos: Vec<ContextPayment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextSale {
    pub id: i64,
    pub valor_total: f64,
    pub valor_desconto: f64,
    pub valor_final: f64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPayment {
    pub forma_pagamento: String,
    pub valor_pago: f64,
    pub parcelas: i64,
    pub data_pagamento: String,
}

impl ReceiptContext {
    pub fn from_bundle(store_name: &str, bundle: &ReceiptBundle) -> Self {
        ReceiptContext {
            store_name: store_name.to_string(),
            venda: ContextSale {
                id: bundle.venda.id,
                valor_total: bundle.venda.valor_total,
                valor_desconto: bundle.venda.valor_desconto,
                valor_final: bundle.venda.valor_final,
                created_at: bundle.venda.created_at.clone(),
            },
            customer_name: bundle.customer_name().to_string(),
            pagamentos: bundle
                .pagamentos
                .iter()
                .map(|p| ContextPayment {
                    forma_pagamento: p.forma_pagamento.clone(),
                    valor_pago: p.valor_pago,
                    parcelas: p.parcelas,
                    data_pagamento: p.data_pagamento.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptRequest {
    pub payment_ids: Vec<i64>,
    #[serde(default)]
    pub reprint: bool,
    /// Modelo usado na pré-visualização; o PDF de formulário ignora.
    #[serde(default = "default_template")]
    pub template_id: String,
}

fn default_template() -> String {
    "receipt_classic".to_string()
}
