use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum BillStatus {
    Pendente,
    Pago,
}

/// Conta a pagar: obrigação com fornecedor, independente das vendas.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bill {
    pub id: i64,
    pub store_id: i64,
    pub description: String,
    pub amount: f64,
    pub due_date: String,
    pub category: Option<String>,
    pub supplier_id: Option<i64>,
    pub status: BillStatus,
    pub amount_paid: Option<f64>,
    pub payment_date: Option<String>,
}

/// Origem do dinheiro na baixa da conta. `Caixa` exige caixa aberto no dia
/// e gera uma sangria automática.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentSource {
    Caixa,
    Banco,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BillInput {
    pub id: Option<i64>,
    pub description: String,
    pub amount: f64,
    pub due_date: String,
    pub category: Option<String>,
    pub supplier_id: Option<i64>,
}

impl BillInput {
    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().chars().count() < 3 {
            return Err("Descrição obrigatória".to_string());
        }
        if self.amount < 0.01 {
            return Err("Valor inválido".to_string());
        }
        if self.due_date.len() < 10 {
            return Err("Data inválida".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayBillInput {
    pub bill_id: i64,
    pub amount_paid: f64,
    pub payment_date: String,
    pub source: PaymentSource,
}
