use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub store_id: i64,
    pub nome: String,
    pub tipo_produto: String,
    pub categoria: Option<String>,
    pub marca: Option<String>,
    pub preco_custo: f64,
    pub preco_venda: f64,
    pub estoque_atual: f64,
    pub estoque_minimo: f64,
    pub gerencia_estoque: bool,
    pub detalhes: Option<String>,
}

/// Linha da tabela de preços de lentes (CSV do laboratório).
#[derive(Debug, Clone, Deserialize)]
pub struct LensRecord {
    pub nome_completo: String,
    pub marca: String,
    #[serde(default)]
    pub linha: String,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub tipo_lente: String,
    pub preco_venda: f64,
    pub preco_custo: f64,
}

impl LensRecord {
    /// Chave de deduplicação: nome normalizado dentro da loja.
    pub fn normalized_name(&self) -> String {
        self.nome_completo.trim().to_uppercase()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportSummary {
    pub processed: usize,
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<String>,
}
