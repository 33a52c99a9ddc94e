use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("registro não encontrado: {0}")]
    NotFound(String),

    #[error("erro de validação: {0}")]
    Validation(String),

    #[error("não há caixa aberto para realizar pagamento em dinheiro")]
    DrawerClosed,

    #[error("erro de geração: {0}")]
    Generation(String),

    #[error("erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("erro de banco: {0}")]
    Database(#[from] sqlx::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        DomainError::NotFound(what.into())
    }
}
