//! Coordenadas de impressão sobre o formulário de recibo pré-impresso.
//!
//! O talão é papel de gráfica: só imprimimos os valores nas posições
//! certas, em milímetros a partir do canto superior esquerdo da folha
//! A4 paisagem. Ajustar aqui quando a gráfica mudar o modelo.

use serde::{Deserialize, Serialize};

/// Posição em milímetros.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const fn mm(x: f32, y: f32) -> Self {
        Pos { x, y }
    }
}

/// Mapa de campos do formulário. Pode ser sobrescrito por um arquivo
/// JSON quando a gráfica entrega um talão com medidas diferentes; campos
/// ausentes mantêm o padrão.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLayout {
    pub nome: Pos,
    pub data: Pos,
    pub valor_numerico: Pos,
    pub valor_extenso: Pos,
    pub observacao: Pos,
    /// Coluna única dos checkboxes de forma de pagamento.
    pub checkbox_x: f32,
    pub y_cheque: f32,
    pub y_dinheiro: f32,
    pub y_cartao: f32,
    pub y_pix: f32,
    /// Marca d'água de segunda via.
    pub reimpressao: Pos,
}

impl Default for FormLayout {
    fn default() -> Self {
        FormLayout {
            nome: Pos::mm(144.0, 56.0),
            data: Pos::mm(246.0, 65.0),
            valor_numerico: Pos::mm(185.0, 66.0),
            valor_extenso: Pos::mm(185.0, 90.0),
            observacao: Pos::mm(239.0, 72.0),
            checkbox_x: 208.0,
            // Ordem no papel, de cima para baixo:
            // cheque, dinheiro, cartão, pix
            y_cheque: 66.0,
            y_dinheiro: 71.0,
            y_cartao: 76.0,
            y_pix: 81.0,
            reimpressao: Pos::mm(10.0, 10.0),
        }
    }
}

impl FormLayout {
    pub fn from_json_file(path: &str) -> crate::core::DomainResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let layout = serde_json::from_str(&content).map_err(|e| {
            crate::core::DomainError::validation(format!("layout inválido em {}: {}", path, e))
        })?;
        Ok(layout)
    }

    /// Linha do "X" para a forma de pagamento, quando houver.
    pub fn checkbox_y(&self, row: crate::templates::helpers::CheckRow) -> f32 {
        use crate::templates::helpers::CheckRow;
        match row {
            CheckRow::Cheque => self.y_cheque,
            CheckRow::Dinheiro => self.y_dinheiro,
            CheckRow::Cartao => self.y_cartao,
            CheckRow::Pix => self.y_pix,
        }
    }
}
