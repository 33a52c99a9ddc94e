//! Geração do BR Code Pix (payload "copia e cola" + QR) para cobrança
//! do saldo de uma venda.
//!
//! Segue o formato EMV do Banco Central: campos `id | tamanho | valor`,
//! CRC16/CCITT-FALSE no campo 63.

use std::io::Cursor;

use base64::Engine;
use qrcode::QrCode;

use crate::core::{DomainError, DomainResult};

/// Payload estático de cobrança Pix.
#[derive(Debug, Clone)]
pub struct PixPayload {
    key: String,
    name: String,
    city: String,
    amount: String,
    txid: String,
}

impl PixPayload {
    pub fn new(key: &str, name: &str, city: &str, amount: f64, txid: Option<&str>) -> Self {
        let mut name = normalize_text(name);
        name.truncate(25);
        let mut city = normalize_text(city);
        city.truncate(15);

        PixPayload {
            key: normalize_key(key),
            name,
            city,
            amount: format!("{:.2}", amount),
            txid: txid.unwrap_or("***").to_string(),
        }
    }

    /// O texto "copia e cola" completo, com CRC.
    pub fn payload(&self) -> String {
        let merchant_account = format!(
            "{}{}",
            field("00", "BR.GOV.BCB.PIX"),
            field("01", &self.key)
        );

        let mut payload = String::new();
        payload.push_str(&field("00", "01")); // Payload Format Indicator
        payload.push_str(&field("26", &merchant_account));
        payload.push_str(&field("52", "0000")); // Merchant Category Code
        payload.push_str(&field("53", "986")); // moeda: BRL
        payload.push_str(&field("54", &self.amount));
        payload.push_str(&field("58", "BR"));
        payload.push_str(&field("59", &self.name));
        payload.push_str(&field("60", &self.city));
        payload.push_str(&field("62", &field("05", &self.txid)));
        payload.push_str("6304"); // CRC16: id + tamanho

        let crc = crc16_ccitt(payload.as_bytes());
        format!("{}{:04X}", payload, crc)
    }

    /// QR do payload como data URL PNG, pronto para `<img src=...>`.
    pub fn qr_png_base64(&self) -> DomainResult<String> {
        let code = QrCode::new(self.payload().as_bytes())
            .map_err(|e| DomainError::Generation(format!("Erro gerando QR Pix: {}", e)))?;

        let img = code
            .render::<image::Luma<u8>>()
            .min_dimensions(300, 300)
            .build();

        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png)
            .map_err(|e| DomainError::Generation(format!("Erro codificando PNG: {}", e)))?;

        let encoded = base64::engine::general_purpose::STANDARD.encode(png.into_inner());
        Ok(format!("data:image/png;base64,{}", encoded))
    }
}

fn field(id: &str, value: &str) -> String {
    format!("{}{:02}{}", id, value.len(), value)
}

/// Chave Pix: e-mail e chave aleatória (UUID) passam como estão; CPF,
/// CNPJ e telefone perdem a pontuação.
fn normalize_key(key: &str) -> String {
    let trimmed = key.trim();
    if trimmed.contains('@') {
        return trimmed.to_string();
    }
    if trimmed.len() > 30 && trimmed.contains('-') {
        return trimmed.to_string();
    }
    trimmed.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Nome e cidade no alfabeto restrito do BR Code: sem acento, sem
/// pontuação, caixa alta, espaços únicos.
fn normalize_text(text: &str) -> String {
    let folded: String = text.chars().map(fold_diacritic).collect();
    let cleaned: String = folded
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' | 'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        other => other,
    }
}

/// CRC16/CCITT-FALSE: polinômio 0x1021, valor inicial 0xFFFF.
fn crc16_ccitt(data: &[u8]) -> u16 {
    let mut crc: u16 = 0xFFFF;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_encodes_id_len_value() {
        assert_eq!(field("00", "01"), "000201");
        assert_eq!(field("00", "BR.GOV.BCB.PIX"), "0014BR.GOV.BCB.PIX");
    }

    #[test]
    fn normalizes_keys_by_kind() {
        assert_eq!(normalize_key("loja@otica.com.br"), "loja@otica.com.br");
        assert_eq!(
            normalize_key("123e4567-e89b-12d3-a456-426614174000"),
            "123e4567-e89b-12d3-a456-426614174000"
        );
        assert_eq!(normalize_key("123.456.789-09"), "12345678909");
        assert_eq!(normalize_key("(11) 98765-4321"), "11987654321");
    }

    #[test]
    fn normalizes_merchant_text() {
        assert_eq!(normalize_text("Ótica São João"), "OTICA SAO JOAO");
        assert_eq!(normalize_text("  espaços   duplos  "), "ESPACOS DUPLOS");
    }

    #[test]
    fn payload_structure_and_crc() {
        let pix = PixPayload::new("12345678909", "Otica Central", "Sao Paulo", 150.0, None);
        let payload = pix.payload();

        assert!(payload.starts_with("000201"));
        assert!(payload.contains("0014BR.GOV.BCB.PIX"));
        assert!(payload.contains("5406150.00"));
        assert!(payload.contains("5913OTICA CENTRAL"));
        assert!(payload.contains("6009SAO PAULO"));
        assert!(payload.contains("62070503***"));

        // CRC recalculado sobre tudo até "6304" bate com o sufixo
        let (body, crc) = payload.split_at(payload.len() - 4);
        assert_eq!(format!("{:04X}", crc16_ccitt(body.as_bytes())), crc);
    }

    #[test]
    fn name_and_city_are_truncated() {
        let pix = PixPayload::new(
            "k@e.com",
            "Ótica com um nome comprido demais para o campo",
            "Cidade de nome muito longo",
            1.0,
            None,
        );
        let payload = pix.payload();
        assert!(payload.contains("5925OTICA COM UM NOME COMPRID"));
        assert!(payload.contains("6015CIDADE DE NOME "));
    }
}
