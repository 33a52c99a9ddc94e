use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formata um valor em reais no padrão pt-BR: `1234.5` -> `"R$ 1.234,50"`.
pub fn format_brl(amount: f64) -> String {
    let formatted = group_thousands(amount.abs());
    if amount < 0.0 {
        format!("-R$ {}", formatted)
    } else {
        format!("R$ {}", formatted)
    }
}

/// Só o número, sem o símbolo da moeda: `1234.5` -> `"1.234,50"`.
pub fn format_brl_plain(amount: f64) -> String {
    group_thousands(amount)
}

fn group_thousands(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    let (integer, decimal) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    let mut count = 0;
    for c in integer.chars().rev() {
        if count == 3 && c.is_ascii_digit() {
            grouped.push('.');
            count = 0;
        }
        grouped.push(c);
        count += 1;
    }
    let integer_grouped: String = grouped.chars().rev().collect();

    format!("{},{}", integer_grouped, decimal)
}

/// Data no padrão pt-BR (`dd/mm/aaaa`). Aceita `YYYY-MM-DD`, RFC 3339 e
/// `YYYY-MM-DDTHH:MM:SS`; o que não parsear volta como veio.
pub fn format_date_br(date_str: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(date_str) {
        return datetime.format("%d/%m/%Y").to_string();
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S") {
        return datetime.format("%d/%m/%Y").to_string();
    }
    // formato do datetime('now') do SQLite
    if let Ok(datetime) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return datetime.format("%d/%m/%Y").to_string();
    }
    date_str.to_string()
}

/// Converte a entrada de valor do formulário: número JSON direto ou string
/// digitada no padrão brasileiro ("1.234,50").
pub fn parse_brl_amount(value: &serde_json::Value) -> Result<f64, String> {
    if let Some(n) = value.as_f64() {
        return Ok(n);
    }
    if let Some(s) = value.as_str() {
        let cleaned = s.trim().replace('.', "").replace(',', ".");
        return cleaned
            .parse::<f64>()
            .map_err(|_| format!("valor inválido: {}", s));
    }
    Err("valor deve ser número ou string".to_string())
}

/// Linha do formulário pré-impresso onde o "X" é marcado para um pagamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckRow {
    Cheque,
    Dinheiro,
    Cartao,
    Pix,
}

impl CheckRow {
    /// Formas desconhecidas (crediário, "Outros") ficam sem marcação para
    /// não riscar a linha errada do papel.
    pub fn for_method(forma_pagamento: &str) -> Option<CheckRow> {
        let forma = forma_pagamento.to_lowercase();
        let forma = forma.trim();
        if forma.contains("cheque") {
            Some(CheckRow::Cheque)
        } else if forma.contains("dinheiro") {
            Some(CheckRow::Dinheiro)
        } else if forma.contains("crédito")
            || forma.contains("credito")
            || forma.contains("débito")
            || forma.contains("debito")
            || forma.contains("cart")
        {
            Some(CheckRow::Cartao)
        } else if forma.contains("pix") {
            Some(CheckRow::Pix)
        } else {
            None
        }
    }
}

/// Flags agregadas das formas de pagamento de uma venda, para os checkboxes
/// do recibo clássico.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentFlags {
    pub cheque: bool,
    pub dinheiro: bool,
    pub cartao: bool,
    pub pix: bool,
    pub credito_loja: bool,
}

impl PaymentFlags {
    pub fn scan<'a, I: IntoIterator<Item = &'a str>>(methods: I) -> Self {
        let mut flags = PaymentFlags::default();
        for m in methods {
            let f = m.to_lowercase();
            if f.contains("cheque") {
                flags.cheque = true;
            }
            if f.contains("dinheiro") {
                flags.dinheiro = true;
            }
            if f.contains("cart") || f.contains("débito") || f.contains("crédito") {
                flags.cartao = true;
            }
            if f.contains("pix") {
                flags.pix = true;
            }
            if f.contains("crédito em loja") {
                flags.credito_loja = true;
            }
        }
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_currency_pt_br() {
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-45.9), "-R$ 45,90");
        assert_eq!(format_brl_plain(1234.5), "1.234,50");
    }

    #[test]
    fn formats_dates_pt_br() {
        assert_eq!(format_date_br("2026-08-28"), "28/08/2026");
        assert_eq!(format_date_br("2026-08-28T14:03:00-03:00"), "28/08/2026");
        assert_eq!(format_date_br("2026-08-28T14:03:00"), "28/08/2026");
        // o que não parsear volta intacto
        assert_eq!(format_date_br("amanhã"), "amanhã");
    }

    #[test]
    fn parses_pt_br_amounts() {
        assert_eq!(
            parse_brl_amount(&serde_json::json!("1.234,50")).unwrap(),
            1234.5
        );
        assert_eq!(parse_brl_amount(&serde_json::json!(99.9)).unwrap(), 99.9);
        assert!(parse_brl_amount(&serde_json::json!("abc")).is_err());
        assert!(parse_brl_amount(&serde_json::json!(null)).is_err());
    }

    #[test]
    fn classifies_payment_methods() {
        assert_eq!(CheckRow::for_method("Cheque"), Some(CheckRow::Cheque));
        assert_eq!(CheckRow::for_method(" dinheiro "), Some(CheckRow::Dinheiro));
        assert_eq!(
            CheckRow::for_method("Cartão de Crédito"),
            Some(CheckRow::Cartao)
        );
        assert_eq!(CheckRow::for_method("Débito"), Some(CheckRow::Cartao));
        assert_eq!(CheckRow::for_method("PIX"), Some(CheckRow::Pix));
        assert_eq!(CheckRow::for_method("Crediário"), None);
        assert_eq!(CheckRow::for_method("Outros"), None);
    }

    #[test]
    fn scans_flags_over_all_payments() {
        let flags = PaymentFlags::scan(["Dinheiro", "Pix", "Crédito em Loja"]);
        assert!(flags.dinheiro);
        assert!(flags.pix);
        assert!(flags.credito_loja);
        // "crédito em loja" contém "crédito", logo também acende cartão,
        // como no recibo original
        assert!(flags.cartao);
        assert!(!flags.cheque);
    }
}
