use std::fs;
use std::path::PathBuf;
use std::process::Command;

use uuid::Uuid;

use crate::core::{DomainError, DomainResult, PdfConfig};
use crate::models::ReceiptBundle;
use crate::pdf::layout::FormLayout;
use crate::templates::helpers::{format_brl_plain, format_date_br, CheckRow};
use crate::templates::utils::escape_typst;

fn place(x: f32, y: f32, content: &str) -> String {
    format!("#place(top + left, dx: {x}mm, dy: {y}mm)[{content}]\n")
}

/// Monta o corpo Typst do recibo sobre o formulário pré-impresso: uma
/// página por pagamento, cada campo posicionado em milímetros.
///
/// Função pura: os mesmos registros produzem sempre o mesmo documento,
/// inclusive na reimpressão, que só acrescenta a marca de segunda via.
pub fn render_receipt_form(bundle: &ReceiptBundle, layout: &FormLayout) -> String {
    let nome = bundle.customer_name().to_uppercase();
    let mut body = String::new();

    for (index, pagamento) in bundle.pagamentos.iter().enumerate() {
        if index > 0 {
            body.push_str("#pagebreak()\n");
        }

        if bundle.is_reprint {
            body.push_str(&place(
                layout.reimpressao.x,
                layout.reimpressao.y,
                "#text(size: 9pt, fill: gray)[REIMPRESSÃO]",
            ));
        }

        body.push_str(&place(layout.nome.x, layout.nome.y, &escape_typst(&nome)));
        body.push_str(&place(
            layout.data.x,
            layout.data.y,
            &format_date_br(&pagamento.created_at),
        ));

        let valor = format_brl_plain(pagamento.valor_pago);
        body.push_str(&place(
            layout.valor_numerico.x,
            layout.valor_numerico.y,
            &escape_typst(&valor),
        ));
        body.push_str(&place(
            layout.valor_extenso.x,
            layout.valor_extenso.y,
            &format!("#text(size: 10pt)[{}]", escape_typst(&format!("*** {} ***", valor))),
        ));

        body.push_str(&place(
            layout.observacao.x,
            layout.observacao.y,
            &escape_typst(&format!("Ref. Venda #{}", bundle.venda.id)),
        ));

        // "X" na linha da forma de pagamento; formas desconhecidas
        // (crediário, "Outros") ficam sem marcação
        if let Some(row) = CheckRow::for_method(&pagamento.forma_pagamento) {
            body.push_str(&place(layout.checkbox_x, layout.checkbox_y(row), "X"));
        }
    }

    body
}

/// Compila corpos Typst em PDF chamando o binário `typst`.
pub struct PdfGenerator {
    config: PdfConfig,
    temp_dir: PathBuf,
}

impl PdfGenerator {
    pub fn new(config: PdfConfig) -> Self {
        PdfGenerator {
            config,
            temp_dir: PathBuf::from("temp"),
        }
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn full_document(&self, body: &str) -> String {
        format!("{}\n\n{}", self.config.to_typst_header(), body)
    }

    /// Compila e devolve os bytes do PDF. Chamada bloqueante; nos
    /// handlers roda dentro de `web::block`.
    pub fn compile_to_bytes(&self, body: &str) -> DomainResult<Vec<u8>> {
        if body.is_empty() {
            return Err(DomainError::validation("Documento sem conteúdo"));
        }

        fs::create_dir_all(&self.temp_dir)?;

        let stem = Uuid::new_v4().simple().to_string();
        let typ_path = self.temp_dir.join(format!("{stem}.typ"));
        let pdf_path = self.temp_dir.join(format!("{stem}.pdf"));

        fs::write(&typ_path, self.full_document(body))?;

        let output = Command::new("typst")
            .arg("compile")
            .arg(&typ_path)
            .arg(&pdf_path)
            .output()
            .map_err(|e| DomainError::Generation(format!("Erro executando typst: {}", e)));

        let _ = fs::remove_file(&typ_path);
        let output = output?;

        if !output.status.success() {
            let _ = fs::remove_file(&pdf_path);
            return Err(DomainError::Generation(format!(
                "Falha na compilação Typst: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let bytes = fs::read(&pdf_path)?;
        let _ = fs::remove_file(&pdf_path);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sale::{Payment, Sale};
    use crate::models::SaleStatus;

    fn sample_sale() -> Sale {
        Sale {
            id: 42,
            store_id: 1,
            customer_id: None,
            employee_id: None,
            status: SaleStatus::EmAberto,
            valor_total: 300.0,
            valor_desconto: 0.0,
            valor_final: 300.0,
            valor_restante: 100.0,
            obs: None,
            created_at: "2026-03-10T09:30:00".to_string(),
        }
    }

    fn payment(id: i64, forma: &str, valor: f64) -> Payment {
        Payment {
            id,
            venda_id: 42,
            store_id: 1,
            forma_pagamento: forma.to_string(),
            valor_pago: valor,
            parcelas: 1,
            data_pagamento: "2026-03-10".to_string(),
            obs: None,
            impresso: false,
            created_at: "2026-03-10T09:30:00".to_string(),
        }
    }

    fn bundle(pagamentos: Vec<Payment>, is_reprint: bool) -> ReceiptBundle {
        ReceiptBundle {
            pagamentos,
            venda: sample_sale(),
            cliente: None,
            itens: vec![],
            is_reprint,
        }
    }

    #[test]
    fn one_page_per_payment() {
        let b = bundle(
            vec![payment(1, "Dinheiro", 100.0), payment(2, "Pix", 100.0)],
            false,
        );
        let body = render_receipt_form(&b, &FormLayout::default());
        assert_eq!(body.matches("#pagebreak()").count(), 1);
        // sem cliente cadastrado, sai "Consumidor Final" em caixa alta
        assert!(body.contains("CONSUMIDOR FINAL"));
        assert!(body.contains("Ref. Venda \\#42"));
        assert!(!body.contains("REIMPRESSÃO"));
    }

    #[test]
    fn reprint_marks_every_page() {
        let b = bundle(
            vec![payment(1, "Dinheiro", 100.0), payment(2, "Pix", 100.0)],
            true,
        );
        let body = render_receipt_form(&b, &FormLayout::default());
        assert_eq!(body.matches("REIMPRESSÃO").count(), 2);
    }

    #[test]
    fn render_is_deterministic() {
        let b = bundle(vec![payment(1, "Cartão de Crédito", 150.0)], false);
        let layout = FormLayout::default();
        assert_eq!(
            render_receipt_form(&b, &layout),
            render_receipt_form(&b, &layout)
        );
    }

    #[test]
    fn unknown_method_leaves_checkbox_blank() {
        let layout = FormLayout::default();
        let marked = render_receipt_form(&bundle(vec![payment(1, "Pix", 50.0)], false), &layout);
        assert!(marked.contains(&format!("dx: {}mm, dy: {}mm)[X]", layout.checkbox_x, layout.y_pix)));

        let blank = render_receipt_form(&bundle(vec![payment(1, "Outros", 50.0)], false), &layout);
        assert!(!blank.contains(")[X]"));
    }

    #[test]
    fn amounts_use_pt_br_format() {
        let b = bundle(vec![payment(1, "Dinheiro", 1234.5)], false);
        let body = render_receipt_form(&b, &FormLayout::default());
        assert!(body.contains("1.234,50"));
        assert!(body.contains("10/03/2026"));
    }
}
