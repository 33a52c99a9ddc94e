use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::ReceiptContext;
use crate::templates::helpers::{format_brl, format_date_br, PaymentFlags};
use crate::templates::template_trait::{utils, TypstTemplate};

/// Recibo A4 no estilo do talão azul de papelaria, para arquivar na loja.
pub struct ReceiptClassicTemplate;

impl ReceiptClassicTemplate {
    pub fn new() -> Self {
        Self
    }

    fn checkbox(label: &str, checked: bool) -> String {
        let mark = if checked { "X" } else { " " };
        format!("#box(stroke: 0.5pt, inset: 3pt)[{}] {}", mark, label)
    }

    fn format_payments(&self, ctx: &ReceiptContext) -> String {
        ctx.pagamentos
            .iter()
            .map(|p| {
                let parcelas = if p.parcelas > 1 {
                    format!(" ({}x)", p.parcelas)
                } else {
                    String::new()
                };
                format!(
                    "  [{}{}], [{}], [{}]",
                    utils::escape_typst(&p.forma_pagamento),
                    parcelas,
                    format_date_br(&p.data_pagamento),
                    utils::escape_typst(&format_brl(p.valor_pago)),
                )
            })
            .collect::<Vec<_>>()
            .join(",\n")
    }
}

impl TypstTemplate for ReceiptClassicTemplate {
    fn generate(&self, data: &Value) -> Result<String> {
        let ctx: ReceiptContext = serde_json::from_value(data.clone())
            .context("Erro deserializando dados do recibo")?;

        let flags = PaymentFlags::scan(ctx.pagamentos.iter().map(|p| p.forma_pagamento.as_str()));
        let total_pago: f64 = ctx.pagamentos.iter().map(|p| p.valor_pago).sum();

        // crédito em loja ganha uma quinta caixa, só quando usado
        let (cb_columns, cb_credito) = if flags.credito_loja {
            (
                "(auto, auto, auto, auto, auto)",
                format!(",\n  [{}]", Self::checkbox("Crédito", true)),
            )
        } else {
            ("(auto, auto, auto, auto)", String::new())
        };

        let content = format!(
            r#"#set document(title: "Recibo Venda {numero}", author: "{store_raw}")
#set page(paper: "a4", margin: 1.5cm)
#set text(font: "Arial", size: 10pt)

// Cabeçalho
#align(center)[
  #text(size: 16pt, weight: "bold")[{store}]

  #text(size: 9pt)[Óculos, Lentes e Armações]
]

#v(10pt)
#align(center)[
  #rect(stroke: 2pt + black, radius: 3pt, inset: 5pt)[
    #text(size: 12pt, weight: "bold")[RECIBO DE PAGAMENTO]
  ]
]

#v(10pt)

#grid(
  columns: (1fr, 1fr),
  [
    #text(weight: "bold")[Nº Venda:] {numero}
  ],
  [
    #align(right)[
      #text(weight: "bold")[Data:] {data_venda}
    ]
  ]
)

#v(6pt)
#text(weight: "bold")[Recebemos de:] {cliente}

#v(10pt)
#line(length: 100%, stroke: 0.5pt)
#v(10pt)

// Pagamentos cobertos por este recibo
#table(
  columns: (1fr, 90pt, 90pt),
  stroke: 0.5pt + gray,
  inset: 8pt,
  [*Forma de pagamento*], [*Data*], [*Valor*],
{pagamentos}
)

#v(10pt)

#grid(
  columns: (1fr, auto),
  [
    #text(size: 9pt)[
      Valor da venda: {valor_total} \
      Desconto: {desconto} \
      Valor final: {valor_final}
    ]
  ],
  [
    #rect(fill: rgb(240, 240, 240), stroke: 1pt + gray, radius: 3pt, inset: 10pt)[
      #text(size: 12pt, weight: "bold")[Total recebido: {total_pago}]
    ]
  ]
)

#v(10pt)

// Marcação das formas usadas, como no talão pré-impresso
#grid(
  columns: {cb_columns},
  gutter: 15pt,
  [{cb_cheque}],
  [{cb_dinheiro}],
  [{cb_cartao}],
  [{cb_pix}]{cb_credito}
)

#v(25pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    #line(length: 100%, stroke: 0.5pt)
    #align(center)[
      #text(size: 9pt)[Assinatura do Vendedor]
    ]
  ],
  [
    #line(length: 100%, stroke: 0.5pt)
    #align(center)[
      #text(size: 9pt)[Assinatura do Cliente]
    ]
  ]
)

#v(15pt)
#align(center)[
  #text(size: 8pt, fill: gray, style: "italic")[
    Documento não fiscal, para controle interno. \
    Conserve este recibo como comprovante de pagamento.
  ]
]"#,
            numero = ctx.venda.id,
            store_raw = ctx.store_name,
            store = utils::escape_typst(&ctx.store_name),
            data_venda = format_date_br(&ctx.venda.created_at),
            cliente = utils::escape_typst(&ctx.customer_name),
            pagamentos = self.format_payments(&ctx),
            valor_total = utils::escape_typst(&format_brl(ctx.venda.valor_total)),
            desconto = utils::escape_typst(&format_brl(ctx.venda.valor_desconto)),
            valor_final = utils::escape_typst(&format_brl(ctx.venda.valor_final)),
            total_pago = utils::escape_typst(&format_brl(total_pago)),
            cb_cheque = Self::checkbox("Cheque", flags.cheque),
            cb_dinheiro = Self::checkbox("Dinheiro", flags.dinheiro),
            cb_cartao = Self::checkbox("Cartão", flags.cartao),
            cb_pix = Self::checkbox("Pix", flags.pix),
            cb_columns = cb_columns,
            cb_credito = cb_credito,
        );

        Ok(content)
    }

    fn template_id(&self) -> &str {
        "receipt_classic"
    }

    fn validate(&self, data: &Value) -> Result<()> {
        let Some(obj) = data.as_object() else {
            anyhow::bail!("Os dados devem ser um objeto JSON");
        };

        for field in ["store_name", "venda", "customer_name", "pagamentos"] {
            if !obj.contains_key(field) {
                anyhow::bail!("Campo obrigatório ausente: {}", field);
            }
        }

        let pagamentos = obj
            .get("pagamentos")
            .and_then(|p| p.as_array())
            .map(|a| a.len())
            .unwrap_or(0);
        if pagamentos == 0 {
            anyhow::bail!("Recibo precisa de ao menos um pagamento");
        }

        Ok(())
    }

    fn description(&self) -> &str {
        "Recibo A4 (talão)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_context() -> Value {
        json!({
            "store_name": "Ótica Central",
            "venda": {
                "id": 42,
                "valor_total": 500.0,
                "valor_desconto": 50.0,
                "valor_final": 450.0,
                "created_at": "2026-03-10"
            },
            "customer_name": "Maria da Silva",
            "pagamentos": [
                {
                    "forma_pagamento": "Pix",
                    "valor_pago": 200.0,
                    "parcelas": 1,
                    "data_pagamento": "2026-03-10"
                },
                {
                    "forma_pagamento": "Cartão de Crédito",
                    "valor_pago": 250.0,
                    "parcelas": 3,
                    "data_pagamento": "2026-03-10"
                }
            ]
        })
    }

    #[test]
    fn generates_classic_receipt() {
        let template = ReceiptClassicTemplate::new();
        let data = sample_context();
        template.validate(&data).unwrap();
        let content = template.generate(&data).unwrap();

        assert!(content.contains("RECIBO DE PAGAMENTO"));
        assert!(content.contains("Maria da Silva"));
        assert!(content.contains("R\\$ 450,00"));
        assert!(content.contains("(3x)"));
        assert!(content.contains("10/03/2026"));
        // Pix e cartão marcados, cheque e dinheiro em branco
        assert!(content.contains("inset: 3pt)[X] Pix"));
        assert!(content.contains("inset: 3pt)[X] Cartão"));
        assert!(content.contains("inset: 3pt)[ ] Cheque"));
        assert!(content.contains("inset: 3pt)[ ] Dinheiro"));
    }

    #[test]
    fn store_credit_gets_fifth_checkbox() {
        let template = ReceiptClassicTemplate::new();
        let mut data = sample_context();
        data["pagamentos"][0]["forma_pagamento"] = json!("Crédito em Loja");
        let content = template.generate(&data).unwrap();

        assert!(content.contains("inset: 3pt)[X] Crédito]"));
        assert!(content.contains("columns: (auto, auto, auto, auto, auto)"));

        // sem crédito em loja a grade volta a quatro caixas
        let content = template.generate(&sample_context()).unwrap();
        assert!(!content.contains("inset: 3pt)[X] Crédito]"));
        assert!(content.contains("columns: (auto, auto, auto, auto)"));
    }

    #[test]
    fn rejects_receipt_without_payments() {
        let template = ReceiptClassicTemplate::new();
        let mut data = sample_context();
        data["pagamentos"] = json!([]);
        assert!(template.validate(&data).is_err());
    }
}
