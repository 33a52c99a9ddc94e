use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::ReceiptContext;
use crate::templates::helpers::{format_brl, format_date_br};
use crate::templates::template_trait::{utils, TypstTemplate};

/// Recibo para bobina térmica de 80mm, impresso no caixa.
pub struct ReceiptThermalTemplate;

impl ReceiptThermalTemplate {
    pub fn new() -> Self {
        Self
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
                    "#grid(columns: (1fr, auto), [{}{}], [{}])",
                    utils::escape_typst(&p.forma_pagamento),
                    parcelas,
                    utils::escape_typst(&format_brl(p.valor_pago)),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TypstTemplate for ReceiptThermalTemplate {
    fn generate(&self, data: &Value) -> Result<String> {
        let ctx: ReceiptContext = serde_json::from_value(data.clone())
            .context("Erro deserializando dados do recibo")?;

        let total_pago: f64 = ctx.pagamentos.iter().map(|p| p.valor_pago).sum();

        // Desconto só aparece quando houve
        let linha_desconto = if ctx.venda.valor_desconto > 0.0 {
            format!(
                "#grid(columns: (1fr, auto), [Desconto], [-{}])\n",
                utils::escape_typst(&format_brl(ctx.venda.valor_desconto))
            )
        } else {
            String::new()
        };

        let content = format!(
            r#"#set document(title: "Recibo Venda {numero}")
#set page(width: 80mm, height: auto, margin: 4mm)
#set text(font: "Arial", size: 8pt)

#align(center)[
  #text(size: 11pt, weight: "bold")[{store}]

  RECIBO DE PAGAMENTO
]

#line(length: 100%, stroke: (dash: "dashed"))

Venda Nº {numero} \
Data: {data_venda} \
Cliente: {cliente}

#line(length: 100%, stroke: (dash: "dashed"))

#grid(columns: (1fr, auto), [Subtotal], [{valor_total}])
{linha_desconto}#grid(columns: (1fr, auto), [#text(weight: "bold")[TOTAL]], [#text(weight: "bold")[{valor_final}]])

#line(length: 100%, stroke: (dash: "dashed"))

#text(weight: "bold")[Pagamentos]
{pagamentos}
#grid(columns: (1fr, auto), [#text(weight: "bold")[Total recebido]], [#text(weight: "bold")[{total_pago}]])

#line(length: 100%, stroke: (dash: "dashed"))

#align(center)[
  Obrigado pela preferência!

  #text(size: 7pt)[\*\*\* NÃO É DOCUMENTO FISCAL \*\*\*]
]"#,
            numero = ctx.venda.id,
            store = utils::escape_typst(&ctx.store_name),
            data_venda = format_date_br(&ctx.venda.created_at),
            cliente = utils::escape_typst(&ctx.customer_name),
            valor_total = utils::escape_typst(&format_brl(ctx.venda.valor_total)),
            linha_desconto = linha_desconto,
            valor_final = utils::escape_typst(&format_brl(ctx.venda.valor_final)),
            pagamentos = self.format_payments(&ctx),
            total_pago = utils::escape_typst(&format_brl(total_pago)),
        );

        Ok(content)
    }

    fn template_id(&self) -> &str {
        "receipt_thermal"
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

        Ok(())
    }

    fn description(&self) -> &str {
        "Recibo bobina 80mm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_context(desconto: f64) -> Value {
        json!({
            "store_name": "Ótica Central",
            "venda": {
                "id": 7,
                "valor_total": 300.0,
                "valor_desconto": desconto,
                "valor_final": 300.0 - desconto,
                "created_at": "2026-03-10T09:30:00"
            },
            "customer_name": "Consumidor Final",
            "pagamentos": [
                {
                    "forma_pagamento": "Dinheiro",
                    "valor_pago": 300.0 - desconto,
                    "parcelas": 1,
                    "data_pagamento": "2026-03-10"
                }
            ]
        })
    }

    #[test]
    fn thermal_receipt_hides_zero_discount() {
        let template = ReceiptThermalTemplate::new();
        let content = template.generate(&sample_context(0.0)).unwrap();
        assert!(!content.contains("Desconto"));
        assert!(content.contains("NÃO É DOCUMENTO FISCAL"));
        assert!(content.contains("width: 80mm"));
    }

    #[test]
    fn thermal_receipt_shows_discount_when_present() {
        let template = ReceiptThermalTemplate::new();
        let content = template.generate(&sample_context(30.0)).unwrap();
        assert!(content.contains("Desconto"));
        assert!(content.contains("-R\\$ 30,00"));
        assert!(content.contains("R\\$ 270,00"));
    }
}
