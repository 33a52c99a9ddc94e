//! Regras de recebimento de parcela do carnê.
//!
//! A decisão é separada da persistência: aqui calculamos o plano (o que
//! baixar, o que criar, o que somar) e o repositório executa.

use chrono::{Duration, NaiveDate};

use crate::models::financing::{Installment, SettleStrategy};

/// Tolerância de centavos na comparação de valores.
pub const EPS: f64 = 0.01;

/// Ajuste no cronograma decorrente de um recebimento.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleAdjustment {
    /// Nada além da baixa da parcela.
    None,
    /// Parcela "filha" com o saldo que ficou faltando (ou nova parcela
    /// a +30 dias quando não há próxima para somar).
    CreatePending {
        numero_parcela: i64,
        data_vencimento: String,
        valor_parcela: f64,
    },
    /// Reescreve o valor de face de uma parcela pendente existente.
    Reprice { parcela_id: i64, novo_valor: f64 },
}

/// Plano completo do recebimento de uma parcela.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlePlan {
    /// Quanto da dívida foi de fato abatido (pago menos juros).
    pub principal_abatido: f64,
    /// Observação gravada no pagamento, detalhando principal e juros.
    pub payment_obs: String,
    pub adjustment: ScheduleAdjustment,
}

/// Calcula o plano de recebimento.
///
/// O dinheiro que entra no caixa é `valor_pago_total`; a dívida só cai
/// pelo principal (`valor_pago_total - valor_juros`). A diferença entre
/// o valor de face da parcela e o principal segue a estratégia escolhida;
/// pagamento a mais sempre amortiza a próxima pendente.
pub fn plan_settlement(
    parcela: &Installment,
    next_pending: Option<&Installment>,
    valor_pago_total: f64,
    valor_juros: f64,
    estrategia: SettleStrategy,
) -> SettlePlan {
    let principal = valor_pago_total - valor_juros;
    let diferenca = parcela.valor_parcela - principal;

    let payment_obs = format!(
        "Ref. Parcela {} (Principal: {:.2} + Juros: {:.2})",
        parcela.numero_parcela, principal, valor_juros
    );

    let adjustment = if diferenca > EPS {
        match estrategia {
            SettleStrategy::QuitacaoTotal => ScheduleAdjustment::None,
            SettleStrategy::CriarPendencia => ScheduleAdjustment::CreatePending {
                numero_parcela: parcela.numero_parcela,
                data_vencimento: parcela.data_vencimento.clone(),
                valor_parcela: diferenca,
            },
            SettleStrategy::SomarProxima => match next_pending {
                Some(prox) => ScheduleAdjustment::Reprice {
                    parcela_id: prox.id,
                    novo_valor: prox.valor_parcela + diferenca,
                },
                None => ScheduleAdjustment::CreatePending {
                    numero_parcela: parcela.numero_parcela + 1,
                    data_vencimento: add_days(&parcela.data_vencimento, 30),
                    valor_parcela: diferenca,
                },
            },
        }
    } else if diferenca < -EPS {
        let excedente = diferenca.abs();
        match next_pending {
            Some(prox) => ScheduleAdjustment::Reprice {
                parcela_id: prox.id,
                novo_valor: prox.valor_parcela - excedente,
            },
            None => ScheduleAdjustment::None,
        }
    } else {
        ScheduleAdjustment::None
    };

    SettlePlan {
        principal_abatido: principal,
        payment_obs,
        adjustment,
    }
}

fn add_days(date_str: &str, days: i64) -> String {
    // prefixo por chars: fatiar bytes panica em entradas com acento
    let prefix: String = date_str.chars().take(10).collect();
    match NaiveDate::parse_from_str(&prefix, "%Y-%m-%d") {
        Ok(date) => (date + Duration::days(days)).format("%Y-%m-%d").to_string(),
        Err(_) => date_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstallmentStatus;

    fn parcela(id: i64, numero: i64, valor: f64) -> Installment {
        Installment {
            id,
            financiamento_id: 1,
            store_id: 1,
            customer_id: Some(9),
            numero_parcela: numero,
            data_vencimento: "2026-04-10".to_string(),
            valor_parcela: valor,
            status: InstallmentStatus::Pendente,
            data_pagamento: None,
        }
    }

    #[test]
    fn interest_never_reduces_principal() {
        // parcela de 100, cliente paga 60 sendo 10 de juros
        let p = parcela(1, 1, 100.0);
        let plan = plan_settlement(&p, None, 60.0, 10.0, SettleStrategy::QuitacaoTotal);
        assert_eq!(plan.principal_abatido, 50.0);
        assert!(plan.payment_obs.contains("Principal: 50.00"));
        assert!(plan.payment_obs.contains("Juros: 10.00"));
    }

    #[test]
    fn quitacao_total_forgives_shortfall() {
        let p = parcela(1, 1, 100.0);
        let plan = plan_settlement(&p, None, 50.0, 0.0, SettleStrategy::QuitacaoTotal);
        assert_eq!(plan.adjustment, ScheduleAdjustment::None);
    }

    #[test]
    fn criar_pendencia_spawns_child_installment() {
        let p = parcela(1, 2, 100.0);
        let plan = plan_settlement(&p, None, 40.0, 0.0, SettleStrategy::CriarPendencia);
        assert_eq!(
            plan.adjustment,
            ScheduleAdjustment::CreatePending {
                numero_parcela: 2,
                data_vencimento: "2026-04-10".to_string(),
                valor_parcela: 60.0,
            }
        );
    }

    #[test]
    fn somar_proxima_reprices_next_pending() {
        let p = parcela(1, 1, 100.0);
        let prox = parcela(2, 2, 100.0);
        let plan = plan_settlement(&p, Some(&prox), 70.0, 0.0, SettleStrategy::SomarProxima);
        assert_eq!(
            plan.adjustment,
            ScheduleAdjustment::Reprice {
                parcela_id: 2,
                novo_valor: 130.0,
            }
        );
    }

    #[test]
    fn somar_proxima_without_next_creates_plus_30_days() {
        let p = parcela(1, 3, 100.0);
        let plan = plan_settlement(&p, None, 70.0, 0.0, SettleStrategy::SomarProxima);
        assert_eq!(
            plan.adjustment,
            ScheduleAdjustment::CreatePending {
                numero_parcela: 4,
                data_vencimento: "2026-05-10".to_string(),
                valor_parcela: 30.0,
            }
        );
    }

    #[test]
    fn overpayment_amortizes_next_regardless_of_strategy() {
        let p = parcela(1, 1, 100.0);
        let prox = parcela(2, 2, 100.0);
        let plan = plan_settlement(&p, Some(&prox), 150.0, 0.0, SettleStrategy::CriarPendencia);
        assert_eq!(
            plan.adjustment,
            ScheduleAdjustment::Reprice {
                parcela_id: 2,
                novo_valor: 50.0,
            }
        );
    }

    #[test]
    fn accented_due_date_passes_through_unchanged() {
        // vencimento ilegível (acento cruzando o décimo byte) não panica:
        // a data volta como veio e o resto do plano segue normal
        let mut p = parcela(1, 1, 100.0);
        p.data_vencimento = "2026-04-1é".to_string();
        let plan = plan_settlement(&p, None, 70.0, 0.0, SettleStrategy::SomarProxima);
        assert_eq!(
            plan.adjustment,
            ScheduleAdjustment::CreatePending {
                numero_parcela: 2,
                data_vencimento: "2026-04-1é".to_string(),
                valor_parcela: 30.0,
            }
        );
    }

    #[test]
    fn exact_payment_needs_no_adjustment() {
        let p = parcela(1, 1, 100.0);
        let plan = plan_settlement(&p, None, 100.0, 0.0, SettleStrategy::SomarProxima);
        assert_eq!(plan.adjustment, ScheduleAdjustment::None);
    }
}
