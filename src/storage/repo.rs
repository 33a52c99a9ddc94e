//! Repositório SQLite. Todas as consultas são escopadas por `store_id`;
//! um registro de outra loja responde como inexistente.

use chrono::{Datelike, Duration, Local, NaiveDate};
use sqlx::{Executor, SqlitePool};

use crate::core::{DomainError, DomainResult};
use crate::finance::{plan_settlement, ScheduleAdjustment};
use crate::models::catalog::{LensRecord, Product};
use crate::models::financing::{
    Financing, FinancingInput, FinancingWithInstallments, Installment, InstallmentStatus,
    ReceiveInstallmentInput,
};
use crate::models::payable::{Bill, BillInput, PayBillInput, PaymentSource};
use crate::models::report::{summarize_items, ReportQuery, SalesReportRow};
use crate::models::sale::{
    Customer, NewItem, NewPayment, NewSale, Payment, Sale, SaleBundle, SaleItem, SaleStatus,
};
use crate::models::ReceiptBundle;
use crate::templates::helpers::parse_brl_amount;

/// Cria o esquema quando não existe. Em `sqlite::memory:` isso é o setup
/// de cada teste; em disco é idempotente.
pub async fn init_schema(pool: &SqlitePool) -> DomainResult<()> {
    pool.execute(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL,
            full_name TEXT NOT NULL,
            cpf TEXT,
            fone_movel TEXT
        );
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL,
            full_name TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS vendas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL,
            customer_id INTEGER,
            employee_id INTEGER,
            status TEXT NOT NULL DEFAULT 'Em Aberto',
            valor_total REAL NOT NULL DEFAULT 0,
            valor_desconto REAL NOT NULL DEFAULT 0,
            valor_final REAL NOT NULL DEFAULT 0,
            valor_restante REAL NOT NULL DEFAULT 0,
            obs TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE IF NOT EXISTS venda_itens (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            venda_id INTEGER NOT NULL REFERENCES vendas(id),
            store_id INTEGER NOT NULL,
            item_tipo TEXT NOT NULL,
            descricao TEXT NOT NULL,
            quantidade REAL NOT NULL,
            valor_unitario REAL NOT NULL,
            valor_total_item REAL NOT NULL
        );
        CREATE TABLE IF NOT EXISTS pagamentos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            venda_id INTEGER NOT NULL REFERENCES vendas(id),
            store_id INTEGER NOT NULL,
            forma_pagamento TEXT NOT NULL,
            valor_pago REAL NOT NULL,
            parcelas INTEGER NOT NULL DEFAULT 1,
            data_pagamento TEXT NOT NULL,
            obs TEXT,
            impresso INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE IF NOT EXISTS contas_pagar (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL,
            due_date TEXT NOT NULL,
            category TEXT,
            supplier_id INTEGER,
            status TEXT NOT NULL DEFAULT 'Pendente',
            amount_paid REAL,
            payment_date TEXT
        );
        CREATE TABLE IF NOT EXISTS caixa_diario (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL,
            status TEXT NOT NULL DEFAULT 'Aberto',
            data_abertura TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS caixa_movimentacoes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            caixa_id INTEGER NOT NULL REFERENCES caixa_diario(id),
            store_id INTEGER NOT NULL,
            tipo TEXT NOT NULL,
            valor REAL NOT NULL,
            descricao TEXT NOT NULL,
            categoria TEXT,
            forma_pagamento TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE TABLE IF NOT EXISTS financiamento_loja (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            venda_id INTEGER NOT NULL REFERENCES vendas(id),
            store_id INTEGER NOT NULL,
            customer_id INTEGER,
            valor_total_financiado REAL NOT NULL,
            quantidade_parcelas INTEGER NOT NULL,
            data_inicio TEXT NOT NULL,
            obs TEXT
        );
        CREATE TABLE IF NOT EXISTS financiamento_parcelas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            financiamento_id INTEGER NOT NULL REFERENCES financiamento_loja(id),
            store_id INTEGER NOT NULL,
            customer_id INTEGER,
            numero_parcela INTEGER NOT NULL,
            data_vencimento TEXT NOT NULL,
            valor_parcela REAL NOT NULL,
            status TEXT NOT NULL DEFAULT 'Pendente',
            data_pagamento TEXT
        );
        CREATE TABLE IF NOT EXISTS produtos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id INTEGER NOT NULL,
            nome TEXT NOT NULL,
            tipo_produto TEXT NOT NULL,
            categoria TEXT,
            marca TEXT,
            preco_custo REAL NOT NULL DEFAULT 0,
            preco_venda REAL NOT NULL DEFAULT 0,
            estoque_atual REAL NOT NULL DEFAULT 0,
            estoque_minimo REAL NOT NULL DEFAULT 0,
            gerencia_estoque INTEGER NOT NULL DEFAULT 0,
            detalhes TEXT
        );
        "#,
    )
    .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Vendas
// ---------------------------------------------------------------------------

pub async fn create_sale(pool: &SqlitePool, store_id: i64, input: &NewSale) -> DomainResult<Sale> {
    let id = sqlx::query(
        "INSERT INTO vendas (store_id, customer_id, employee_id, status) VALUES (?, ?, ?, 'Em Aberto')",
    )
    .bind(store_id)
    .bind(input.customer_id)
    .bind(input.employee_id)
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_sale(pool, store_id, id).await
}

pub async fn get_sale(pool: &SqlitePool, store_id: i64, venda_id: i64) -> DomainResult<Sale> {
    sqlx::query_as::<_, Sale>("SELECT * FROM vendas WHERE id = ? AND store_id = ?")
        .bind(venda_id)
        .bind(store_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("venda {}", venda_id)))
}

/// Conjunto completo para a página da venda.
pub async fn get_sale_bundle(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
) -> DomainResult<SaleBundle> {
    let venda = get_sale(pool, store_id, venda_id).await?;

    let customer = match venda.customer_id {
        Some(cid) => {
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ? AND store_id = ?")
                .bind(cid)
                .bind(store_id)
                .fetch_optional(pool)
                .await?
        }
        None => None,
    };

    let itens = sqlx::query_as::<_, SaleItem>(
        "SELECT * FROM venda_itens WHERE venda_id = ? ORDER BY id",
    )
    .bind(venda_id)
    .fetch_all(pool)
    .await?;

    let pagamentos = sqlx::query_as::<_, Payment>(
        "SELECT * FROM pagamentos WHERE venda_id = ? ORDER BY id",
    )
    .bind(venda_id)
    .fetch_all(pool)
    .await?;

    let financiamento = get_financing(pool, store_id, venda_id).await?;

    Ok(SaleBundle {
        venda,
        customer,
        itens,
        pagamentos,
        financiamento,
    })
}

pub async fn add_item(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
    input: &NewItem,
) -> DomainResult<SaleItem> {
    if input.quantidade <= 0.0 {
        return Err(DomainError::validation("Quantidade deve ser maior que zero"));
    }
    if input.descricao.trim().is_empty() {
        return Err(DomainError::validation("Descrição do item obrigatória"));
    }
    get_sale(pool, store_id, venda_id).await?;

    let valor_total_item = input.quantidade * input.valor_unitario;
    let id = sqlx::query(
        "INSERT INTO venda_itens (venda_id, store_id, item_tipo, descricao, quantidade, valor_unitario, valor_total_item) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(venda_id)
    .bind(store_id)
    .bind(input.item_tipo)
    .bind(input.descricao.trim())
    .bind(input.quantidade)
    .bind(input.valor_unitario)
    .bind(valor_total_item)
    .execute(pool)
    .await?
    .last_insert_rowid();

    recalc_sale_totals(pool, venda_id).await?;

    let item = sqlx::query_as::<_, SaleItem>("SELECT * FROM venda_itens WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(item)
}

pub async fn delete_item(pool: &SqlitePool, store_id: i64, item_id: i64) -> DomainResult<()> {
    let venda_id: Option<i64> =
        sqlx::query_scalar("SELECT venda_id FROM venda_itens WHERE id = ? AND store_id = ?")
            .bind(item_id)
            .bind(store_id)
            .fetch_optional(pool)
            .await?;
    let venda_id = venda_id.ok_or_else(|| DomainError::not_found(format!("item {}", item_id)))?;

    sqlx::query("DELETE FROM venda_itens WHERE id = ?")
        .bind(item_id)
        .execute(pool)
        .await?;

    recalc_sale_totals(pool, venda_id).await
}

pub async fn add_payment(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
    input: &NewPayment,
) -> DomainResult<Payment> {
    let valor = parse_brl_amount(&input.valor_pago).map_err(DomainError::Validation)?;
    if valor <= 0.0 {
        return Err(DomainError::validation("Valor do pagamento deve ser maior que zero"));
    }
    if input.parcelas < 1 {
        return Err(DomainError::validation("Número de parcelas inválido"));
    }
    get_sale(pool, store_id, venda_id).await?;

    let id = sqlx::query(
        "INSERT INTO pagamentos (venda_id, store_id, forma_pagamento, valor_pago, parcelas, data_pagamento, obs) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(venda_id)
    .bind(store_id)
    .bind(&input.forma_pagamento)
    .bind(valor)
    .bind(input.parcelas)
    .bind(&input.data_pagamento)
    .bind(&input.obs)
    .execute(pool)
    .await?
    .last_insert_rowid();

    recalc_sale_totals(pool, venda_id).await?;

    let payment = sqlx::query_as::<_, Payment>("SELECT * FROM pagamentos WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(payment)
}

pub async fn delete_payment(pool: &SqlitePool, store_id: i64, payment_id: i64) -> DomainResult<()> {
    let venda_id: Option<i64> =
        sqlx::query_scalar("SELECT venda_id FROM pagamentos WHERE id = ? AND store_id = ?")
            .bind(payment_id)
            .bind(store_id)
            .fetch_optional(pool)
            .await?;
    let venda_id =
        venda_id.ok_or_else(|| DomainError::not_found(format!("pagamento {}", payment_id)))?;

    sqlx::query("DELETE FROM pagamentos WHERE id = ?")
        .bind(payment_id)
        .execute(pool)
        .await?;

    recalc_sale_totals(pool, venda_id).await
}

pub async fn update_status(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
    status: SaleStatus,
) -> DomainResult<Sale> {
    get_sale(pool, store_id, venda_id).await?;
    sqlx::query("UPDATE vendas SET status = ? WHERE id = ?")
        .bind(status)
        .bind(venda_id)
        .execute(pool)
        .await?;
    get_sale(pool, store_id, venda_id).await
}

pub async fn update_discount(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
    valor_desconto: f64,
) -> DomainResult<Sale> {
    if valor_desconto < 0.0 {
        return Err(DomainError::validation("Desconto não pode ser negativo"));
    }
    get_sale(pool, store_id, venda_id).await?;
    sqlx::query("UPDATE vendas SET valor_desconto = ? WHERE id = ?")
        .bind(valor_desconto)
        .bind(venda_id)
        .execute(pool)
        .await?;
    recalc_sale_totals(pool, venda_id).await?;
    get_sale(pool, store_id, venda_id).await
}

/// Marca o lote inteiro ou nada: falha no meio desfaz as marcações.
pub async fn mark_payments_printed(
    pool: &SqlitePool,
    store_id: i64,
    payment_ids: &[i64],
) -> DomainResult<u64> {
    let mut tx = pool.begin().await?;
    let mut marked = 0;
    for id in payment_ids {
        let result = sqlx::query(
            "UPDATE pagamentos SET impresso = 1 WHERE id = ? AND store_id = ?",
        )
        .bind(id)
        .bind(store_id)
        .execute(&mut *tx)
        .await?;
        marked += result.rows_affected();
    }
    tx.commit().await?;
    Ok(marked)
}

/// Recalcula os totais derivados da venda a partir dos itens e pagamentos.
pub async fn recalc_sale_totals(pool: &SqlitePool, venda_id: i64) -> DomainResult<()> {
    // venda sem itens soma NULL e o COALESCE devolve INTEGER; o CAST
    // garante REAL para o decode em f64
    let valor_total: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE(SUM(valor_total_item), 0) AS REAL) FROM venda_itens WHERE venda_id = ?",
    )
    .bind(venda_id)
    .fetch_one(pool)
    .await?;

    let valor_pago: f64 = sqlx::query_scalar(
        "SELECT CAST(COALESCE(SUM(valor_pago), 0) AS REAL) FROM pagamentos WHERE venda_id = ?",
    )
    .bind(venda_id)
    .fetch_one(pool)
    .await?;

    let valor_desconto: f64 =
        sqlx::query_scalar("SELECT valor_desconto FROM vendas WHERE id = ?")
            .bind(venda_id)
            .fetch_one(pool)
            .await?;

    let valor_final = valor_total - valor_desconto;
    let valor_restante = valor_final - valor_pago;

    sqlx::query(
        "UPDATE vendas SET valor_total = ?, valor_final = ?, valor_restante = ? WHERE id = ?",
    )
    .bind(valor_total)
    .bind(valor_final)
    .bind(valor_restante)
    .bind(venda_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Junta os registros persistidos para a emissão do recibo. Os pagamentos
/// precisam existir e pertencer à venda; lista vazia é erro de validação.
pub async fn receipt_bundle(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
    payment_ids: &[i64],
    is_reprint: bool,
) -> DomainResult<ReceiptBundle> {
    if payment_ids.is_empty() {
        return Err(DomainError::validation("Selecione ao menos um pagamento"));
    }

    let bundle = get_sale_bundle(pool, store_id, venda_id).await?;

    let mut pagamentos = Vec::with_capacity(payment_ids.len());
    for id in payment_ids {
        let payment = bundle
            .pagamentos
            .iter()
            .find(|p| p.id == *id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("pagamento {}", id)))?;
        pagamentos.push(payment);
    }

    Ok(ReceiptBundle {
        pagamentos,
        venda: bundle.venda,
        cliente: bundle.customer,
        itens: bundle.itens,
        is_reprint,
    })
}

// ---------------------------------------------------------------------------
// Contas a pagar
// ---------------------------------------------------------------------------

/// Janela do mês que contém `base_date` (hoje quando ausente).
fn month_window(base_date: Option<&str>) -> (String, String) {
    // prefixo por chars: fatiar bytes panica em datas com acento
    let base = base_date
        .and_then(|d| {
            let prefix: String = d.chars().take(10).collect();
            NaiveDate::parse_from_str(&prefix, "%Y-%m-%d").ok()
        })
        .unwrap_or_else(|| Local::now().date_naive());

    let first = base.with_day(1).unwrap_or(base);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month
        .map(|d| d - Duration::days(1))
        .unwrap_or(first);

    (
        first.format("%Y-%m-%d").to_string(),
        last.format("%Y-%m-%d").to_string(),
    )
}

pub async fn list_bills(
    pool: &SqlitePool,
    store_id: i64,
    base_date: Option<&str>,
) -> DomainResult<Vec<Bill>> {
    let (first, last) = month_window(base_date);
    let bills = sqlx::query_as::<_, Bill>(
        "SELECT * FROM contas_pagar WHERE store_id = ? AND due_date >= ? AND due_date <= ? \
         ORDER BY due_date ASC",
    )
    .bind(store_id)
    .bind(first)
    .bind(last)
    .fetch_all(pool)
    .await?;
    Ok(bills)
}

pub async fn save_bill(pool: &SqlitePool, store_id: i64, input: &BillInput) -> DomainResult<Bill> {
    input.validate().map_err(DomainError::Validation)?;

    let id = match input.id {
        Some(id) => {
            let result = sqlx::query(
                "UPDATE contas_pagar SET description = ?, amount = ?, due_date = ?, category = ?, supplier_id = ? \
                 WHERE id = ? AND store_id = ?",
            )
            .bind(input.description.trim())
            .bind(input.amount)
            .bind(&input.due_date)
            .bind(&input.category)
            .bind(input.supplier_id)
            .bind(id)
            .bind(store_id)
            .execute(pool)
            .await?;
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found(format!("conta {}", id)));
            }
            id
        }
        None => sqlx::query(
            "INSERT INTO contas_pagar (store_id, description, amount, due_date, category, supplier_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(store_id)
        .bind(input.description.trim())
        .bind(input.amount)
        .bind(&input.due_date)
        .bind(&input.category)
        .bind(input.supplier_id)
        .execute(pool)
        .await?
        .last_insert_rowid(),
    };

    let bill = sqlx::query_as::<_, Bill>("SELECT * FROM contas_pagar WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(bill)
}

async fn find_open_drawer(pool: &SqlitePool, store_id: i64, day: &str) -> DomainResult<Option<i64>> {
    let id = sqlx::query_scalar(
        "SELECT id FROM caixa_diario WHERE store_id = ? AND status = 'Aberto' AND data_abertura >= ? \
         ORDER BY id DESC LIMIT 1",
    )
    .bind(store_id)
    .bind(day)
    .fetch_optional(pool)
    .await?;
    Ok(id)
}

pub async fn open_drawer(pool: &SqlitePool, store_id: i64, day: &str) -> DomainResult<i64> {
    let id = sqlx::query("INSERT INTO caixa_diario (store_id, status, data_abertura) VALUES (?, 'Aberto', ?)")
        .bind(store_id)
        .bind(day)
        .execute(pool)
        .await?
        .last_insert_rowid();
    Ok(id)
}

/// Baixa a conta. Fonte `Caixa` exige caixa aberto hoje e registra a
/// sangria; `Banco` só atualiza a conta.
pub async fn pay_bill(pool: &SqlitePool, store_id: i64, input: &PayBillInput) -> DomainResult<Bill> {
    let bill = sqlx::query_as::<_, Bill>(
        "SELECT * FROM contas_pagar WHERE id = ? AND store_id = ?",
    )
    .bind(input.bill_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DomainError::not_found(format!("conta {}", input.bill_id)))?;

    if input.source == PaymentSource::Caixa {
        let hoje = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let caixa_id = find_open_drawer(pool, store_id, &hoje)
            .await?
            .ok_or(DomainError::DrawerClosed)?;

        sqlx::query(
            "INSERT INTO caixa_movimentacoes (caixa_id, store_id, tipo, valor, descricao, categoria, forma_pagamento) \
             VALUES (?, ?, 'Saida', ?, ?, 'Despesa Operacional', 'Dinheiro')",
        )
        .bind(caixa_id)
        .bind(store_id)
        .bind(input.amount_paid)
        .bind(format!("Pagto Conta: {}", bill.description))
        .execute(pool)
        .await?;
    }

    sqlx::query(
        "UPDATE contas_pagar SET status = 'Pago', amount_paid = ?, payment_date = ? WHERE id = ?",
    )
    .bind(input.amount_paid)
    .bind(&input.payment_date)
    .bind(input.bill_id)
    .execute(pool)
    .await?;

    let bill = sqlx::query_as::<_, Bill>("SELECT * FROM contas_pagar WHERE id = ?")
        .bind(input.bill_id)
        .fetch_one(pool)
        .await?;
    Ok(bill)
}

pub async fn delete_bill(pool: &SqlitePool, store_id: i64, bill_id: i64) -> DomainResult<()> {
    let result = sqlx::query("DELETE FROM contas_pagar WHERE id = ? AND store_id = ?")
        .bind(bill_id)
        .bind(store_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DomainError::not_found(format!("conta {}", bill_id)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Financiamento (carnê)
// ---------------------------------------------------------------------------

pub async fn get_financing(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
) -> DomainResult<Option<FinancingWithInstallments>> {
    let header = sqlx::query_as::<_, Financing>(
        "SELECT * FROM financiamento_loja WHERE venda_id = ? AND store_id = ?",
    )
    .bind(venda_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    let Some(header) = header else {
        return Ok(None);
    };

    let parcelas = sqlx::query_as::<_, Installment>(
        "SELECT * FROM financiamento_parcelas WHERE financiamento_id = ? ORDER BY numero_parcela, id",
    )
    .bind(header.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(FinancingWithInstallments { header, parcelas }))
}

/// Salva o cronograma. Venda sem carnê ganha um novo; com carnê existente
/// as parcelas entram depois das atuais (extensão) e o cabeçalho soma.
pub async fn save_financing(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
    input: &FinancingInput,
) -> DomainResult<FinancingWithInstallments> {
    if input.parcelas.is_empty() {
        return Err(DomainError::validation("Informe ao menos uma parcela"));
    }
    get_sale(pool, store_id, venda_id).await?;

    let existing = sqlx::query_as::<_, Financing>(
        "SELECT * FROM financiamento_loja WHERE venda_id = ? AND store_id = ?",
    )
    .bind(venda_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    let (financiamento_id, offset) = match existing {
        Some(header) => {
            let max_numero: i64 = sqlx::query_scalar(
                "SELECT COALESCE(MAX(numero_parcela), 0) FROM financiamento_parcelas WHERE financiamento_id = ?",
            )
            .bind(header.id)
            .fetch_one(pool)
            .await?;

            sqlx::query(
                "UPDATE financiamento_loja SET valor_total_financiado = valor_total_financiado + ?, \
                 quantidade_parcelas = quantidade_parcelas + ? WHERE id = ?",
            )
            .bind(input.valor_total_financiado)
            .bind(input.parcelas.len() as i64)
            .bind(header.id)
            .execute(pool)
            .await?;

            (header.id, max_numero)
        }
        None => {
            let id = sqlx::query(
                "INSERT INTO financiamento_loja (venda_id, store_id, customer_id, valor_total_financiado, quantidade_parcelas, data_inicio, obs) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(venda_id)
            .bind(store_id)
            .bind(input.customer_id)
            .bind(input.valor_total_financiado)
            .bind(input.parcelas.len() as i64)
            .bind(&input.data_inicio)
            .bind(&input.obs)
            .execute(pool)
            .await?
            .last_insert_rowid();
            (id, 0)
        }
    };

    for parcela in &input.parcelas {
        sqlx::query(
            "INSERT INTO financiamento_parcelas (financiamento_id, store_id, customer_id, numero_parcela, data_vencimento, valor_parcela, status) \
             VALUES (?, ?, ?, ?, ?, ?, 'Pendente')",
        )
        .bind(financiamento_id)
        .bind(store_id)
        .bind(input.customer_id)
        .bind(parcela.numero_parcela + offset)
        .bind(&parcela.data_vencimento)
        .bind(parcela.valor_parcela)
        .execute(pool)
        .await?;
    }

    get_financing(pool, store_id, venda_id)
        .await?
        .ok_or_else(|| DomainError::not_found("financiamento"))
}

/// Recebe uma parcela do carnê: registra o pagamento pelo valor cheio,
/// baixa a parcela pelo principal e resolve a diferença pela estratégia.
pub async fn receive_installment(
    pool: &SqlitePool,
    store_id: i64,
    venda_id: i64,
    input: &ReceiveInstallmentInput,
) -> DomainResult<()> {
    if input.valor_pago_total <= 0.0 {
        return Err(DomainError::validation("Valor recebido deve ser maior que zero"));
    }
    if input.valor_juros < 0.0 || input.valor_juros >= input.valor_pago_total {
        return Err(DomainError::validation("Valor de juros inválido"));
    }

    let parcela = sqlx::query_as::<_, Installment>(
        "SELECT * FROM financiamento_parcelas WHERE id = ? AND store_id = ?",
    )
    .bind(input.parcela_id)
    .bind(store_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DomainError::not_found(format!("parcela {}", input.parcela_id)))?;

    if parcela.status == InstallmentStatus::Pago {
        return Err(DomainError::validation("Parcela já está paga"));
    }

    let next_pending = sqlx::query_as::<_, Installment>(
        "SELECT * FROM financiamento_parcelas WHERE financiamento_id = ? AND numero_parcela > ? \
         AND status = 'Pendente' ORDER BY numero_parcela ASC LIMIT 1",
    )
    .bind(parcela.financiamento_id)
    .bind(parcela.numero_parcela)
    .fetch_optional(pool)
    .await?;

    let plan = plan_settlement(
        &parcela,
        next_pending.as_ref(),
        input.valor_pago_total,
        input.valor_juros,
        input.estrategia,
    );

    let mut tx = pool.begin().await?;

    // o caixa recebe o valor cheio, juros inclusos
    sqlx::query(
        "INSERT INTO pagamentos (venda_id, store_id, forma_pagamento, valor_pago, parcelas, data_pagamento, obs) \
         VALUES (?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(venda_id)
    .bind(store_id)
    .bind(&input.forma_pagamento)
    .bind(input.valor_pago_total)
    .bind(&input.data_pagamento)
    .bind(&plan.payment_obs)
    .execute(&mut *tx)
    .await?;

    // a parcela fica com o principal efetivamente abatido, para histórico
    sqlx::query(
        "UPDATE financiamento_parcelas SET status = 'Pago', data_pagamento = ?, valor_parcela = ? WHERE id = ?",
    )
    .bind(&input.data_pagamento)
    .bind(plan.principal_abatido)
    .bind(parcela.id)
    .execute(&mut *tx)
    .await?;

    match plan.adjustment {
        ScheduleAdjustment::None => {}
        ScheduleAdjustment::CreatePending {
            numero_parcela,
            data_vencimento,
            valor_parcela,
        } => {
            sqlx::query(
                "INSERT INTO financiamento_parcelas (financiamento_id, store_id, customer_id, numero_parcela, data_vencimento, valor_parcela, status) \
                 VALUES (?, ?, ?, ?, ?, ?, 'Pendente')",
            )
            .bind(parcela.financiamento_id)
            .bind(store_id)
            .bind(parcela.customer_id)
            .bind(numero_parcela)
            .bind(data_vencimento)
            .bind(valor_parcela)
            .execute(&mut *tx)
            .await?;
        }
        ScheduleAdjustment::Reprice {
            parcela_id,
            novo_valor,
        } => {
            sqlx::query("UPDATE financiamento_parcelas SET valor_parcela = ? WHERE id = ?")
                .bind(novo_valor)
                .bind(parcela_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;

    recalc_sale_totals(pool, venda_id).await
}

/// Apaga o cronograma pendente. Parcelas pagas ficam (renegociação): o
/// cabeçalho passa a somar só o que já foi pago.
pub async fn delete_financing(pool: &SqlitePool, store_id: i64, venda_id: i64) -> DomainResult<()> {
    let Some(financing) = get_financing(pool, store_id, venda_id).await? else {
        return Err(DomainError::not_found("financiamento"));
    };

    let has_paid = financing
        .parcelas
        .iter()
        .any(|p| p.status == InstallmentStatus::Pago);

    if has_paid {
        sqlx::query(
            "DELETE FROM financiamento_parcelas WHERE financiamento_id = ? AND status = 'Pendente'",
        )
        .bind(financing.header.id)
        .execute(pool)
        .await?;

        let total_pago: f64 = sqlx::query_scalar(
            "SELECT CAST(COALESCE(SUM(valor_parcela), 0) AS REAL) FROM financiamento_parcelas WHERE financiamento_id = ?",
        )
        .bind(financing.header.id)
        .fetch_one(pool)
        .await?;

        sqlx::query("UPDATE financiamento_loja SET valor_total_financiado = ? WHERE id = ?")
            .bind(total_pago)
            .bind(financing.header.id)
            .execute(pool)
            .await?;
    } else {
        sqlx::query("DELETE FROM financiamento_parcelas WHERE financiamento_id = ?")
            .bind(financing.header.id)
            .execute(pool)
            .await?;
        sqlx::query("DELETE FROM financiamento_loja WHERE id = ?")
            .bind(financing.header.id)
            .execute(pool)
            .await?;
    }

    recalc_sale_totals(pool, venda_id).await
}

// ---------------------------------------------------------------------------
// Importação de lentes
// ---------------------------------------------------------------------------

/// Upsert pela chave (loja, nome normalizado). Devolve o produto salvo e
/// `true` quando criou.
pub async fn upsert_lens(
    pool: &SqlitePool,
    store_id: i64,
    record: &LensRecord,
) -> DomainResult<(Product, bool)> {
    let nome = record.normalized_name();
    if nome.is_empty() {
        return Err(DomainError::validation("Nome da lente vazio"));
    }

    let detalhes = [
        ("Linha", record.linha.trim()),
        ("Material", record.material.trim()),
        ("Tipo", record.tipo_lente.trim()),
    ]
    .iter()
    .filter(|(_, v)| !v.is_empty())
    .map(|(k, v)| format!("{}: {}", k, v))
    .collect::<Vec<_>>()
    .join(" | ");
    let detalhes = (!detalhes.is_empty()).then_some(detalhes);

    let existing: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM produtos WHERE store_id = ? AND UPPER(TRIM(nome)) = ?",
    )
    .bind(store_id)
    .bind(&nome)
    .fetch_optional(pool)
    .await?;

    let (id, created) = match existing {
        Some(id) => {
            sqlx::query(
                "UPDATE produtos SET marca = ?, preco_custo = ?, preco_venda = ?, detalhes = ? WHERE id = ?",
            )
            .bind(record.marca.trim())
            .bind(record.preco_custo)
            .bind(record.preco_venda)
            .bind(&detalhes)
            .bind(id)
            .execute(pool)
            .await?;
            (id, false)
        }
        None => {
            let id = sqlx::query(
                "INSERT INTO produtos (store_id, nome, tipo_produto, categoria, marca, preco_custo, preco_venda, gerencia_estoque, detalhes) \
                 VALUES (?, ?, 'Lente', 'Lentes', ?, ?, ?, 0, ?)",
            )
            .bind(store_id)
            .bind(&nome)
            .bind(record.marca.trim())
            .bind(record.preco_custo)
            .bind(record.preco_venda)
            .bind(&detalhes)
            .execute(pool)
            .await?
            .last_insert_rowid();
            (id, true)
        }
    };

    let product = sqlx::query_as::<_, Product>("SELECT * FROM produtos WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok((product, created))
}

// ---------------------------------------------------------------------------
// Relatório de vendas
// ---------------------------------------------------------------------------

#[derive(sqlx::FromRow)]
struct ReportRowRaw {
    id: i64,
    created_at: String,
    cliente: Option<String>,
    vendedor: Option<String>,
    status: String,
    valor_total: f64,
    valor_desconto: f64,
    valor_final: f64,
    valor_restante: f64,
    tem_carne: i64,
}

pub async fn sales_report(
    pool: &SqlitePool,
    store_id: i64,
    query: &ReportQuery,
) -> DomainResult<Vec<SalesReportRow>> {
    let raw = sqlx::query_as::<_, ReportRowRaw>(
        "SELECT v.id, v.created_at, c.full_name AS cliente, e.full_name AS vendedor, \
                v.status, v.valor_total, v.valor_desconto, v.valor_final, v.valor_restante, \
                EXISTS(SELECT 1 FROM financiamento_loja f WHERE f.venda_id = v.id) AS tem_carne \
         FROM vendas v \
         LEFT JOIN customers c ON c.id = v.customer_id \
         LEFT JOIN employees e ON e.id = v.employee_id \
         WHERE v.store_id = ? AND substr(v.created_at, 1, 10) >= ? AND substr(v.created_at, 1, 10) <= ? \
         ORDER BY v.created_at DESC",
    )
    .bind(store_id)
    .bind(&query.data_inicio)
    .bind(&query.data_fim)
    .fetch_all(pool)
    .await?;

    let mut rows = Vec::with_capacity(raw.len());
    for r in raw {
        let descricoes: Vec<String> = sqlx::query_scalar(
            "SELECT descricao FROM venda_itens WHERE venda_id = ? ORDER BY id",
        )
        .bind(r.id)
        .fetch_all(pool)
        .await?;

        rows.push(SalesReportRow {
            id: r.id,
            data: r.created_at,
            cliente: r.cliente.unwrap_or_else(|| "Consumidor Final".to_string()),
            vendedor: r.vendedor.unwrap_or_else(|| "Não informado".to_string()),
            qtd_itens: descricoes.len() as i64,
            itens_resumo: summarize_items(&descricoes),
            status: r.status,
            valor_total: r.valor_total,
            valor_desconto: r.valor_desconto,
            valor_final: r.valor_final,
            valor_pago: r.valor_final - r.valor_restante,
            saldo_devedor: r.valor_restante,
            tem_carne: r.tem_carne != 0,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::financing::{InstallmentSpec, SettleStrategy};
    use crate::models::sale::ItemKind;
    use serde_json::json;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    fn item(descricao: &str, qtd: f64, unitario: f64) -> NewItem {
        NewItem {
            item_tipo: ItemKind::Lente,
            descricao: descricao.to_string(),
            quantidade: qtd,
            valor_unitario: unitario,
        }
    }

    fn payment(valor: serde_json::Value) -> NewPayment {
        NewPayment {
            forma_pagamento: "Dinheiro".to_string(),
            valor_pago: valor,
            parcelas: 1,
            data_pagamento: "2026-03-10".to_string(),
            obs: None,
        }
    }

    async fn sale_with_items(pool: &SqlitePool) -> Sale {
        let sale = create_sale(pool, 1, &NewSale { customer_id: None, employee_id: None })
            .await
            .unwrap();
        add_item(pool, 1, sale.id, &item("Lente", 2.0, 100.0)).await.unwrap();
        add_item(pool, 1, sale.id, &item("Armação", 1.0, 300.0)).await.unwrap();
        sale
    }

    #[actix_web::test]
    async fn totals_follow_items_payments_and_discount() {
        let pool = test_pool().await;
        let sale = sale_with_items(&pool).await;

        let v = get_sale(&pool, 1, sale.id).await.unwrap();
        assert_eq!(v.valor_total, 500.0);
        assert_eq!(v.valor_final, 500.0);
        assert_eq!(v.valor_restante, 500.0);

        update_discount(&pool, 1, sale.id, 50.0).await.unwrap();
        // entrada digitada no formato brasileiro
        add_payment(&pool, 1, sale.id, &payment(json!("150,00")))
            .await
            .unwrap();

        let v = get_sale(&pool, 1, sale.id).await.unwrap();
        assert_eq!(v.valor_final, 450.0);
        assert_eq!(v.valor_restante, 300.0);
    }

    #[actix_web::test]
    async fn first_mutation_on_empty_sale_recomputes_totals() {
        let pool = test_pool().await;
        let sale = create_sale(&pool, 1, &NewSale { customer_id: None, employee_id: None })
            .await
            .unwrap();

        // venda recém-criada: as somas de itens e pagamentos partem de NULL
        recalc_sale_totals(&pool, sale.id).await.unwrap();
        let v = get_sale(&pool, 1, sale.id).await.unwrap();
        assert_eq!(v.valor_total, 0.0);
        assert_eq!(v.valor_restante, 0.0);

        add_item(&pool, 1, sale.id, &item("Lente", 1.0, 100.0)).await.unwrap();
        let v = get_sale(&pool, 1, sale.id).await.unwrap();
        assert_eq!(v.valor_total, 100.0);
        assert_eq!(v.valor_restante, 100.0);
    }

    #[actix_web::test]
    async fn deleting_item_recomputes_totals() {
        let pool = test_pool().await;
        let sale = sale_with_items(&pool).await;

        let bundle = get_sale_bundle(&pool, 1, sale.id).await.unwrap();
        delete_item(&pool, 1, bundle.itens[0].id).await.unwrap();

        let v = get_sale(&pool, 1, sale.id).await.unwrap();
        assert_eq!(v.valor_total, 300.0);
    }

    #[actix_web::test]
    async fn marking_printed_updates_whole_batch() {
        let pool = test_pool().await;
        let sale = sale_with_items(&pool).await;
        let p1 = add_payment(&pool, 1, sale.id, &payment(json!(100.0))).await.unwrap();
        let p2 = add_payment(&pool, 1, sale.id, &payment(json!(50.0))).await.unwrap();

        // id inexistente não conta nem invalida o restante do lote
        let marked = mark_payments_printed(&pool, 1, &[p1.id, p2.id, 9999]).await.unwrap();
        assert_eq!(marked, 2);

        let bundle = get_sale_bundle(&pool, 1, sale.id).await.unwrap();
        assert!(bundle.pagamentos.iter().all(|p| p.impresso));
    }

    #[actix_web::test]
    async fn rejects_invalid_payment_amounts() {
        let pool = test_pool().await;
        let sale = sale_with_items(&pool).await;

        assert!(add_payment(&pool, 1, sale.id, &payment(json!(0.0))).await.is_err());
        assert!(add_payment(&pool, 1, sale.id, &payment(json!("abc"))).await.is_err());
    }

    #[actix_web::test]
    async fn other_store_records_are_invisible() {
        let pool = test_pool().await;
        let sale = sale_with_items(&pool).await;

        assert!(matches!(
            get_sale(&pool, 2, sale.id).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn bill_month_filter_uses_due_date_window() {
        let pool = test_pool().await;
        for due in ["2026-02-28", "2026-03-01", "2026-03-31", "2026-04-01"] {
            save_bill(
                &pool,
                1,
                &BillInput {
                    id: None,
                    description: format!("Conta {}", due),
                    amount: 10.0,
                    due_date: due.to_string(),
                    category: None,
                    supplier_id: None,
                },
            )
            .await
            .unwrap();
        }

        let march = list_bills(&pool, 1, Some("2026-03-15")).await.unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].due_date, "2026-03-01");
        assert_eq!(march[1].due_date, "2026-03-31");
    }

    #[actix_web::test]
    async fn month_filter_tolerates_accented_date_strings() {
        let pool = test_pool().await;
        // data ilegível (com acento cruzando o décimo byte) cai no mês
        // corrente em vez de derrubar a consulta
        let bills = list_bills(&pool, 1, Some("123456789é")).await.unwrap();
        assert!(bills.is_empty());
    }

    #[actix_web::test]
    async fn paying_from_drawer_requires_open_drawer() {
        let pool = test_pool().await;
        let bill = save_bill(
            &pool,
            1,
            &BillInput {
                id: None,
                description: "Energia".to_string(),
                amount: 200.0,
                due_date: "2026-03-10".to_string(),
                category: None,
                supplier_id: None,
            },
        )
        .await
        .unwrap();

        let input = PayBillInput {
            bill_id: bill.id,
            amount_paid: 200.0,
            payment_date: "2026-03-10".to_string(),
            source: PaymentSource::Caixa,
        };
        assert!(matches!(
            pay_bill(&pool, 1, &input).await,
            Err(DomainError::DrawerClosed)
        ));

        let hoje = Local::now().date_naive().format("%Y-%m-%d").to_string();
        open_drawer(&pool, 1, &hoje).await.unwrap();

        let paid = pay_bill(&pool, 1, &input).await.unwrap();
        assert_eq!(paid.status, crate::models::BillStatus::Pago);
        assert_eq!(paid.amount_paid, Some(200.0));

        let sangrias: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM caixa_movimentacoes WHERE tipo = 'Saida'",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(sangrias, 1);
    }

    #[actix_web::test]
    async fn bank_payment_skips_drawer() {
        let pool = test_pool().await;
        let bill = save_bill(
            &pool,
            1,
            &BillInput {
                id: None,
                description: "Aluguel".to_string(),
                amount: 1500.0,
                due_date: "2026-03-05".to_string(),
                category: None,
                supplier_id: None,
            },
        )
        .await
        .unwrap();

        pay_bill(
            &pool,
            1,
            &PayBillInput {
                bill_id: bill.id,
                amount_paid: 1500.0,
                payment_date: "2026-03-05".to_string(),
                source: PaymentSource::Banco,
            },
        )
        .await
        .unwrap();

        let sangrias: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM caixa_movimentacoes")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(sangrias, 0);
    }

    fn schedule(valores: &[f64]) -> FinancingInput {
        FinancingInput {
            customer_id: None,
            valor_total_financiado: valores.iter().sum(),
            data_inicio: "2026-03-10".to_string(),
            parcelas: valores
                .iter()
                .enumerate()
                .map(|(i, v)| InstallmentSpec {
                    numero_parcela: i as i64 + 1,
                    data_vencimento: format!("2026-{:02}-10", 4 + i),
                    valor_parcela: *v,
                })
                .collect(),
            obs: None,
        }
    }

    #[actix_web::test]
    async fn extending_financing_offsets_installment_numbers() {
        let pool = test_pool().await;
        let sale = sale_with_items(&pool).await;

        save_financing(&pool, 1, sale.id, &schedule(&[100.0, 100.0])).await.unwrap();
        let extended = save_financing(&pool, 1, sale.id, &schedule(&[50.0])).await.unwrap();

        assert_eq!(extended.header.quantidade_parcelas, 3);
        assert_eq!(extended.header.valor_total_financiado, 250.0);
        let numeros: Vec<i64> = extended.parcelas.iter().map(|p| p.numero_parcela).collect();
        assert_eq!(numeros, vec![1, 2, 3]);
    }

    #[actix_web::test]
    async fn receiving_installment_records_full_cash_and_principal() {
        let pool = test_pool().await;
        let sale = sale_with_items(&pool).await;
        let financing = save_financing(&pool, 1, sale.id, &schedule(&[100.0, 100.0]))
            .await
            .unwrap();

        // paga 60 com 10 de juros: abate 50, falta 50 que vai para a próxima
        receive_installment(
            &pool,
            1,
            sale.id,
            &ReceiveInstallmentInput {
                parcela_id: financing.parcelas[0].id,
                valor_pago_total: 60.0,
                valor_juros: 10.0,
                forma_pagamento: "Dinheiro".to_string(),
                data_pagamento: "2026-04-10".to_string(),
                estrategia: SettleStrategy::SomarProxima,
            },
        )
        .await
        .unwrap();

        let after = get_financing(&pool, 1, sale.id).await.unwrap().unwrap();
        assert_eq!(after.parcelas[0].status, InstallmentStatus::Pago);
        assert_eq!(after.parcelas[0].valor_parcela, 50.0);
        assert_eq!(after.parcelas[1].valor_parcela, 150.0);

        // o caixa recebeu o valor cheio
        let bundle = get_sale_bundle(&pool, 1, sale.id).await.unwrap();
        assert_eq!(bundle.pagamentos.len(), 1);
        assert_eq!(bundle.pagamentos[0].valor_pago, 60.0);
        assert!(bundle.pagamentos[0].obs.as_deref().unwrap().contains("Juros: 10.00"));

        assert!(matches!(
            receive_installment(
                &pool,
                1,
                sale.id,
                &ReceiveInstallmentInput {
                    parcela_id: financing.parcelas[0].id,
                    valor_pago_total: 60.0,
                    valor_juros: 0.0,
                    forma_pagamento: "Dinheiro".to_string(),
                    data_pagamento: "2026-04-11".to_string(),
                    estrategia: SettleStrategy::QuitacaoTotal,
                },
            )
            .await,
            Err(DomainError::Validation(_))
        ));
    }

    #[actix_web::test]
    async fn lens_import_upserts_by_normalized_name() {
        let pool = test_pool().await;

        let record = LensRecord {
            nome_completo: "  Lente CR-39 1.56  ".to_string(),
            marca: "Acme".to_string(),
            linha: "Conforto".to_string(),
            material: "Resina".to_string(),
            tipo_lente: "Visão simples".to_string(),
            preco_venda: 150.0,
            preco_custo: 60.0,
        };

        let (product, created) = upsert_lens(&pool, 1, &record).await.unwrap();
        assert!(created);
        assert_eq!(product.nome, "LENTE CR-39 1.56");
        assert_eq!(product.detalhes.as_deref(), Some("Linha: Conforto | Material: Resina | Tipo: Visão simples"));

        let mut updated = record.clone();
        updated.nome_completo = "lente cr-39 1.56".to_string();
        updated.preco_venda = 180.0;
        let (product, created) = upsert_lens(&pool, 1, &updated).await.unwrap();
        assert!(!created);
        assert_eq!(product.preco_venda, 180.0);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM produtos")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[actix_web::test]
    async fn report_flattens_sales_with_fallbacks() {
        let pool = test_pool().await;
        let sale = sale_with_items(&pool).await;
        add_payment(&pool, 1, sale.id, &payment(json!(200.0))).await.unwrap();
        save_financing(&pool, 1, sale.id, &schedule(&[300.0])).await.unwrap();

        let rows = sales_report(
            &pool,
            1,
            &ReportQuery {
                data_inicio: "2000-01-01".to_string(),
                data_fim: "2099-12-31".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.cliente, "Consumidor Final");
        assert_eq!(row.vendedor, "Não informado");
        assert_eq!(row.qtd_itens, 2);
        assert_eq!(row.valor_pago, 200.0);
        assert_eq!(row.saldo_devedor, 300.0);
        assert!(row.tem_carne);

        let empty = sales_report(
            &pool,
            1,
            &ReportQuery {
                data_inicio: "1990-01-01".to_string(),
                data_fim: "1990-12-31".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(empty.is_empty());
    }
}
