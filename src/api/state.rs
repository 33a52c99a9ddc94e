use std::sync::Arc;

use governor::{clock::DefaultClock, state::keyed::DashMapStateStore, Quota, RateLimiter};
use sqlx::SqlitePool;

use crate::pdf::FormLayout;
use crate::storage;
use crate::templates::TemplateRegistry;

/// Limitador por chave (uma chave por loja).
pub type KeyedRateLimiter = Arc<RateLimiter<String, DashMapStateStore<String>, DefaultClock>>;

#[derive(Clone)]
pub struct ApiState {
    pub db: SqlitePool,
    pub templates: Arc<TemplateRegistry>,
    pub rate_limiter: KeyedRateLimiter,
    pub http: reqwest::Client,
    pub config: Arc<AppConfig>,
    /// Coordenadas do formulário pré-impresso, padrão ou carregadas de arquivo.
    pub layout: Arc<FormLayout>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub rate_limit_per_minute: u32,
    pub rate_limit_burst: u32,
    /// Nome e cidade da loja impressos em recibos e no Pix.
    pub store_name: String,
    pub store_city: String,
    pub pix_key: String,
    /// Token da API; vazio libera qualquer bearer não vazio (dev).
    pub api_token: String,
    pub temp_dir: String,
    /// Arquivo JSON com coordenadas do talão; vazio usa o padrão.
    pub layout_path: String,
    /// Arquivo de contexto do chat de suporte.
    pub tutorial_context_path: String,
    pub gemini_api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: "sqlite://otica.db?mode=rwc".to_string(),
            rate_limit_per_minute: 100,
            rate_limit_burst: 20,
            store_name: "Ótica".to_string(),
            store_city: "Sao Paulo".to_string(),
            pix_key: String::new(),
            api_token: String::new(),
            temp_dir: "temp".to_string(),
            layout_path: String::new(),
            tutorial_context_path: "PROJETO_COMPLETO_PARA_IA.txt".to_string(),
            gemini_api_key: String::new(),
        }
    }
}

impl ApiState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db = SqlitePool::connect(&config.database_url).await?;
        storage::init_schema(&db).await?;

        let quota = Quota::per_minute(
            std::num::NonZeroU32::new(config.rate_limit_per_minute.max(1)).unwrap(),
        )
        .allow_burst(std::num::NonZeroU32::new(config.rate_limit_burst.max(1)).unwrap());
        let rate_limiter = Arc::new(RateLimiter::dashmap_with_clock(
            quota,
            &DefaultClock::default(),
        ));

        let layout = if config.layout_path.is_empty() {
            FormLayout::default()
        } else {
            FormLayout::from_json_file(&config.layout_path)?
        };

        Ok(ApiState {
            db,
            templates: Arc::new(TemplateRegistry::new()),
            rate_limiter,
            http: reqwest::Client::new(),
            config: Arc::new(config),
            layout: Arc::new(layout),
        })
    }

    /// Estado para testes: banco em memória e configuração padrão.
    #[cfg(test)]
    pub async fn for_tests() -> Self {
        let db = SqlitePool::connect("sqlite::memory:").await.unwrap();
        storage::init_schema(&db).await.unwrap();

        let quota = Quota::per_minute(std::num::NonZeroU32::new(1000).unwrap());
        let rate_limiter = Arc::new(RateLimiter::dashmap_with_clock(
            quota,
            &DefaultClock::default(),
        ));

        ApiState {
            db,
            templates: Arc::new(TemplateRegistry::new()),
            rate_limiter,
            http: reqwest::Client::new(),
            config: Arc::new(AppConfig::default()),
            layout: Arc::new(FormLayout::default()),
        }
    }
}
