use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use otica_backoffice::api::{configure_routes, ApiState, AppConfig};
use std::env;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Iniciando API Gestão Ótica");

    prometheus::default_registry().register(Box::new(
        prometheus::process_collector::ProcessCollector::for_self(),
    ))?;

    let config = load_config()?;
    let state = web::Data::new(ApiState::new(config).await?);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()?;

    tracing::info!("Servidor em {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let defaults = AppConfig::default();
    let config = AppConfig {
        database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
        rate_limit_per_minute: env::var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|_| "100".to_string())
            .parse()?,
        rate_limit_burst: env::var("RATE_LIMIT_BURST")
            .unwrap_or_else(|_| "20".to_string())
            .parse()?,
        store_name: env::var("STORE_NAME").unwrap_or(defaults.store_name),
        store_city: env::var("STORE_CITY").unwrap_or(defaults.store_city),
        pix_key: env::var("PIX_KEY").unwrap_or_default(),
        api_token: env::var("API_TOKEN").unwrap_or_default(),
        temp_dir: env::var("TEMP_DIR").unwrap_or(defaults.temp_dir),
        layout_path: env::var("RECEIPT_LAYOUT_PATH").unwrap_or_default(),
        tutorial_context_path: env::var("TUTORIAL_CONTEXT_PATH")
            .unwrap_or(defaults.tutorial_context_path),
        gemini_api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
    };

    Ok(config)
}
