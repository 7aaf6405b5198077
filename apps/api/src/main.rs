mod chat;
mod config;
mod db;
mod email;
mod errors;
mod extract;
mod llm_client;
mod models;
mod repository;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::email::mailer::{LogMailer, Mailer, SmtpMailer};
use crate::llm_client::{Completer, NullCompleter, OpenAiCompleter};
use crate::repository::{PgEmailLogRepository, PgResumeRepository};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_chat_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume-chat API v{}", env!("CARGO_PKG_VERSION"));

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let completer: Arc<dyn Completer> = match &config.openai_api_key {
        Some(key) => {
            info!("completion service configured (model: {})", llm_client::MODEL);
            Arc::new(OpenAiCompleter::new(key.clone()))
        }
        None => {
            info!("no completion service configured; chat degrades to verbatim matches");
            Arc::new(NullCompleter)
        }
    };

    let mailer: Arc<dyn Mailer> = match config.smtp.clone() {
        Some(smtp) => {
            info!("SMTP transport configured ({})", smtp.host);
            Arc::new(SmtpMailer::new(smtp))
        }
        None => {
            info!("no SMTP transport configured; email sends are logged only");
            Arc::new(LogMailer)
        }
    };

    let state = AppState {
        resumes: Arc::new(PgResumeRepository::new(pool.clone())),
        email_logs: Arc::new(PgEmailLogRepository::new(pool)),
        completer,
        mailer,
    };

    let app = build_router(state, config.max_file_size)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
