// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use conybot_core::Database;
use conybot_core::chat::{
    CompletionConfig, LineChatService, ReqwestCompletionTransport, WebChatService,
};
use conybot_core::persona::{LINE_PERSONA_FALLBACK, Persona, WEB_PERSONA_FALLBACK};
use conybot_core::repositories::{
    CouponStore, FileCouponStore, MemoryCouponStore, PostgresCouponStore,
};
use conybot_core::services::GameService;

mod config;
mod line;
mod routes;
mod state;

use config::Settings;
use line::LineClient;
use state::AppState;

#[derive(Parser, Debug, Clone)]
#[command(name = "conybot")]
#[command(author, version, about = "Cony assistant — persona chat, reward mini-game and coupons")]
struct Args {
    /// Address to which the HTTP server will bind
    #[arg(long, default_value = "0.0.0.0:8000")]
    bind: String,

    /// Coupon backing: "memory", "file" or "postgres"
    #[arg(long, default_value = "memory")]
    coupon_backend: String,

    /// Coupon file path (file backend only)
    #[arg(long, default_value = "coupons.json")]
    coupon_file: String,

    /// Postgres connection URL (postgres backend only)
    #[arg(long, default_value = "postgres://cony@localhost:5432/conybot")]
    database_url: String,

    /// Web persona prompt file; built-in fallback is used if absent
    #[arg(long, default_value = "prompts/web_prompt.txt")]
    web_prompt: String,

    /// LINE persona prompt file; built-in fallback is used if absent
    #[arg(long, default_value = "prompts/line_prompt.txt")]
    line_prompt: String,
}

fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("conybot=info".parse().unwrap_or_default())
        .add_directive("tower_http=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub).expect("Failed to set global subscriber");
}

async fn build_coupon_store(
    args: &Args,
    settings: &Settings,
) -> anyhow::Result<Arc<dyn CouponStore>> {
    match args.coupon_backend.as_str() {
        "memory" => Ok(Arc::new(MemoryCouponStore::new())),
        "file" => Ok(Arc::new(FileCouponStore::open(&args.coupon_file)?)),
        "postgres" => {
            let db = Database::new(&args.database_url).await?;
            db.migrate().await?;
            Ok(Arc::new(PostgresCouponStore::new(
                db.pool().clone(),
                settings.default_user_id.clone(),
            )))
        }
        other => anyhow::bail!("unknown coupon backend '{other}' (memory | file | postgres)"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let settings = Settings::from_env()?;
    info!("Starting {}", settings.app_name);

    let transport = Arc::new(ReqwestCompletionTransport::new());

    let mut completion_config =
        CompletionConfig::new(&settings.openai_api_base, &settings.openai_api_key);
    completion_config.user_id = settings.openai_user_id.clone();
    completion_config.app_title = settings.openai_app_title.clone();

    let web_persona = Persona::load(&args.web_prompt, WEB_PERSONA_FALLBACK);
    let line_persona = Persona::load(&args.line_prompt, LINE_PERSONA_FALLBACK);

    let coupons = build_coupon_store(&args, &settings).await?;
    info!("Coupon backend: {}", args.coupon_backend);

    let state = Arc::new(AppState {
        game: GameService::new(coupons.clone()),
        coupons,
        web_chat: WebChatService::new(
            transport.clone(),
            completion_config.clone(),
            web_persona,
        ),
        line_chat: LineChatService::new(transport, completion_config, line_persona),
        line_client: LineClient::new(
            settings.line_channel_access_token.clone(),
            settings.line_api_timeout,
        ),
        channel_secret: settings.line_channel_secret.clone(),
    });

    let app = routes::build_router(state);

    let addr: SocketAddr = args.bind.parse()?;
    info!("Listening on http://{}", addr);
    axum_server::Server::bind(addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
