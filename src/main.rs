use clap::Parser;
use tracing::{info, warn};

use vibe_sitegen::{cli, config, log, provider, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    // A missing .env is normal in production.
    dotenvy::dotenv().ok();

    log::init(args.debug)?;

    let cfg = config::Config::resolve(&args, |k| std::env::var(k).ok())?;
    if cfg.api_key.is_none() {
        warn!(
            var = cfg.provider.api_key_env(),
            "no API key configured; completion calls will be rejected upstream"
        );
    }

    let prov = provider::make_provider(&cfg)?;
    let app = server::router(server::AppState::new(prov));

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    info!(
        addr = %listener.local_addr()?,
        model = cfg.model(),
        provider = cfg.provider.label(),
        api_base = cfg.api_base(),
        "server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("shutdown requested");
        })
        .await?;

    Ok(())
}
