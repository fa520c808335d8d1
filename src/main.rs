use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use product_showroom::relay::{ContactRelay, WebhookMailer};
use product_showroom::server::{self, AppState};
use product_showroom::traits::AssetSource;
use product_showroom::{Showroom, SiteConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!("Starting product showroom");

    let config = SiteConfig::from_env()?;
    let source = config.asset_source()?;
    info!("Serving assets from {}", source.name());

    let showroom = Showroom::new(source, config.product_template.clone(), config.overview_trust);
    let relay = ContactRelay::new(
        Arc::new(WebhookMailer::new(config.mail_webhook_url.clone())),
        config.contact_recipient.clone(),
        config.contact_redirect_page.clone(),
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    server::serve(listener, AppState { showroom, relay }).await
}
