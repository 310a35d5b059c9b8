use std::sync::Arc;

use coach_carter::backend::{BackendGateway, HttpGateway};
use coach_carter::channels::CliChannel;
use coach_carter::config::ClientConfig;
use coach_carter::conversation::Conversation;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the chat on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;

    eprintln!("🏋️ Coach Carter v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.api_base);
    eprintln!("   Mode: {}", config.chat_mode);
    eprintln!("   Type your answers and press Enter. /help for commands, /quit to exit.\n");

    let gateway: Arc<dyn BackendGateway> = Arc::new(HttpGateway::new(&config));
    let conversation = Conversation::new(gateway, &config);

    CliChannel::new(conversation).run().await?;

    Ok(())
}
