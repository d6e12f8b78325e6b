//! weather-mcp: MCP server for Open-Meteo weather forecasts
//!
//! Serves the `weather` tool over SSE: clients subscribe at `/api/sse` and
//! post invocations to `/api/message`.

use clap::Parser;
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use weather_mcp::WeatherServer;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = SseServerConfig {
        bind: args.addr,
        sse_path: "/api/sse".to_string(),
        post_path: "/api/message".to_string(),
        ct: CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!(
        "weather-mcp listening on {} (events at /api/sse, messages at /api/message)",
        args.addr
    );

    let ct = SseServer::serve_with_config(config)
        .await?
        .with_service(WeatherServer::new);

    tokio::signal::ctrl_c().await?;
    tracing::info!("weather-mcp shutting down");
    ct.cancel();

    Ok(())
}
