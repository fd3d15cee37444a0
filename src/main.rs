use anyhow::{Context, Result};
use clap::Parser;
use meeting_markdown_export::{
    AppState, Config, DefaultMessages, ExportService, FsAttachmentStore, InMemoryExportStore,
    InMemoryMeetings,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "meeting-markdown-export", about = "Meeting Markdown export service")]
struct Args {
    /// Path to the config file (without extension)
    #[arg(long, default_value = "config/meeting-markdown-export")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Attachment storage: {}", cfg.storage.attachments_path);

    let meetings = Arc::new(InMemoryMeetings::new());
    let records = Arc::new(InMemoryExportStore::new(cfg.storage.dedicated_export_table));
    let attachments = Arc::new(FsAttachmentStore::new(&cfg.storage.attachments_path));
    let messages: Arc<dyn meeting_markdown_export::Messages> = Arc::new(DefaultMessages);
    let exports = Arc::new(
        ExportService::new(meetings.clone(), records, attachments, messages.clone()).await,
    );

    let state = AppState::new(meetings, exports, messages);
    let router = meeting_markdown_export::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, router)
        .await
        .context("HTTP server error")?;

    Ok(())
}
