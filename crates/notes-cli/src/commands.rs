use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use notes_server::{NoteServer, ServerConfig};
use notes_store::FsNoteStore;

use crate::cli::Cli;

pub fn server_config(cli: &Cli) -> ServerConfig {
    ServerConfig {
        host: cli.host.clone(),
        port: cli.port,
        notes_root: cli.cache.clone(),
        ..ServerConfig::default()
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = server_config(&cli);
    let store = FsNoteStore::open(&config.notes_root)
        .with_context(|| format!("cannot open notes directory {}", config.notes_root.display()))?;

    let server = NoteServer::new(config, Arc::new(store));
    let listener = server
        .bind()
        .await
        .with_context(|| format!("cannot bind {}", server.config().authority()))?;

    println!(
        "{} Server is running on {}",
        "✓".green().bold(),
        format!("http://{}", server.config().authority()).bold()
    );
    server.serve(listener).await?;
    Ok(())
}
