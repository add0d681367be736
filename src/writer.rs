// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Configuration file output

use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::types::Result;

/// Write buffer size
pub const WRITE_BUFFER_BYTES: usize = 8192;

/// Write `content` to `path` through a buffered writer, flushing before close
pub async fn save_config_file(content: &str, path: &Path) -> Result<()> {
    info!(
        "Saving configuration ({} characters) to: {}",
        content.chars().count(),
        path.display()
    );

    let file = tokio::fs::File::create(path).await.map_err(|e| {
        error!("Failed to create {}: {}", path.display(), e);
        e
    })?;

    let mut writer = tokio::io::BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
    writer.write_all(content.as_bytes()).await?;
    writer.flush().await?;
    writer.into_inner().sync_all().await?;

    info!("Configuration saved to {}", path.display());
    Ok(())
}
