//! Upload subcommand handler

use std::path::Path;

use anyhow::{anyhow, Result};

use subseek::api::{Catalog, UploadRequest};
use subseek::notice::Notice;
use subseek::theme::current_theme;

use super::{backend, load_config};

/// Format a byte size as human-readable string.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::DECIMAL)
}

pub async fn handle(config_path: Option<&Path>, file: &Path, title: Option<String>) -> Result<()> {
    let request = UploadRequest::new(file, title).map_err(|err| anyhow!(Notice::upload_error(&err)))?;
    let config = load_config(config_path)?;
    let theme = current_theme();

    println!(
        "{}",
        theme.secondary_text(&format!(
            "Uploading {} ({})",
            request.path.display(),
            format_size(request.size_bytes)
        ))
    );

    let video = backend(&config)?
        .upload(&request)
        .await
        .map_err(|err| anyhow!(Notice::upload_error(&err)))?;

    println!(
        "{} {} {}",
        theme.success_text("Uploaded"),
        theme.primary_text(&video.title),
        theme.secondary_text(&format!("(id {})", video.id))
    );
    Ok(())
}
