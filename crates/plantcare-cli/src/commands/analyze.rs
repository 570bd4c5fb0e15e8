//! One-shot requests that bypass the chat transcript.

use crate::bootstrap::{AppContext, image_ref};
use anyhow::{Result, bail};
use plantcare_core::analysis::format_report;
use plantcare_core::client::{ImageUpload, PlantCareClient};
use plantcare_core::texts;
use std::path::Path;

/// Analyzes a photo and prints the full report.
pub async fn run(ctx: &AppContext, path: &Path, notes: Option<&str>) -> Result<()> {
    let client = ctx.client()?;
    let notes = notes
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(texts::IMAGE_CAPTION_PLACEHOLDER);

    let result = match client
        .analyze_plant(&ImageUpload::jpeg(image_ref(path)?), notes)
        .await
    {
        Ok(result) => result,
        Err(e) => bail!("{}: {}", texts::ANALYSIS_GENERIC_FAILURE, e),
    };

    if !result.success {
        bail!(
            "{}",
            result
                .error
                .as_deref()
                .filter(|e| !e.trim().is_empty())
                .unwrap_or(texts::ANALYSIS_GENERIC_FAILURE)
        );
    }

    println!("{}", format_report(&result));
    Ok(())
}

pub async fn health(ctx: &AppContext) -> Result<()> {
    let status = ctx.client()?.health().await?;
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

pub async fn capabilities(ctx: &AppContext) -> Result<()> {
    let capabilities = ctx.client()?.capabilities().await?;
    println!("{}", serde_json::to_string_pretty(&capabilities)?);
    Ok(())
}
