//! Optional TrueType autohinting through ttfautohint

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

pub struct AutoHinter {
    ttfautohint: PathBuf,
}

impl AutoHinter {
    pub fn new(ttfautohint: impl Into<PathBuf>) -> Self {
        Self {
            ttfautohint: ttfautohint.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.ttfautohint
    }

    /// Hint a compiled TrueType font and return the hinted bytes
    pub async fn hint(&self, font: &[u8]) -> Result<Vec<u8>> {
        let work_dir = tempfile::Builder::new()
            .prefix("glyphforge-hint")
            .tempdir()
            .context("Failed to create autohint directory")?;
        let input = work_dir.path().join("unhinted.ttf");
        let output = work_dir.path().join("hinted.ttf");
        fs::write(&input, font).await?;

        let result = Command::new(&self.ttfautohint)
            .arg(&input)
            .arg(&output)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.ttfautohint.display()))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(anyhow!("ttfautohint failed: {}", stderr));
        }

        let hinted = fs::read(&output).await?;
        debug!("ttfautohint: {} -> {} bytes", font.len(), hinted.len());
        Ok(hinted)
    }
}
