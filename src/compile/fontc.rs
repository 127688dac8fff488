//! Font compilation through the fontc command line compiler

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::debug;

pub struct FontCompiler {
    fontc: PathBuf,
}

impl FontCompiler {
    pub fn new(fontc: impl Into<PathBuf>) -> Self {
        Self {
            fontc: fontc.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.fontc
    }

    /// Compile a UFO to a TrueType font and return its bytes.
    ///
    /// fontc's intermediate files live in a temporary build directory that
    /// is removed afterwards.
    pub async fn compile(&self, ufo_path: &Path) -> Result<Vec<u8>> {
        let build_dir = tempfile::Builder::new()
            .prefix("glyphforge-build")
            .tempdir()
            .context("Failed to create build directory")?;
        let output_path = build_dir.path().join("font.ttf");

        self.compile_with_fontc(ufo_path, build_dir.path(), &output_path)
            .await?;

        let bytes = fs::read(&output_path).await.with_context(|| {
            format!("fontc did not produce {}", output_path.display())
        })?;
        debug!("fontc produced {} bytes", bytes.len());
        Ok(bytes)
    }

    async fn compile_with_fontc(
        &self,
        ufo_path: &Path,
        build_dir: &Path,
        output_path: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new(&self.fontc);
        cmd.arg(ufo_path)
            .arg("--build-dir")
            .arg(build_dir)
            .arg("--output-file")
            .arg(output_path);
        debug!("Running {:?}", cmd.as_std());

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.fontc.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("FontC compilation failed: {}", stderr));
        }

        Ok(())
    }
}
