//! Discovery of available transform identifiers
//!
//! Two strategies exist and are never combined: asking the tool itself for
//! its list, or scanning a directory of transform sources. Identifier order
//! is presentation order only.

use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;

use crate::error::{Error, Result};
use crate::subprocess::{ProcessCommandBuilder, SubprocessManager};

#[async_trait]
pub trait Discover: Send + Sync {
    async fn discover(&self) -> Result<Vec<String>>;
}

/// Query strategy: run the tool with its list argument and parse stdout.
pub struct QueryDiscovery {
    subprocess: SubprocessManager,
    program: String,
    base_args: Vec<String>,
    list_argument: String,
    timeout: Option<Duration>,
}

impl QueryDiscovery {
    pub fn new(
        subprocess: SubprocessManager,
        program: String,
        base_args: Vec<String>,
        list_argument: String,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            subprocess,
            program,
            base_args,
            list_argument,
            timeout,
        }
    }
}

#[async_trait]
impl Discover for QueryDiscovery {
    async fn discover(&self) -> Result<Vec<String>> {
        let mut builder = ProcessCommandBuilder::new(&self.program)
            .args(&self.base_args)
            .arg(&self.list_argument);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let output = self
            .subprocess
            .runner()
            .run(builder.build())
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;

        if !output.status.success() {
            return Err(Error::Discovery(format!(
                "{} {} exited with code {}",
                self.program,
                self.list_argument,
                output.status.code().unwrap_or(-1)
            )));
        }

        let names = parse_transform_list(&output.stdout);
        tracing::debug!("Discovered {} transforms via query", names.len());
        Ok(names)
    }
}

/// Scan strategy: one transform per source file in the transforms directory.
pub struct ScanDiscovery {
    dir: PathBuf,
    extension: String,
}

impl ScanDiscovery {
    pub fn new(dir: PathBuf, extension: String) -> Self {
        Self { dir, extension }
    }
}

#[async_trait]
impl Discover for ScanDiscovery {
    async fn discover(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.dir).await.map_err(|e| {
            Error::Discovery(format!(
                "failed to read transforms directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?
        {
            let path = entry.path();
            let matches_extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == self.extension);
            if !matches_extension {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }

        // read_dir order is platform-dependent
        names.sort();
        tracing::debug!("Discovered {} transforms via scan", names.len());
        Ok(names)
    }
}

/// Parse the tool's comma-separated transform list, dropping empty tokens.
pub fn parse_transform_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
