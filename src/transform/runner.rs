//! The side-effecting seam between the invoker and the external tool
//!
//! Everything that spawns a process sits behind [`TransformRunner`] so the
//! whole flow can be driven against a mock in tests.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::{DiscoveryStrategy, InvocationStrategy, MorphConfig};
use crate::error::{Error, Result};
use crate::subprocess::{ProcessCommand, ProcessCommandBuilder, SubprocessManager};
use crate::transform::discovery::{Discover, QueryDiscovery, ScanDiscovery};

#[async_trait]
pub trait TransformRunner: Send + Sync {
    async fn list_transforms(&self) -> Result<Vec<String>>;

    /// Run one transform over already-encoded text, returning raw stdout.
    async fn run_transform(&self, id: &str, text: &str) -> Result<String>;
}

/// Runs transforms through the configured external tool.
pub struct ToolRunner {
    subprocess: SubprocessManager,
    discovery: Box<dyn Discover>,
    tool: String,
    program: String,
    base_args: Vec<String>,
    invocation: InvocationStrategy,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ToolRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRunner")
            .field("tool", &self.tool)
            .field("program", &self.program)
            .field("base_args", &self.base_args)
            .field("invocation", &self.invocation)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ToolRunner {
    pub fn from_config(config: &MorphConfig, subprocess: SubprocessManager) -> Result<Self> {
        let parts = shell_words::split(&config.tool)
            .map_err(|e| Error::Config(format!("invalid tool command {:?}: {e}", config.tool)))?;
        let (program, base_args) = parts
            .split_first()
            .map(|(head, tail)| (head.clone(), tail.to_vec()))
            .ok_or_else(|| Error::Config("tool command is empty".to_string()))?;

        let discovery: Box<dyn Discover> = match config.discovery {
            DiscoveryStrategy::Query => Box::new(QueryDiscovery::new(
                subprocess.clone(),
                program.clone(),
                base_args.clone(),
                config.list_argument.clone(),
                config.timeout(),
            )),
            DiscoveryStrategy::Scan => Box::new(ScanDiscovery::new(
                config.transforms_dir.clone(),
                config.extension.clone(),
            )),
        };

        Ok(Self {
            subprocess,
            discovery,
            tool: config.tool.clone(),
            program,
            base_args,
            invocation: config.invocation,
            timeout: config.timeout(),
        })
    }

    fn argv_command(&self, id: &str, text: &str) -> ProcessCommand {
        let mut builder = ProcessCommandBuilder::new(&self.program)
            .args(&self.base_args)
            .arg(id)
            .arg(text);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    /// Legacy command line: the tool, the identifier and the encoded text
    /// wrapped in double quotes, parsed by `sh`. Shell metacharacters that
    /// survive the literal escaping are interpreted by the shell here.
    fn shell_command(&self, id: &str, text: &str) -> ProcessCommand {
        let line = format!("{} {} \"{}\"", self.tool, id, text);
        let mut builder = ProcessCommandBuilder::new("sh").args(["-c", &line]);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

#[async_trait]
impl TransformRunner for ToolRunner {
    async fn list_transforms(&self) -> Result<Vec<String>> {
        self.discovery.discover().await
    }

    async fn run_transform(&self, id: &str, text: &str) -> Result<String> {
        let command = match self.invocation {
            InvocationStrategy::Argv => self.argv_command(id, text),
            InvocationStrategy::Shell => {
                tracing::warn!(
                    "shell invocation strategy is legacy and unsafe, prefer invocation = \"argv\""
                );
                self.shell_command(id, text)
            }
        };

        let output = self.subprocess.runner().run(command).await?;

        if !output.status.success() {
            let stderr = output.stderr.trim();
            let detail = if stderr.is_empty() {
                String::new()
            } else {
                format!(": {stderr}")
            };
            return Err(Error::Invocation(format!(
                "{} {} exited with code {}{detail}",
                self.tool,
                id,
                output.status.code().unwrap_or(-1)
            )));
        }

        Ok(output.stdout)
    }
}
