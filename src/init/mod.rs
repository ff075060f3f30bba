//! Starter configuration scaffolding
//!
//! `morph init` writes a commented `morph.toml` into the target directory so
//! a project can wire up its transform tool without reading the docs first.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tokio::fs;

const CONFIG_TEMPLATE: &str = r##"# morph configuration
#
# Command that runs the transform tool. May carry leading arguments,
# e.g. "elixir transforms/run.exs".
tool = "extra"

# Argument that makes the tool print its comma-separated transform list.
list_argument = "list_transforms"

# How transforms are discovered: "query" asks the tool itself,
# "scan" lists source files in transforms_dir.
discovery = "query"
transforms_dir = "transforms"
extension = "ex"

# How the tool is invoked. "argv" passes the selection as one argument and
# is the safe default. "shell" builds a single command line for `sh -c` and
# is kept only for legacy setups: shell metacharacters in the selection are
# interpreted by the shell.
invocation = "argv"

# Cosmetic pass over the replacement: "reindent", "reformat" or "none".
post_edit = "reindent"

# Subprocess bound in seconds. 0 disables the timeout.
timeout_secs = 30
"##;

pub struct InitCommand {
    pub force: bool,
    pub path: Option<PathBuf>,
}

pub async fn run(cmd: InitCommand) -> Result<()> {
    let dir = match cmd.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    let target = dir.join("morph.toml");
    if target.exists() && !cmd.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            target.display()
        );
    }

    fs::write(&target, CONFIG_TEMPLATE)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;

    println!("✅ Created {}", target.display());
    Ok(())
}
