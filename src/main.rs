use clap::{Parser, Subcommand};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

use morph::config::{InvocationStrategy, MorphConfig};
use morph::error::Error;
use morph::interaction::DefaultUserInteraction;
use morph::subprocess::SubprocessManager;
use morph::transform::{ToolRunner, TransformInvoker, TransformRequest, TransformRunner};

/// Pipe editor selections through named transforms
#[derive(Parser)]
#[command(name = "morph")]
#[command(about = "Pipe editor selections through named transforms", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Override the transform tool command
    #[arg(long, global = true)]
    tool: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available transforms
    List,
    /// Apply a transform to the selection read from stdin
    Apply {
        /// Transform to apply (interactive picker when omitted)
        name: Option<String>,

        /// Read the selection from a file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Use the legacy shell invocation strategy (unsafe)
        #[arg(long)]
        shell: bool,

        /// Subprocess timeout in seconds (0 disables)
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Write a starter morph.toml
    Init {
        /// Overwrite an existing morph.toml
        #[arg(long)]
        force: bool,

        /// Target directory (default: current directory)
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("morph started with verbosity level: {}", cli.verbose);

    let result = match cli.command {
        Commands::List => run_list(&cli).await,
        Commands::Apply {
            ref name,
            ref input,
            shell,
            timeout,
        } => run_apply(&cli, name.clone(), input.clone(), shell, timeout).await,
        Commands::Init { force, ref path } => {
            morph::init::run(morph::init::InitCommand {
                force,
                path: path.clone(),
            })
            .await
        }
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn load_config(cli: &Cli) -> anyhow::Result<MorphConfig> {
    let mut config = MorphConfig::load(cli.config.as_deref()).await?;
    if let Some(tool) = &cli.tool {
        config.tool = tool.clone();
    }
    Ok(config)
}

async fn run_list(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli).await?;
    let subprocess = SubprocessManager::production();
    let runner = ToolRunner::from_config(&config, subprocess)?;

    let names = runner.list_transforms().await?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

async fn run_apply(
    cli: &Cli,
    name: Option<String>,
    input: Option<PathBuf>,
    shell: bool,
    timeout: Option<u64>,
) -> anyhow::Result<()> {
    let mut config = load_config(cli).await?;
    if shell {
        config.invocation = InvocationStrategy::Shell;
    }
    if let Some(timeout_secs) = timeout {
        config.timeout_secs = timeout_secs;
    }

    let selection = read_selection(input).await?;

    let subprocess = SubprocessManager::production();
    let runner = Arc::new(ToolRunner::from_config(&config, subprocess)?);
    let interaction = Arc::new(DefaultUserInteraction::new());
    let invoker = TransformInvoker::new(runner, interaction, config.post_edit);

    let outcome = invoker
        .apply(TransformRequest {
            selection,
            transform: name,
        })
        .await?;

    debug!("Transform '{}' applied", outcome.transform);
    println!("{}", outcome.replacement);
    Ok(())
}

/// Capture the selection payload from the input file or stdin.
async fn read_selection(input: Option<PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) => {
            let selection = tokio::fs::read_to_string(&path)
                .await
                .map_err(|_| Error::NoInput)?;
            Ok(selection)
        }
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Err(Error::NoInput.into());
            }
            let mut selection = String::new();
            stdin.read_to_string(&mut selection).map_err(Error::Io)?;
            Ok(selection)
        }
    }
}
