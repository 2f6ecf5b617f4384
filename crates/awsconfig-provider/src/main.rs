//! awsconfig-provider: manage the AWS Config recorder and delivery channel
//!
//! Plays the host orchestrator's role for the `aws_config` resource: reads
//! the desired attributes from a JSON file, calls the create/read/update/
//! delete callbacks, and keeps the observed state in a JSON state file.

use anyhow::{Context, Result};
use awsconfig_common::defaults::{
    CONFIG_NAME, DEFAULT_REGION, DEFAULT_RETRY_DELAY_MS, DEFAULT_RETRY_MAX_ATTEMPTS,
};
use awsconfig_common::resource_schema;
use awsconfig_provider::aws::{ConfigServiceClient, get_current_account_id};
use awsconfig_provider::config::ProviderConfig;
use awsconfig_provider::state_file::{load_resource_config, save_state, tracked_id};
use awsconfig_provider::{ConfigRecorderResource, ResourceError};
use clap::{Parser, Subcommand};
use garde::Validate;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "awsconfig-provider")]
#[command(about = "Manage the AWS Config recorder and delivery channel")]
#[command(version)]
struct Args {
    /// AWS region
    #[arg(long, global = true, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// AWS profile to use (overrides default credential resolution)
    #[arg(long, global = true, env = "AWS_PROFILE")]
    aws_profile: Option<String>,

    /// Total attempts for the delivery channel put during create
    #[arg(long, global = true, default_value_t = DEFAULT_RETRY_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Delay between delivery channel put attempts, in milliseconds
    #[arg(long, global = true, default_value_t = DEFAULT_RETRY_DELAY_MS)]
    retry_delay_ms: u64,

    #[command(subcommand)]
    command: Command,
}

impl From<&Args> for ProviderConfig {
    fn from(args: &Args) -> Self {
        Self {
            region: args.region.clone(),
            aws_profile: args.aws_profile.clone(),
            max_attempts: args.max_attempts,
            retry_delay_ms: args.retry_delay_ms,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the recorder and channel, or update them to match the config
    Apply {
        /// JSON file with the resource attributes
        #[arg(short, long)]
        config: PathBuf,

        /// JSON state file (created, rewritten or removed)
        #[arg(short, long, default_value = "aws_config.state.json")]
        state: PathBuf,
    },

    /// Re-read the recorder and channel from AWS into the state file
    Refresh {
        #[arg(short, long, default_value = "aws_config.state.json")]
        state: PathBuf,
    },

    /// Stop recording and delete the delivery channel
    Destroy {
        #[arg(short, long, default_value = "aws_config.state.json")]
        state: PathBuf,
    },

    /// Show whether the recorder is currently recording
    Status,

    /// Print the resource schema as JSON
    Schema,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    let suggestion = e
        .downcast_ref::<ResourceError>()
        .and_then(ResourceError::aws_error)
        .and_then(|aws| aws.suggestion());
    if let Some(suggestion) = suggestion {
        let _ = writeln!(stderr, "\n\x1b[36mHint:\x1b[0m {suggestion}");
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let resource = match &args.command {
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&resource_schema())?);
            return Ok(());
        }
        _ => connect(&ProviderConfig::from(&args)).await?,
    };

    match &args.command {
        Command::Apply { config, state } => handle_apply(&resource, config, state).await?,
        Command::Refresh { state } => handle_refresh(&resource, state).await?,
        Command::Destroy { state } => handle_destroy(&resource, state).await?,
        Command::Status => handle_status(resource.client()).await?,
        Command::Schema => {}
    }

    Ok(())
}

/// Validate the provider configuration, check credentials and build the handler
async fn connect(config: &ProviderConfig) -> Result<ConfigRecorderResource<ConfigServiceClient>> {
    config.validate().context("Invalid provider configuration")?;

    if let Some(profile) = &config.aws_profile {
        info!(profile = %profile, "Using AWS profile");
    }

    let aws = config.aws_context().await;
    get_current_account_id(&aws).await?;
    Ok(config.resource(&aws))
}

/// Handle the apply command
async fn handle_apply(
    resource: &ConfigRecorderResource<ConfigServiceClient>,
    config_path: &Path,
    state_path: &Path,
) -> Result<()> {
    let desired = load_resource_config(config_path)?;
    let observed = match tracked_id(state_path)? {
        Some(id) => {
            info!(id = %id, "Updating existing aws_config resource");
            resource.update(&id, &desired).await?
        }
        None => {
            info!("Creating aws_config resource");
            Some(resource.create(&desired).await?)
        }
    };

    save_state(state_path, observed.as_ref())?;
    match observed {
        Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
        None => println!(
            "aws_config no longer exists remotely; state removed, apply again to recreate it"
        ),
    }
    Ok(())
}

/// Handle the refresh command
async fn handle_refresh(
    resource: &ConfigRecorderResource<ConfigServiceClient>,
    state_path: &Path,
) -> Result<()> {
    let Some(id) = tracked_id(state_path)? else {
        println!("No aws_config resource tracked in {}", state_path.display());
        return Ok(());
    };

    let observed = resource.read(&id).await?;
    save_state(state_path, observed.as_ref())?;

    match observed {
        Some(state) => println!("{}", serde_json::to_string_pretty(&state)?),
        None => println!("aws_config {id} no longer exists; state removed"),
    }
    Ok(())
}

/// Handle the destroy command
async fn handle_destroy(
    resource: &ConfigRecorderResource<ConfigServiceClient>,
    state_path: &Path,
) -> Result<()> {
    let Some(id) = tracked_id(state_path)? else {
        println!("No aws_config resource tracked in {}", state_path.display());
        return Ok(());
    };

    resource.delete(&id).await?;
    save_state(state_path, None)?;

    println!("aws_config {id} destroyed");
    Ok(())
}

/// Handle the status command
async fn handle_status(client: &ConfigServiceClient) -> Result<()> {
    let status = client
        .describe_recorder_status(CONFIG_NAME)
        .await
        .context("Failed to describe configuration recorder status")?;

    match status {
        Some(status) => {
            println!("Recorder:    {}", status.name);
            println!("Recording:   {}", status.recording);
            println!(
                "Last status: {}",
                status.last_status.as_deref().unwrap_or("-")
            );
            if let Some(code) = &status.last_error_code {
                println!("Last error:  {code}");
            }
        }
        None => println!("No configuration recorder named {CONFIG_NAME:?}"),
    }
    Ok(())
}
