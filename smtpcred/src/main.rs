//! smtpcred - SES SMTP credential provisioner
//!
//! Handles resource lifecycle events by deriving SES SMTP passwords and
//! storing SMTP credentials in SSM Parameter Store.

mod backend;
mod config;
mod router;

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use smtpcred_lifecycle::{LifecycleEvent, LifecycleResponse, LifecycleState};
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, HandlerSettings};

#[derive(Parser, Debug)]
#[command(name = "smtpcred")]
#[command(about = "SES SMTP credential provisioner", long_about = None)]
struct Args {
    /// Configuration file (defaults to ./smtpcred.toml when present)
    #[arg(long, global = true, env = "SMTPCRED_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info", env = "SMTPCRED_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the lifecycle endpoint over HTTP
    Serve(ServeArgs),
    /// Print the SMTP password for a secret access key
    Derive(DeriveArgs),
    /// Process a single lifecycle event and print the response
    Invoke(InvokeArgs),
}

#[derive(ClapArgs, Debug)]
struct HandlerArgs {
    /// Region the parameters live in and passwords are derived for
    #[arg(long, env = "SMTPCRED_REGION")]
    region: Option<String>,

    /// Parameter name prefix; parameters are stored at {prefix}/{kind}
    #[arg(long, env = "SMTPCRED_PARAMETER_PREFIX")]
    parameter_prefix: Option<String>,

    /// KMS key used to encrypt the parameters
    #[arg(long, env = "SMTPCRED_KMS_KEY_ID")]
    kms_key_id: Option<String>,
}

impl HandlerArgs {
    /// Flags override file settings
    fn merge(self, settings: HandlerSettings) -> HandlerSettings {
        HandlerSettings {
            region: self.region.or(settings.region),
            parameter_prefix: self.parameter_prefix.or(settings.parameter_prefix),
            kms_key_id: self.kms_key_id.or(settings.kms_key_id),
        }
    }
}

#[derive(ClapArgs, Debug)]
struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "SMTPCRED_PORT")]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "SMTPCRED_HOST")]
    host: Option<String>,

    #[command(flatten)]
    handler: HandlerArgs,
}

#[derive(ClapArgs, Debug)]
struct DeriveArgs {
    /// SES region the password is for
    #[arg(long, env = "SMTPCRED_REGION")]
    region: String,

    /// IAM secret access key
    #[arg(long, env = "SMTPCRED_SECRET_KEY", hide_env_values = true)]
    secret_key: String,
}

#[derive(ClapArgs, Debug)]
struct InvokeArgs {
    /// Event JSON file, or `-` for stdin
    #[arg(long, default_value = "-")]
    event: PathBuf,

    #[command(flatten)]
    handler: HandlerArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so command output stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("smtpcred={},tower_http=debug", args.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Serve(serve) => run_serve(args.config, serve).await,
        Command::Derive(derive) => run_derive(derive),
        Command::Invoke(invoke) => run_invoke(args.config, invoke).await,
    }
}

async fn run_serve(config_path: Option<PathBuf>, args: ServeArgs) -> anyhow::Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let settings = args.handler.merge(config.handler);
    let handler = backend::build_handler(settings, &config.backend).await?;

    let app = router::create_router(Arc::new(LifecycleState::new(handler)));

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn run_derive(args: DeriveArgs) -> anyhow::Result<()> {
    println!("{}", derive_password(args)?);
    Ok(())
}

async fn run_invoke(config_path: Option<PathBuf>, args: InvokeArgs) -> anyhow::Result<()> {
    let response = invoke_event(config_path, args).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn derive_password(args: DeriveArgs) -> anyhow::Result<String> {
    let secret_key = SecretString::from(args.secret_key);
    Ok(smtpcred_auth::derive_smtp_password(
        secret_key.expose_secret(),
        &args.region,
    )?)
}

/// Build a handler from config and flags, then run one event through it
async fn invoke_event(
    config_path: Option<PathBuf>,
    args: InvokeArgs,
) -> anyhow::Result<LifecycleResponse> {
    let config = Config::load(config_path.as_deref())?;
    let settings = args.handler.merge(config.handler);
    let handler = backend::build_handler(settings, &config.backend).await?;

    let raw = if args.event.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&args.event)
            .with_context(|| format!("reading event from {}", args.event.display()))?
    };

    let event: LifecycleEvent = serde_json::from_str(&raw).context("parsing lifecycle event")?;
    Ok(handler.handle(&event).await?)
}
