mod client;
mod config;
mod probe;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use client::ServerClient;
use config::{Config, Context};

#[derive(Parser)]
#[command(name = "geodatactl")]
#[command(version, about = "Geodata command line tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Geodata server host
    #[arg(long)]
    host: Option<String>,

    /// Geodata server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Geodata server URL (overrides host and port)
    #[arg(long)]
    server_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify database connectivity with a one-shot probe query
    Probe(probe::ProbeArgs),

    /// Retrieve company data from a running server
    Company {
        /// Company registration number
        crn: String,

        /// Comma-separated field groups (e.g. dnb)
        #[arg(long, default_value = "")]
        groups: String,

        /// Emit the raw JSON response
        #[arg(short, long)]
        json: bool,
    },

    /// Check server health
    Health,

    /// Context management
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },
}

#[derive(Subcommand)]
enum ContextAction {
    /// List configured contexts
    List,

    /// Select the current context
    Use {
        /// Context name
        name: String,
    },

    /// Create or update a context
    Set {
        /// Context name
        name: String,

        /// Server URL for the context
        server_url: String,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

/// Resolve the server URL: explicit flags win, then the current context,
/// then the default local server.
fn resolve_server_url(cli: &Cli, config: &Config) -> String {
    if let Some(ref url) = cli.server_url {
        return url.trim_end_matches('/').to_string();
    }
    if cli.host.is_some() || cli.port.is_some() {
        let host = cli.host.clone().unwrap_or_else(|| "localhost".to_string());
        let port = cli.port.unwrap_or(8080);
        return format!("http://{host}:{port}");
    }
    if let Some((_, context)) = config.get_current_context() {
        return context.server_url.trim_end_matches('/').to_string();
    }
    "http://localhost:8080".to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::load().unwrap_or_default();
    let server_url = resolve_server_url(&cli, &config);
    tracing::debug!(%server_url, "Resolved server endpoint");

    match cli.command {
        Commands::Probe(args) => probe::run(&args).await,
        Commands::Company { crn, groups, json } => {
            let client = ServerClient::new(server_url);
            let response = client.retrieve_company(&crn, &groups).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("CRN:                {}", response.crn);
                println!("Name:               {}", response.company_name);
                if let Some(ref trade) = response.primary_trade {
                    println!("Primary trade:      {} ({})", trade.description, trade.code);
                }
                println!("Registered address: {}", response.registered_address);
                if let Some(ref dnb) = response.dnb {
                    println!("D&B:                {}", serde_json::to_string_pretty(dnb)?);
                }
            }
            Ok(())
        }
        Commands::Health => {
            let client = ServerClient::new(server_url);
            let health = client.health().await?;
            println!("status:   {}", health.status);
            if let Some(database) = health.database {
                println!("database: {database}");
            }
            if let Some(uptime) = health.uptime_seconds {
                println!("uptime:   {uptime}s");
            }
            if let Some(version) = health.version {
                println!("version:  {version}");
            }
            Ok(())
        }
        Commands::Context { action } => match action {
            ContextAction::List => {
                for (name, context) in &config.contexts {
                    let marker = if config.current_context.as_deref() == Some(name.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    println!("{marker} {name}\t{}", context.server_url);
                }
                Ok(())
            }
            ContextAction::Use { name } => {
                if !config.contexts.contains_key(&name) {
                    bail!("unknown context: {name}");
                }
                config.current_context = Some(name);
                config.save()
            }
            ContextAction::Set { name, server_url } => {
                config
                    .contexts
                    .insert(name.clone(), Context { server_url });
                if config.current_context.is_none() {
                    config.current_context = Some(name);
                }
                config.save()
            }
        },
    }
}
