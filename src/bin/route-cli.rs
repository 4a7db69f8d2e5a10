use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use route_host::admin::{audit_table, validate_new_route};
use route_host::config::{self, HostConfig};
use route_host::routing::ReservedPaths;
use route_host::store::RouteStore;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Offline management of the route-host route table", long_about = None)]
struct Cli {
    /// Configuration file (JSON or TOML) naming the route table and admin prefix.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route table
    List,
    /// Validate and append a route
    Add {
        /// Exact request path, starting with /
        path: String,
        /// proxy or redirect
        #[arg(value_name = "TYPE")]
        kind: String,
        /// Upstream base URL or redirect destination
        target: String,
    },
    /// Report entries that break table invariants
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let (config, _) = config::load_or_default(&cli.config)?;
    let store = RouteStore::new(config.storage.routes_path.clone());
    let reserved = reserved_for(&config);

    match cli.command {
        Commands::List => {
            let routes = load_for_cli(&store)?;
            if routes.is_empty() {
                println!("No routes in {}", store.path().display());
            }
            for route in routes {
                println!("{:<30} {:<10} {}", route.path, route.kind, route.target);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Add { path, kind, target } => {
            let mut routes = load_for_cli(&store)?;
            let route = match validate_new_route(&routes, &reserved, &path, &kind, &target) {
                Ok(route) => route,
                Err(e) => {
                    eprintln!("Rejected: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            };
            routes.push(route.clone());
            store.save(&routes)?;
            println!("Added {} -> {} ({})", route.path, route.target, route.kind);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => {
            let routes = store.try_load()?;
            let issues = audit_table(&routes, &reserved);
            if issues.is_empty() {
                println!("{} routes, no issues", routes.len());
                return Ok(ExitCode::SUCCESS);
            }
            for issue in &issues {
                println!("{issue}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn reserved_for(config: &HostConfig) -> ReservedPaths {
    ReservedPaths::admin(config.admin.prefix.clone())
}

/// Strict read, except that a table that does not exist yet is empty.
fn load_for_cli(store: &RouteStore) -> Result<Vec<route_host::store::Route>, Box<dyn std::error::Error>> {
    match store.try_load() {
        Ok(routes) => Ok(routes),
        Err(e) if e.is_missing() => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
