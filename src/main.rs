use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use waymark::config::Config;
use waymark::entities::TravelMode;
use waymark::error::Error;
use waymark::external::{DynRoutingApi, JourneyPlanner};
use waymark::{app, server, shell};

/// Plan a journey between UK postcodes.
#[derive(Debug, Parser)]
#[command(name = "waymark")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive planner: landing, route builder, results. The default.
    Shell,

    /// Calculate one journey and print the summary.
    Plan {
        /// Postcodes in travel order.
        #[arg(required = true)]
        postcodes: Vec<String>,

        #[arg(long, default_value_t = TravelMode::Driving)]
        mode: TravelMode,
    },

    /// Run the development proxy in front of the routing host.
    Proxy,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command.unwrap_or(Command::Shell)).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), Error> {
    let config = Config::from_env()?;

    match command {
        Command::Shell => shell::run(planner(&config)?).await,
        Command::Plan { postcodes, mode } => {
            let api = planner(&config)?;
            let summary = app::plan(api.as_ref(), &postcodes, mode).await?;
            println!("{}", summary);
            Ok(())
        }
        Command::Proxy => server::serve(&config).await,
    }
}

fn planner(config: &Config) -> Result<DynRoutingApi, Error> {
    let planner = JourneyPlanner::from_config(config)?;
    tracing::info!("routing requests go to {}", config.api_base());

    Ok(Arc::new(planner))
}
