use anyhow::Result;
use cbtc_sim::app::dto::SimulateRequest;
use cbtc_sim::cli;
use cbtc_sim::domain::config::AsymmetricMode;
use cbtc_sim::server::http;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "cbtc",
    version,
    about = "Cone-based topology control simulator for wireless multi-hop networks"
)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one configuration and report the resulting topology
    Run {
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Run the scenario suite on one shared network
    Compare {
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Serve the simulator over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Debug, Args)]
struct SimArgs {
    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON layout file with explicit node positions
    #[arg(long)]
    layout: Option<PathBuf>,
    #[arg(long)]
    node_count: Option<usize>,
    #[arg(long)]
    radius: Option<f64>,
    /// Cone angle in radians, or a pi expression such as 2pi/3
    #[arg(long, value_parser = cli::parse_angle)]
    cone_angle: Option<f64>,
    #[arg(long)]
    shrink_back: bool,
    #[arg(long, value_enum)]
    asymmetric_mode: Option<AsymmetricMode>,
    #[arg(long)]
    path_loss_exponent: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    area_size: Option<f64>,
    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

impl SimArgs {
    fn request(&self) -> Result<SimulateRequest> {
        let mut req = cli::load_request(self.config.as_deref(), self.layout.as_deref())?;
        let c = &mut req.config;
        if let Some(v) = self.node_count {
            c.node_count = v;
        }
        if let Some(v) = self.radius {
            c.transmission_radius = v;
        }
        if let Some(v) = self.cone_angle {
            c.cone_angle = v;
        }
        if self.shrink_back {
            c.shrink_back = true;
        }
        if let Some(v) = self.asymmetric_mode {
            c.asymmetric_mode = v;
        }
        if let Some(v) = self.path_loss_exponent {
            c.path_loss_exponent = v;
        }
        if let Some(v) = self.seed {
            c.random_seed = v;
        }
        if let Some(v) = self.area_size {
            c.area_size = v;
        }
        Ok(req)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Run { sim } => cli::run_simulation(sim.request()?, sim.json),
        Command::Compare { sim } => cli::run_comparison(sim.request()?, sim.json),
        Command::Serve { host, port } => {
            let addr: SocketAddr = format!("{host}:{port}").parse()?;
            http::serve(addr).await
        }
    }
}
