use std::path::PathBuf;
use std::rc::Rc;

use anyhow::bail;
use clap::{Parser, Subcommand};

use constellation::config::{self, OpsConfig};
use constellation::core::models::SatelliteFactory;
use constellation::core::service::OperationsCenter;
use constellation::core::store::ConstellationStore;
use constellation::core::{Reporter, TracingReporter};
use constellation::logging;
use constellation::plan::FlightPlan;
use constellation::render::{render_status, ConsoleReporter};

#[derive(Parser)]
#[command(name = "constellation")]
#[command(about = "Operations center for satellite constellations")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print a line for every operation
    #[arg(long, global = true)]
    narrate: bool,

    /// Seed for random initial battery charges
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a flight plan (the built-in demo when no plan is given)
    Run {
        /// JSON flight plan
        #[arg(short, long)]
        plan: Option<PathBuf>,

        /// Print status snapshots as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };

    // Logging format comes from the config, so load it before the subscriber
    // exists and report a bad file afterwards.
    let loaded = OpsConfig::try_load_from(&config_path);
    let log_format = loaded
        .as_ref()
        .map(|c| c.log_format)
        .unwrap_or_default();
    logging::init(log_format);

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {:#}", e);
        OpsConfig::default()
    });
    if cli.narrate {
        config.narrate = true;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Some(Commands::Run { plan, json }) => run(&config, plan, json)?,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    bail!(
                        "Config file already exists at {} (use --force to overwrite)",
                        config_path.display()
                    );
                }
                OpsConfig::default().save_to(&config_path)?;
                println!("Wrote default configuration to {}", config_path.display());
            }
        },
        None => run(&config, None, false)?,
    }

    Ok(())
}

fn run(config: &OpsConfig, plan: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let plan = match plan {
        Some(path) => FlightPlan::from_file(&path)?,
        None => FlightPlan::demo(),
    };

    // Keep stdout clean for JSON output.
    let reporter: Rc<dyn Reporter> = match (config.narrate, json) {
        (true, false) => Rc::new(ConsoleReporter::stdout()),
        (true, true) => Rc::new(ConsoleReporter::new(std::io::stderr())),
        (false, _) => Rc::new(TracingReporter),
    };

    let mut factory = SatelliteFactory::new(config.profile()?).with_reporter(reporter.clone());
    if let Some(seed) = config.seed {
        factory = factory.with_seed(seed);
    }
    let mut center = OperationsCenter::new(ConstellationStore::new(), reporter);

    tracing::info!(
        satellites = plan.satellites.len(),
        steps = plan.steps.len(),
        "Running flight plan"
    );
    let outcome = plan.run(&mut factory, &mut center)?;
    if outcome.missed_steps > 0 {
        tracing::warn!(missed = outcome.missed_steps, "Some plan steps had no effect");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.snapshots)?);
    } else {
        for status in &outcome.snapshots {
            println!("{}", render_status(status));
        }
    }

    Ok(())
}
