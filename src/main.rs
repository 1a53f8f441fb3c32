//! Prefab Planner - grid-based module placement configurator
//!
//! Without a subcommand the terminal UI starts; subcommands drive the same
//! engine headlessly for scripting and tests.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prefab_planner::cli::{
    ApplyArgs, CatalogArgs, ClearArgs, CliContext, CliResult, ConfigArgs, ExportArgs, GridArgs,
    ModuleArgs, ResetArgs, StarterArgs, SummaryArgs,
};

/// Prefab Planner - place prefabricated house modules on a grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved configuration (overrides the config file)
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List module presets and starter layouts
    Catalog(CatalogArgs),
    /// Place, move, rotate and remove modules
    Module(ModuleArgs),
    /// Replace the configuration with a starter layout
    Starter(StarterArgs),
    /// Show or resize the grid
    Grid(GridArgs),
    /// Remove every placed module
    Clear(ClearArgs),
    /// Clear everything and restore the default grid
    Reset(ResetArgs),
    /// Print area, price and module count
    Summary(SummaryArgs),
    /// Export the configuration
    Export(ExportArgs),
    /// Apply a JSON script of commands
    Apply(ApplyArgs),
    /// Show or change application settings
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self, ctx: &CliContext) -> CliResult<()> {
        match self {
            Self::Catalog(args) => args.execute(ctx),
            Self::Module(args) => args.execute(ctx),
            Self::Starter(args) => args.execute(ctx),
            Self::Grid(args) => args.execute(ctx),
            Self::Clear(args) => args.execute(ctx),
            Self::Reset(args) => args.execute(ctx),
            Self::Summary(args) => args.execute(ctx),
            Self::Export(args) => args.execute(ctx),
            Self::Apply(args) => args.execute(ctx),
            Self::Config(args) => args.execute(ctx),
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = CliContext::load(cli.data_dir.as_deref()).and_then(|ctx| match &cli.command {
        Some(command) => command.execute(&ctx),
        None => run_interactive(&ctx),
    });

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code().code());
    }
}

#[cfg(feature = "ratatui")]
fn run_interactive(ctx: &CliContext) -> CliResult<()> {
    use prefab_planner::cli::CliError;
    use prefab_planner::tui;

    let store = ctx.open_store()?;
    let mut terminal = tui::setup_terminal()
        .map_err(|e| CliError::io(format!("Failed to initialize terminal: {e:#}")))?;
    let mut app_state = tui::AppState::new(store, &ctx.config, ctx.data_dir.clone());

    let result = tui::run_tui(&mut app_state, &mut terminal);

    tui::restore_terminal(terminal)
        .map_err(|e| CliError::io(format!("Failed to restore terminal: {e:#}")))?;
    result.map_err(|e| CliError::io(format!("{e:#}")))
}

#[cfg(not(feature = "ratatui"))]
fn run_interactive(_ctx: &CliContext) -> CliResult<()> {
    use clap::CommandFactory;

    Cli::command()
        .print_help()
        .map_err(|e| prefab_planner::cli::CliError::io(e.to_string()))?;
    println!();
    Ok(())
}
