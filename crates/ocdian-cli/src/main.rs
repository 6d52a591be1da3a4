use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ocdian", version, about = "OCDian CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Obsession/compulsion journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Mood check-ins
    ///
    /// History is kept only for the current run unless
    /// `ocdian config set mood.persist_history true` is set.
    Mood {
        #[command(subcommand)]
        action: commands::mood::MoodAction,
    },
    /// Trigger frequencies and recent moods
    ///
    /// Empty unless `mood.persist_history` is on, since each run starts
    /// with a fresh history otherwise.
    Insights(commands::mood::InsightsArgs),
    /// Guided breathing exercise
    Breathe(commands::relax::BreatheArgs),
    /// Guided body-scan exercise
    BodyScan(commands::relax::BodyScanArgs),
    /// Exposure and Response Prevention timer
    Erp {
        #[command(subcommand)]
        action: commands::erp::ErpAction,
    },
    /// Coping strategies
    Coping {
        #[command(subcommand)]
        action: commands::coping::CopingAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("OCDIAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Mood { action } => commands::mood::run(action),
        Commands::Insights(args) => commands::mood::insights(args),
        Commands::Breathe(args) => commands::relax::breathe(args),
        Commands::BodyScan(args) => commands::relax::body_scan(args),
        Commands::Erp { action } => commands::erp::run(action),
        Commands::Coping { action } => commands::coping::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "ocdian", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
