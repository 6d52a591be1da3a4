use clap::{Args, Subcommand};
use ocdian_core::{Config, Database, InsightsReport, MoodScore, MoodStore, Trigger};

#[derive(Subcommand)]
pub enum MoodAction {
    /// Record a mood check-in
    Record {
        /// Mood from 1 (low) to 5 (high)
        #[arg(long)]
        score: u8,
        /// Trigger tag (repeatable): stress, social, health, work, family, environment
        #[arg(long = "trigger")]
        triggers: Vec<String>,
        /// Free-text note
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Print the mood history as JSON
    History,
    /// List the trigger catalog
    Triggers,
}

#[derive(Args)]
pub struct InsightsArgs {
    /// Number of recent check-ins to chart (defaults to mood.recent_window)
    #[arg(long)]
    window: Option<usize>,
}

/// Mood history for this run: persisted only when `mood.persist_history` is on.
fn open_moods(config: &Config) -> Result<(MoodStore, Option<Database>), Box<dyn std::error::Error>> {
    if config.mood.persist_history {
        let db = Database::open()?;
        Ok((MoodStore::load_from(&db), Some(db)))
    } else {
        Ok((MoodStore::new(), None))
    }
}

pub fn run(action: MoodAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (mut moods, db) = open_moods(&config)?;

    match action {
        MoodAction::Record { score, triggers, note } => {
            let score = MoodScore::new(score)?;
            let triggers = triggers
                .iter()
                .map(|name| name.parse::<Trigger>())
                .collect::<Result<Vec<_>, _>>()?;
            let record = moods.record_mood(score, triggers, note).clone();
            println!("{}", serde_json::to_string_pretty(&record)?);

            match &db {
                Some(db) => moods.save_to(db)?,
                None => eprintln!(
                    "note: mood history is kept for this run only (set mood.persist_history = true to keep it)"
                ),
            }
        }
        MoodAction::History => {
            println!("{}", serde_json::to_string_pretty(moods.history())?);
        }
        MoodAction::Triggers => {
            for trigger in Trigger::ALL {
                println!("{trigger}");
            }
        }
    }
    Ok(())
}

pub fn insights(args: InsightsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (moods, _db) = open_moods(&config)?;
    let window = args.window.unwrap_or(config.mood.recent_window);
    let report = InsightsReport::build(moods.history(), window);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
