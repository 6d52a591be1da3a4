use clap::Subcommand;
use ocdian_core::{AnxietyLevel, Config, ErpDuration, ExposureSession, TimerState};

use super::exercise::{self, RunOptions};

#[derive(Subcommand)]
pub enum ErpAction {
    /// Run a timed exposure
    Run {
        /// Exposure challenge, e.g. "touch the bin lid"
        #[arg(long, default_value = "")]
        challenge: String,
        /// Exposure length in seconds: 60, 300 or 600 (defaults to erp.default_duration_secs)
        #[arg(long)]
        duration: Option<u64>,
        /// Anxiety before exposure, 1-10
        #[arg(long, default_value_t = 5)]
        before: u8,
        /// Anxiety after exposure, 1-10 (recorded only if the exposure completes)
        #[arg(long)]
        after: Option<u8>,
        /// Milliseconds per timer unit (defaults to timer.tick_interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// List the available exposure durations
    Durations,
}

pub fn run(action: ErpAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ErpAction::Run {
            challenge,
            duration,
            before,
            after,
            interval_ms,
            json,
        } => {
            let config = Config::load()?;
            let duration =
                ErpDuration::from_secs(duration.unwrap_or(config.erp.default_duration_secs))?;
            let before = AnxietyLevel::new(before)?;
            let after = after.map(AnxietyLevel::new).transpose()?;

            let mut session = ExposureSession::new(challenge, duration, before);
            let opts = RunOptions::new(&config, interval_ms, json);
            let timer = exercise::run(session.timer(), &opts)?;

            if timer.state() == TimerState::Completed {
                if let Some(after) = after {
                    session.complete(after);
                }
            }
            let summary = serde_json::json!({
                "session": session,
                "anxiety_change": session.anxiety_change(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        ErpAction::Durations => {
            for duration in ErpDuration::ALL {
                println!("{}\t{}", duration.secs(), duration);
            }
        }
    }
    Ok(())
}
