use clap::Subcommand;
use ocdian_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one config value
    ///
    /// Keys: timer.tick_interval_ms, breathing.{cycles,phase_secs,lead_in_secs},
    /// body_scan.{hold_secs,parts}, erp.default_duration_secs,
    /// mood.{persist_history,recent_window}, notifications.haptics
    Get {
        /// Dotted key, e.g. "breathing.cycles"
        key: String,
    },
    /// Validate and store one config value
    Set {
        /// Dotted key, e.g. "erp.default_duration_secs"
        key: String,
        /// New value; body_scan.parts takes a comma-separated list
        value: String,
    },
    /// Print the whole configuration as JSON
    List,
    /// Overwrite config.toml with the defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
