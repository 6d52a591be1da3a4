use clap::Args;
use ocdian_core::Config;

use super::exercise::{self, RunOptions};

#[derive(Args)]
pub struct BreatheArgs {
    /// Inhale/exhale cycles (defaults to breathing.cycles)
    #[arg(long)]
    cycles: Option<u32>,
    /// Milliseconds per timer unit (defaults to timer.tick_interval_ms)
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct BodyScanArgs {
    /// Seconds to hold on each body part (defaults to body_scan.hold_secs)
    #[arg(long)]
    hold_secs: Option<u64>,
    /// Milliseconds per timer unit (defaults to timer.tick_interval_ms)
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

pub fn breathe(args: BreatheArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(cycles) = args.cycles {
        config.apply("breathing.cycles", &cycles.to_string())?;
    }
    let opts = RunOptions::new(&config, args.interval_ms, args.json);
    let timer = exercise::with_signal(config.breathing_timer(), &config);
    exercise::run(timer, &opts)?;
    Ok(())
}

pub fn body_scan(args: BodyScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    if let Some(hold_secs) = args.hold_secs {
        config.apply("body_scan.hold_secs", &hold_secs.to_string())?;
    }
    let opts = RunOptions::new(&config, args.interval_ms, args.json);
    exercise::run(config.body_scan_timer(), &opts)?;
    Ok(())
}
