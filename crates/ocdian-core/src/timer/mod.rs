mod driver;
mod engine;
mod handle;
mod schedule;
mod signal;

pub use driver::drive;
pub use engine::{PhaseTimer, TimerState};
pub use handle::{TickHandle, TickWatcher};
pub use schedule::{Phase, PhaseKind, PhasePlan, TimerMode, DEFAULT_BODY_PARTS};
pub use signal::CompletionSignal;
