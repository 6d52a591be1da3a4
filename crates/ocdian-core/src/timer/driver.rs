use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use super::engine::PhaseTimer;
use crate::events::Event;

/// Feed a started timer one tick per `period` until it leaves `Running`.
///
/// `on_tick` sees the timer after every tick together with any event that
/// tick produced; it may call `stop()` to end the run early. Returns the
/// completion event, or `None` when the run was stopped.
pub async fn drive<F>(timer: &mut PhaseTimer, period: Duration, mut on_tick: F) -> Option<Event>
where
    F: FnMut(&mut PhaseTimer, Option<&Event>),
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick resolves immediately.
    ticker.tick().await;

    while timer.is_running() {
        ticker.tick().await;
        let event = timer.tick();
        on_tick(timer, event.as_ref());
        if let Some(event) = event.filter(Event::is_completion) {
            return Some(event);
        }
    }
    None
}
