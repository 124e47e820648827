//! Countdown background task

use std::{sync::Weak, time::Duration};
use tokio::time::sleep;
use tracing::debug;

use crate::state::controller::Shared;

/// Time between two ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Tick the controller once per period until it is stopped or dropped.
///
/// Each tick sleeps a full period after the previous one, so the countdown
/// is not corrected against wall-clock time and drifts by the tick cost.
pub(crate) async fn countdown_task(shared: Weak<Shared>, epoch: u64) {
    debug!("Starting countdown task (epoch {})", epoch);

    loop {
        sleep(TICK_PERIOD).await;

        let Some(shared) = shared.upgrade() else {
            debug!("Controller dropped, ending countdown task");
            break;
        };
        if !shared.tick(epoch) {
            break;
        }
    }

    debug!("Countdown task finished (epoch {})", epoch);
}
