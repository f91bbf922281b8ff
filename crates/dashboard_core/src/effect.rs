use std::time::Duration;

use crate::{ProfileUpdate, TimerId};

/// Side effects requested by [`crate::update`]; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch `/profile/me` and `/applications/my` with the given bearer token.
    LoadDashboard { token: String },
    /// Start a recurring timer that reports `Msg::PollTick { timer_id }` every `period`.
    StartPolling { timer_id: TimerId, period: Duration },
    /// Cancel a timer previously started with `StartPolling`.
    StopPolling { timer_id: TimerId },
    /// Post the edited profile to `/profile/`.
    SubmitProfile { token: String, update: ProfileUpdate },
}
