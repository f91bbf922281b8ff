use std::sync::Once;

use dashboard_core::{
    update, ApplicationRecord, DashboardState, Effect, Msg, ProfileSummary, Visibility,
    POLL_PERIOD,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dashboard_logging::initialize_for_tests);
}

fn interview_in_progress() -> Vec<ApplicationRecord> {
    vec![ApplicationRecord {
        id: Some(9),
        status: "interview_in_progress".to_string(),
        job_title: "Backend Engineer".to_string(),
        resume_score: Some(81),
        voice_score: None,
    }]
}

/// Loads once with an in-progress application so a timer is live.
fn polling_state() -> DashboardState {
    let (state, _) = update(DashboardState::new().with_token("t"), Msg::LoadRequested);
    let (state, effects) = update(
        state,
        Msg::DashboardLoaded {
            profile: Ok(ProfileSummary::default()),
            applications: Ok(interview_in_progress()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            timer_id: 1,
            period: POLL_PERIOD
        }]
    );
    state
}

#[test]
fn start_is_idempotent() {
    init_logging();
    let state = polling_state();

    // A second load that still needs polling must not start another timer.
    let (state, _) = update(state, Msg::LoadRequested);
    let (state, effects) = update(
        state,
        Msg::DashboardLoaded {
            profile: Ok(ProfileSummary::default()),
            applications: Ok(interview_in_progress()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.polling().active_timer(), Some(1));
}

#[test]
fn stop_without_timer_is_noop() {
    init_logging();
    let state = DashboardState::new().with_token("t");
    let (state, effects) = update(state, Msg::VisibilityChanged(Visibility::Hidden));

    assert!(effects.is_empty());
    assert!(!state.polling().is_active());
}

#[test]
fn tick_triggers_load_when_visible() {
    init_logging();
    let state = polling_state();
    let (state, effects) = update(state, Msg::PollTick { timer_id: 1 });

    assert_eq!(
        effects,
        vec![Effect::LoadDashboard {
            token: "t".to_string()
        }]
    );
    assert!(state.is_loading());
}

#[test]
fn tick_during_pending_load_is_dropped() {
    init_logging();
    let state = polling_state();
    let (state, _) = update(state, Msg::LoadRequested);
    let (state, effects) = update(state, Msg::PollTick { timer_id: 1 });

    assert!(effects.is_empty());
    assert!(state.is_loading());
}

#[test]
fn stale_tick_is_ignored() {
    init_logging();
    let state = polling_state();
    let (state, effects) = update(state, Msg::PollTick { timer_id: 42 });

    assert!(effects.is_empty());
    assert!(!state.is_loading());
}

#[test]
fn hiding_stops_polling_outright() {
    init_logging();
    let state = polling_state();
    let (state, effects) = update(state, Msg::VisibilityChanged(Visibility::Hidden));

    assert_eq!(effects, vec![Effect::StopPolling { timer_id: 1 }]);
    assert!(!state.polling().is_active());

    // A tick already in the channel from the cancelled timer is ignored.
    let (_state, effects) = update(state, Msg::PollTick { timer_id: 1 });
    assert!(effects.is_empty());
}

#[test]
fn showing_triggers_immediate_refresh() {
    init_logging();
    let state = polling_state();
    let (state, _) = update(state, Msg::VisibilityChanged(Visibility::Hidden));
    let (state, effects) = update(state, Msg::VisibilityChanged(Visibility::Visible));

    assert_eq!(
        effects,
        vec![Effect::LoadDashboard {
            token: "t".to_string()
        }]
    );

    // The refresh decides whether polling restarts; a new timer id is allocated.
    let (state, effects) = update(
        state,
        Msg::DashboardLoaded {
            profile: Ok(ProfileSummary::default()),
            applications: Ok(interview_in_progress()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            timer_id: 2,
            period: POLL_PERIOD
        }]
    );
    assert_eq!(state.polling().active_timer(), Some(2));
}

#[test]
fn hidden_tick_is_skipped_when_response_restarted_polling() {
    init_logging();
    // A load started while visible completes after the surface is hidden.
    let (state, _) = update(DashboardState::new().with_token("t"), Msg::LoadRequested);
    let (state, _) = update(state, Msg::VisibilityChanged(Visibility::Hidden));
    let (state, effects) = update(
        state,
        Msg::DashboardLoaded {
            profile: Ok(ProfileSummary::default()),
            applications: Ok(interview_in_progress()),
        },
    );
    assert_eq!(effects.len(), 1);

    let (state, effects) = update(state, Msg::PollTick { timer_id: 1 });
    assert!(effects.is_empty());
    assert!(state.polling().is_active());
    assert!(!state.is_loading());
}
