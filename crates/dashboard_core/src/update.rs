use dashboard_logging::{dash_debug, dash_info, dash_warn};

use crate::status::needs_polling;
use crate::{DashboardState, Effect, Msg, Visibility, POLL_PERIOD};

const PROFILE_SAVED_NOTICE: &str = "Profile updated successfully";
const PROFILE_FAILED_NOTICE: &str = "Profile update failed";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: DashboardState, msg: Msg) -> (DashboardState, Vec<Effect>) {
    let effects: Vec<Effect> = match msg {
        Msg::LoadRequested => begin_load(&mut state),
        Msg::PollTick { timer_id } => {
            if state.polling().active_timer() != Some(timer_id) {
                dash_debug!("Ignoring tick from inactive timer {}", timer_id);
                Vec::new()
            } else if state.visibility() == Visibility::Hidden {
                // Hidden surfaces skip the tick but keep the timer.
                Vec::new()
            } else {
                begin_load(&mut state)
            }
        }
        Msg::VisibilityChanged(visibility) => {
            state.set_visibility(visibility);
            match visibility {
                Visibility::Hidden => stop_polling(&mut state).into_iter().collect(),
                Visibility::Visible => begin_load(&mut state),
            }
        }
        Msg::DashboardLoaded {
            profile,
            applications,
        } => {
            state.set_loading(false);

            match profile {
                Ok(profile) => state.replace_profile(profile),
                Err(err) => dash_warn!("Profile fetch failed: {}", err),
            }

            match applications {
                Ok(applications) => {
                    let keep_polling = applications
                        .iter()
                        .any(|application| needs_polling(&application.status));
                    state.replace_applications(applications);
                    if keep_polling {
                        start_polling(&mut state).into_iter().collect()
                    } else {
                        stop_polling(&mut state).into_iter().collect()
                    }
                }
                Err(err) => {
                    dash_warn!("Applications fetch failed, keeping previous list: {}", err);
                    Vec::new()
                }
            }
        }
        Msg::ViewSelected(view_mode) => {
            state.set_view_mode(view_mode);
            Vec::new()
        }
        Msg::ProfileEditOpened => {
            state.seed_draft();
            Vec::new()
        }
        Msg::ProfileFieldEdited { field, value } => {
            state.edit_draft(field, value);
            Vec::new()
        }
        Msg::ProfileSaveClicked => {
            let Some(token) = state.token().map(ToOwned::to_owned) else {
                return (state, Vec::new());
            };
            if state.is_saving_profile() {
                return (state, Vec::new());
            }
            state.set_saving_profile(true);
            let update = state.draft().to_update();
            vec![Effect::SubmitProfile { token, update }]
        }
        Msg::ProfileSaved(result) => {
            state.set_saving_profile(false);
            match result {
                Ok(()) => {
                    state.set_notice(PROFILE_SAVED_NOTICE);
                    begin_load(&mut state)
                }
                Err(detail) => {
                    dash_warn!("Profile update rejected: {}", detail);
                    if detail.trim().is_empty() {
                        state.set_notice(PROFILE_FAILED_NOTICE);
                    } else {
                        state.set_notice(detail);
                    }
                    Vec::new()
                }
            }
        }
    };

    (state, effects)
}

/// Single-flight load: dropped when signed out or while another load is pending.
fn begin_load(state: &mut DashboardState) -> Vec<Effect> {
    let Some(token) = state.token().map(ToOwned::to_owned) else {
        return Vec::new();
    };
    if state.is_loading() {
        dash_debug!("Load already in flight; dropping trigger");
        return Vec::new();
    }
    state.set_loading(true);
    vec![Effect::LoadDashboard { token }]
}

fn start_polling(state: &mut DashboardState) -> Option<Effect> {
    let timer_id = state.polling_mut().start()?;
    dash_info!("Polling started (timer {})", timer_id);
    state.mark_dirty();
    Some(Effect::StartPolling {
        timer_id,
        period: POLL_PERIOD,
    })
}

fn stop_polling(state: &mut DashboardState) -> Option<Effect> {
    let timer_id = state.polling_mut().stop()?;
    dash_info!("Polling stopped (timer {})", timer_id);
    state.mark_dirty();
    Some(Effect::StopPolling { timer_id })
}
