use crate::{ApplicationRecord, ProfileField, ProfileSummary, TimerId, ViewMode, Visibility};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Explicit refresh request (startup, user action).
    LoadRequested,
    /// Recurring timer fired.
    PollTick { timer_id: TimerId },
    /// Viewing surface was hidden or shown again.
    VisibilityChanged(Visibility),
    /// Engine finished a dashboard load. Each half fails independently.
    DashboardLoaded {
        profile: Result<ProfileSummary, String>,
        applications: Result<Vec<ApplicationRecord>, String>,
    },
    /// User switched between the applications and profile views.
    ViewSelected(ViewMode),
    /// User opened the profile editor; seeds the draft from the loaded profile.
    ProfileEditOpened,
    /// User edited one field of the profile draft.
    ProfileFieldEdited { field: ProfileField, value: String },
    /// User submitted the profile draft.
    ProfileSaveClicked,
    /// Engine finished a profile submission. The error carries the backend detail when present.
    ProfileSaved(Result<(), String>),
}
