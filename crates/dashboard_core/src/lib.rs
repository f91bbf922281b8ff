//! Dashboard core: pure refresh controller, label derivation and view-model helpers.
mod effect;
mod experience;
mod insights;
mod msg;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use experience::{display_experience, normalize_experience_level, ExperienceLevel};
pub use insights::InsightCounters;
pub use msg::Msg;
pub use state::{
    ApplicationRecord, DashboardState, PollingState, ProfileDraft, ProfileField, ProfileSummary,
    ProfileUpdate, TimerId, ViewMode, Visibility, POLL_PERIOD,
};
pub use status::{format_status, needs_polling, status_slug, STATUS_PLACEHOLDER};
pub use update::update;
pub use view_model::{ApplicationCard, DashboardViewModel, ProfileHeader, ProfileView};
