//! Dashboard engine: backend HTTP calls, refresh timers and effect execution.
mod api;
mod engine;
mod types;

pub use api::{load_dashboard, ApiSettings, DashboardApi, ReqwestDashboardApi};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{
    ApiError, ApplicationDto, EngineError, EngineEvent, FailureKind, JobDto, ProfileDto,
    ProfileUpdateDto, TimerId,
};
