use std::sync::mpsc;
use std::thread;

use dashboard_core::{ApplicationRecord, Effect, Msg, ProfileSummary, ProfileUpdate};
use dashboard_engine::{
    ApiError, ApiSettings, ApplicationDto, EngineError, EngineEvent, EngineEvents, EngineHandle,
    ProfileDto, ProfileUpdateDto,
};
use dashboard_logging::{dash_info, dash_warn};

use super::app::AppInput;

/// Executes core effects on the engine and feeds engine events back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ApiSettings, input_tx: mpsc::Sender<AppInput>) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::new(settings)?;
        spawn_event_loop(events, input_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadDashboard { token } => {
                    let cycle = dashboard_logging::next_load_cycle();
                    dash_info!("LoadDashboard cycle={}", cycle);
                    self.engine.load(token);
                }
                Effect::StartPolling { timer_id, period } => {
                    self.engine.start_timer(timer_id, period);
                }
                Effect::StopPolling { timer_id } => {
                    self.engine.stop_timer(timer_id);
                }
                Effect::SubmitProfile { token, update } => {
                    dash_info!("SubmitProfile");
                    self.engine.submit_profile(token, map_update(update));
                }
            }
        }
    }
}

fn spawn_event_loop(events: EngineEvents, input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        while let Some(event) = events.recv() {
            if input_tx.send(AppInput::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DashboardLoaded {
            profile,
            applications,
        } => Msg::DashboardLoaded {
            profile: profile.map(map_profile).map_err(describe),
            applications: applications
                .map(|items| items.into_iter().map(map_application).collect())
                .map_err(describe),
        },
        EngineEvent::ProfileSubmitted(result) => Msg::ProfileSaved(result.map_err(|err| {
            dash_warn!("Profile submission failed: {}", err);
            err.detail.unwrap_or_default()
        })),
        EngineEvent::TimerTick { timer_id } => Msg::PollTick { timer_id },
    }
}

fn describe(err: ApiError) -> String {
    match err.detail {
        Some(ref detail) => format!("{} ({})", err, detail),
        None => err.to_string(),
    }
}

fn map_application(dto: ApplicationDto) -> ApplicationRecord {
    ApplicationRecord {
        id: dto.id,
        status: dto.status.unwrap_or_default(),
        job_title: dto.job.and_then(|job| job.title).unwrap_or_default(),
        resume_score: dto.resume_score,
        voice_score: dto.voice_score,
    }
}

fn map_profile(dto: ProfileDto) -> ProfileSummary {
    ProfileSummary {
        full_name: dto.full_name,
        company_name: dto.company_name,
        email: dto.email,
        phone: dto.phone.or(dto.phone_number),
        experience_years: dto.experience_years,
        skills: dto.skills,
    }
}

fn map_update(update: ProfileUpdate) -> ProfileUpdateDto {
    ProfileUpdateDto {
        full_name: update.full_name,
        company_name: update.company_name,
        experience_years: update.experience_years,
        skills: update.skills,
    }
}
