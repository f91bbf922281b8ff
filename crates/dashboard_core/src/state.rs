use std::time::Duration;

use crate::experience::normalize_experience_level;
use crate::insights::InsightCounters;
use crate::view_model::DashboardViewModel;

pub type TimerId = u64;

/// Interval between refreshes while an interview is in progress.
pub const POLL_PERIOD: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Applications,
    Profile,
}

impl ViewMode {
    /// Anything other than `profile` (case-insensitive) selects the applications view.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("profile") {
            ViewMode::Profile
        } else {
            ViewMode::Applications
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationRecord {
    /// Absent when the backend omits it.
    pub id: Option<u64>,
    pub status: String,
    pub job_title: String,
    pub resume_score: Option<i64>,
    pub voice_score: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileSummary {
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub experience_years: Option<String>,
    pub skills: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FullName,
    CompanyName,
    Experience,
    Skills,
}

impl ProfileField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full_name" | "name" => Some(ProfileField::FullName),
            "company_name" | "company" => Some(ProfileField::CompanyName),
            "experience" | "experience_years" => Some(ProfileField::Experience),
            "skills" => Some(ProfileField::Skills),
            _ => None,
        }
    }
}

/// Editable profile form contents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileDraft {
    pub full_name: String,
    pub company_name: String,
    pub experience: String,
    pub skills: String,
}

impl ProfileDraft {
    fn from_profile(profile: &ProfileSummary) -> Self {
        Self {
            full_name: profile.full_name.clone().unwrap_or_default(),
            company_name: profile.company_name.clone().unwrap_or_default(),
            experience: profile
                .experience_years
                .as_deref()
                .and_then(normalize_experience_level)
                .map(|level| level.as_str().to_string())
                .unwrap_or_default(),
            skills: profile.skills.clone().unwrap_or_default(),
        }
    }

    fn set(&mut self, field: ProfileField, value: String) {
        match field {
            ProfileField::FullName => self.full_name = value,
            ProfileField::CompanyName => self.company_name = value,
            ProfileField::Experience => self.experience = value,
            ProfileField::Skills => self.skills = value,
        }
    }

    /// Trimmed payload; blank fields and unrecognised experience become `None`.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            full_name: non_blank(&self.full_name),
            company_name: non_blank(&self.company_name),
            experience_years: normalize_experience_level(&self.experience)
                .map(|level| level.as_str().to_string()),
            skills: non_blank(&self.skills),
        }
    }
}

/// Body of a profile submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub experience_years: Option<String>,
    pub skills: Option<String>,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Timer bookkeeping. At most one timer is live at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PollingState {
    active_timer: Option<TimerId>,
    next_timer_id: TimerId,
}

impl PollingState {
    pub fn active_timer(&self) -> Option<TimerId> {
        self.active_timer
    }

    pub fn is_active(&self) -> bool {
        self.active_timer.is_some()
    }

    /// Returns the id of a newly started timer, or `None` if one is already live.
    pub(crate) fn start(&mut self) -> Option<TimerId> {
        if self.active_timer.is_some() {
            return None;
        }
        self.next_timer_id += 1;
        self.active_timer = Some(self.next_timer_id);
        self.active_timer
    }

    /// Returns the id of the cancelled timer, or `None` if none was live.
    pub(crate) fn stop(&mut self) -> Option<TimerId> {
        self.active_timer.take()
    }
}

/// Controller state for one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardState {
    token: Option<String>,
    visibility: Visibility,
    view_mode: ViewMode,
    loading: bool,
    polling: PollingState,
    applications: Vec<ApplicationRecord>,
    insights: InsightCounters,
    profile: Option<ProfileSummary>,
    draft: ProfileDraft,
    saving_profile: bool,
    notice: Option<String>,
    dirty: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the bearer token. An empty token counts as signed out.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn view(&self) -> DashboardViewModel {
        DashboardViewModel::build(self)
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving_profile(&self) -> bool {
        self.saving_profile
    }

    pub fn polling(&self) -> &PollingState {
        &self.polling
    }

    pub fn applications(&self) -> &[ApplicationRecord] {
        &self.applications
    }

    pub fn insights(&self) -> InsightCounters {
        self.insights
    }

    pub fn profile(&self) -> Option<&ProfileSummary> {
        self.profile.as_ref()
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn polling_mut(&mut self) -> &mut PollingState {
        &mut self.polling
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_saving_profile(&mut self, saving: bool) {
        if self.saving_profile != saving {
            self.saving_profile = saving;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_visibility(&mut self, visibility: Visibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_view_mode(&mut self, view_mode: ViewMode) {
        if self.view_mode != view_mode {
            self.view_mode = view_mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_applications(&mut self, applications: Vec<ApplicationRecord>) {
        self.insights = InsightCounters::tally(&applications);
        self.applications = applications;
        self.mark_dirty();
    }

    pub(crate) fn replace_profile(&mut self, profile: ProfileSummary) {
        self.profile = Some(profile);
        self.mark_dirty();
    }

    pub(crate) fn seed_draft(&mut self) {
        if let Some(profile) = &self.profile {
            self.draft = ProfileDraft::from_profile(profile);
            self.mark_dirty();
        }
    }

    pub(crate) fn edit_draft(&mut self, field: ProfileField, value: String) {
        self.draft.set(field, value);
        self.mark_dirty();
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
