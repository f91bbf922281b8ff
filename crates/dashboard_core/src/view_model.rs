use crate::experience::display_experience;
use crate::status::{format_status, status_slug};
use crate::{
    ApplicationRecord, DashboardState, InsightCounters, ProfileDraft, ProfileSummary, ViewMode,
    Visibility,
};

const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardViewModel {
    pub view_mode: ViewMode,
    pub visibility: Visibility,
    pub header: ProfileHeader,
    pub profile: Option<ProfileView>,
    pub draft: ProfileDraft,
    pub applications: Vec<ApplicationCard>,
    pub insights: InsightCounters,
    pub polling_active: bool,
    pub loading: bool,
    pub saving_profile: bool,
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileHeader {
    pub name: String,
    pub email: String,
}

impl Default for ProfileHeader {
    fn default() -> Self {
        Self {
            name: "Complete Profile".to_string(),
            email: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub full_name: String,
    pub company_name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub skills: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationCard {
    pub id: String,
    pub job_title: String,
    pub resume_score: String,
    pub voice_score: String,
    pub status_label: String,
    pub status_slug: String,
}

impl DashboardViewModel {
    pub(crate) fn build(state: &DashboardState) -> Self {
        Self {
            view_mode: state.view_mode(),
            visibility: state.visibility(),
            header: state.profile().map(header).unwrap_or_default(),
            profile: state.profile().map(profile_view),
            draft: state.draft().clone(),
            applications: state.applications().iter().map(card).collect(),
            insights: state.insights(),
            polling_active: state.polling().is_active(),
            loading: state.is_loading(),
            saving_profile: state.is_saving_profile(),
            notice: state.notice().map(ToOwned::to_owned),
        }
    }
}

fn header(profile: &ProfileSummary) -> ProfileHeader {
    ProfileHeader {
        name: non_empty(profile.full_name.as_deref())
            .unwrap_or("Complete Profile")
            .to_string(),
        email: profile.email.clone().unwrap_or_default(),
    }
}

fn profile_view(profile: &ProfileSummary) -> ProfileView {
    let or_missing = |value: Option<&str>| non_empty(value).unwrap_or(MISSING).to_string();
    ProfileView {
        full_name: or_missing(profile.full_name.as_deref()),
        company_name: or_missing(profile.company_name.as_deref()),
        email: or_missing(profile.email.as_deref()),
        phone: or_missing(profile.phone.as_deref()),
        experience: display_experience(profile.experience_years.as_deref().unwrap_or_default())
            .to_string(),
        skills: or_missing(profile.skills.as_deref()),
    }
}

fn card(application: &ApplicationRecord) -> ApplicationCard {
    let score = |value: Option<i64>| value.map_or_else(|| MISSING.to_string(), |v| v.to_string());
    ApplicationCard {
        id: application
            .id
            .map_or_else(|| MISSING.to_string(), |id| id.to_string()),
        job_title: application.job_title.clone(),
        resume_score: score(application.resume_score),
        voice_score: score(application.voice_score),
        status_label: format_status(&application.status.to_lowercase()).to_string(),
        status_slug: status_slug(&application.status),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}
