use std::io::{self, Write};

use chrono::Local;
use dashboard_core::{DashboardViewModel, ProfileDraft, ViewMode, Visibility, POLL_PERIOD};

/// Writes the dashboard as plain text.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Skips drawing while the surface is hidden; the next dirty state redraws everything.
    pub fn render(&mut self, view: &DashboardViewModel) -> io::Result<()> {
        if view.visibility == Visibility::Hidden {
            return Ok(());
        }

        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(self.out)?;
        writeln!(self.out, "== Candidate dashboard ({stamp}) ==")?;
        if view.header.email.is_empty() {
            writeln!(self.out, "{}", view.header.name)?;
        } else {
            writeln!(self.out, "{} <{}>", view.header.name, view.header.email)?;
        }

        let mut flags = Vec::new();
        if view.polling_active {
            flags.push(format!("auto-refresh every {}s", POLL_PERIOD.as_secs()));
        }
        if view.loading {
            flags.push("loading".to_string());
        }
        if view.saving_profile {
            flags.push("saving profile".to_string());
        }
        if !flags.is_empty() {
            writeln!(self.out, "[{}]", flags.join(", "))?;
        }

        match view.view_mode {
            ViewMode::Applications => self.applications(view)?,
            ViewMode::Profile => self.profile(view)?,
        }

        if let Some(notice) = &view.notice {
            writeln!(self.out, "* {notice}")?;
        }
        self.out.flush()
    }

    fn applications(&mut self, view: &DashboardViewModel) -> io::Result<()> {
        let insights = &view.insights;
        writeln!(
            self.out,
            "Applications: {} | Shortlisted: {} | Rejected: {} | Interview scheduled: {}",
            insights.all, insights.shortlisted, insights.rejected, insights.interview_scheduled
        )?;
        if view.applications.is_empty() {
            writeln!(self.out, "  (no applications)")?;
        }
        for card in &view.applications {
            writeln!(
                self.out,
                "  #{:<4} {:<32} resume {:>3}  interview {:>3}  [{}]",
                card.id, card.job_title, card.resume_score, card.voice_score, card.status_label
            )?;
        }
        Ok(())
    }

    fn profile(&mut self, view: &DashboardViewModel) -> io::Result<()> {
        match &view.profile {
            Some(profile) => {
                writeln!(self.out, "  Name:       {}", profile.full_name)?;
                writeln!(self.out, "  Company:    {}", profile.company_name)?;
                writeln!(self.out, "  Email:      {}", profile.email)?;
                writeln!(self.out, "  Phone:      {}", profile.phone)?;
                writeln!(self.out, "  Experience: {}", profile.experience)?;
                writeln!(self.out, "  Skills:     {}", profile.skills)?;
            }
            None => writeln!(self.out, "  (profile not loaded)")?,
        }

        let draft = &view.draft;
        if *draft != ProfileDraft::default() {
            writeln!(self.out, "  -- edit --")?;
            writeln!(self.out, "  name={:?} company={:?}", draft.full_name, draft.company_name)?;
            writeln!(self.out, "  experience={:?} skills={:?}", draft.experience, draft.skills)?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
