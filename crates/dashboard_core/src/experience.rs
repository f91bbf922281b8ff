use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Fresher,
    OneToThreeYears,
    FourToEightYears,
    NineAndAbove,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Fresher,
        ExperienceLevel::OneToThreeYears,
        ExperienceLevel::FourToEightYears,
        ExperienceLevel::NineAndAbove,
    ];

    /// Canonical lowercase string, as stored by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "fresher",
            ExperienceLevel::OneToThreeYears => "1 to 3 years",
            ExperienceLevel::FourToEightYears => "4 to 8 years",
            ExperienceLevel::NineAndAbove => "9 and above",
        }
    }

    fn from_years(years: f64) -> Self {
        if years <= 0.0 {
            ExperienceLevel::Fresher
        } else if years <= 3.0 {
            ExperienceLevel::OneToThreeYears
        } else if years <= 8.0 {
            ExperienceLevel::FourToEightYears
        } else {
            ExperienceLevel::NineAndAbove
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw experience value (canonical bucket or number of years) to its bucket.
///
/// Returns `None` for blank or non-numeric input.
pub fn normalize_experience_level(raw: &str) -> Option<ExperienceLevel> {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    if let Some(level) = ExperienceLevel::ALL
        .into_iter()
        .find(|level| level.as_str() == text)
    {
        return Some(level);
    }
    let years: f64 = text.parse().ok()?;
    // Overflowing input parses to an infinity and still lands in an end bucket.
    (!years.is_nan()).then(|| ExperienceLevel::from_years(years))
}

/// Profile-page rendering: `-` when unknown, capitalised `Fresher`, bucket text otherwise.
pub fn display_experience(raw: &str) -> &'static str {
    match normalize_experience_level(raw) {
        None => "-",
        Some(ExperienceLevel::Fresher) => "Fresher",
        Some(level) => level.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_strings_are_kept() {
        for level in ExperienceLevel::ALL {
            assert_eq!(normalize_experience_level(level.as_str()), Some(level));
        }
        assert_eq!(
            normalize_experience_level("  4 TO 8 Years "),
            Some(ExperienceLevel::FourToEightYears)
        );
    }

    #[test]
    fn numeric_boundaries() {
        let cases = [
            ("-2", ExperienceLevel::Fresher),
            ("0", ExperienceLevel::Fresher),
            ("1", ExperienceLevel::OneToThreeYears),
            ("3", ExperienceLevel::OneToThreeYears),
            ("3.5", ExperienceLevel::FourToEightYears),
            ("4", ExperienceLevel::FourToEightYears),
            ("8", ExperienceLevel::FourToEightYears),
            ("9", ExperienceLevel::NineAndAbove),
            ("25", ExperienceLevel::NineAndAbove),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_experience_level(raw), Some(expected), "input {raw}");
        }
    }

    #[test]
    fn unknown_input_has_no_bucket() {
        assert_eq!(normalize_experience_level(""), None);
        assert_eq!(normalize_experience_level("   "), None);
        assert_eq!(normalize_experience_level("senior"), None);
        assert_eq!(normalize_experience_level("nan"), None);
    }

    #[test]
    fn overflowing_numbers_land_in_end_buckets() {
        assert_eq!(
            normalize_experience_level("1e400"),
            Some(ExperienceLevel::NineAndAbove)
        );
        assert_eq!(
            normalize_experience_level("-1e400"),
            Some(ExperienceLevel::Fresher)
        );
    }

    #[test]
    fn display_variants() {
        assert_eq!(display_experience(""), "-");
        assert_eq!(display_experience("0"), "Fresher");
        assert_eq!(display_experience("fresher"), "Fresher");
        assert_eq!(display_experience("12"), "9 and above");
    }
}
