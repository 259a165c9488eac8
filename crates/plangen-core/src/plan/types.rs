//! Input and output types of the allocation engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Self-reported preparation level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserLevel {
    /// No prior exposure
    Beginner,
    /// Has some foundation
    Intermediate,
    /// Experienced, only needs a final sprint
    Sprint,
}

impl UserLevel {
    pub const ALL: [UserLevel; 3] = [UserLevel::Beginner, UserLevel::Intermediate, UserLevel::Sprint];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserLevel::Beginner => "beginner",
            UserLevel::Intermediate => "intermediate",
            UserLevel::Sprint => "sprint",
        }
    }
}

impl fmt::Display for UserLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(UserLevel::Beginner),
            "intermediate" => Ok(UserLevel::Intermediate),
            "sprint" => Ok(UserLevel::Sprint),
            _ => Err(ValidationError::UnknownLevel(s.to_string())),
        }
    }
}

/// Answers to the three self-test questions.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelfTest {
    /// Can tell a List apart from a DataFrame
    #[serde(default)]
    pub knows_containers: bool,
    /// Can hand-write `drop_duplicates`
    #[serde(default)]
    pub knows_syntax: bool,
    /// Understands normalization
    #[serde(default)]
    pub knows_normalization: bool,
}

impl SelfTest {
    /// All three flags set.
    pub fn all() -> Self {
        Self {
            knows_containers: true,
            knows_syntax: true,
            knows_normalization: true,
        }
    }

    /// Number of flags answered "yes".
    pub fn passed_count(&self) -> u32 {
        [self.knows_containers, self.knows_syntax, self.knows_normalization]
            .iter()
            .filter(|&&flag| flag)
            .count() as u32
    }
}

/// Parameters for a single plan computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInput {
    /// Days until the exam (intended 1-60)
    pub days_remaining: u32,
    /// Study hours per day (intended 1-12)
    pub daily_hours: u32,
    pub level: UserLevel,
    #[serde(default)]
    pub self_test: SelfTest,
}

impl UserInput {
    pub fn new(days_remaining: u32, daily_hours: u32, level: UserLevel, self_test: SelfTest) -> Self {
        Self {
            days_remaining,
            daily_hours,
            level,
            self_test,
        }
    }

    /// Reject inputs that would make the pressure quotient divide by zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.days_remaining < 1 {
            return Err(ValidationError::BelowMinimum {
                field: "days_remaining",
                min: 1,
                value: self.days_remaining,
            });
        }
        if self.daily_hours < 1 {
            return Err(ValidationError::BelowMinimum {
                field: "daily_hours",
                min: 1,
                value: self.daily_hours,
            });
        }
        Ok(())
    }

    /// Total hour budget, `days_remaining * daily_hours`.
    pub fn total_energy(&self) -> u64 {
        u64::from(self.days_remaining) * u64::from(self.daily_hours)
    }
}

/// Discrete pressure tier, ordered by severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PressureLevel {
    Easy,
    Medium,
    High,
    Survival,
}

impl PressureLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureLevel::Easy => "easy",
            PressureLevel::Medium => "medium",
            PressureLevel::High => "high",
            PressureLevel::Survival => "survival",
        }
    }
}

impl fmt::Display for PressureLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of a plan module.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ModuleId {
    #[serde(rename = "survival")]
    Survival,
    /// Desensitization
    #[serde(rename = "m1")]
    Desensitization,
    /// Fortification, carries the theory reserve
    #[serde(rename = "m2")]
    Fortification,
    /// Full simulation sprint
    #[serde(rename = "m3")]
    Sprint,
}

impl ModuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Survival => "survival",
            ModuleId::Desensitization => "m1",
            ModuleId::Fortification => "m2",
            ModuleId::Sprint => "m3",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One time-boxed phase of the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyPlanModule {
    pub id: ModuleId,
    pub title: String,
    pub sub_title: String,
    /// `"<start> - <end>"`, rendered from `starts_on`/`ends_on`
    pub date_range: String,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    /// Whole days covered by this module
    pub day_span: u32,
    pub hours_allocated: u64,
    /// Nominal weight of the phase (0-100). For the fortification module
    /// this excludes the injected theory hours that `hours_allocated` includes.
    pub percentage: u32,
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Complete output of a plan computation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanState {
    /// May exceed 100; clamp only for display
    pub pressure: i64,
    pub pressure_level: PressureLevel,
    pub total_energy: u64,
    pub recommendation: String,
    pub modules: Vec<StudyPlanModule>,
}

impl PlanState {
    /// Whether consumers should fire the survival alert (vibration).
    pub fn requires_alert(&self) -> bool {
        self.pressure_level == PressureLevel::Survival
    }

    /// Sum of module day spans.
    pub fn total_days(&self) -> u32 {
        self.modules.iter().map(|m| m.day_span).sum()
    }

    pub fn module(&self, id: ModuleId) -> Option<&StudyPlanModule> {
        self.modules.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("Beginner".parse::<UserLevel>().unwrap(), UserLevel::Beginner);
        assert_eq!(" sprint ".parse::<UserLevel>().unwrap(), UserLevel::Sprint);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = "expert".parse::<UserLevel>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownLevel("expert".to_string()));
    }

    #[test]
    fn validate_rejects_zero_days_and_hours() {
        let zero_days = UserInput::new(0, 4, UserLevel::Beginner, SelfTest::default());
        assert!(matches!(
            zero_days.validate(),
            Err(ValidationError::BelowMinimum { field: "days_remaining", .. })
        ));

        let zero_hours = UserInput::new(10, 0, UserLevel::Beginner, SelfTest::default());
        assert!(matches!(
            zero_hours.validate(),
            Err(ValidationError::BelowMinimum { field: "daily_hours", .. })
        ));
    }

    #[test]
    fn pressure_levels_order_by_severity() {
        assert!(PressureLevel::Easy < PressureLevel::Medium);
        assert!(PressureLevel::Medium < PressureLevel::High);
        assert!(PressureLevel::High < PressureLevel::Survival);
    }

    #[test]
    fn module_id_serializes_to_short_ids() {
        let json = serde_json::to_string(&ModuleId::Fortification).unwrap();
        assert_eq!(json, "\"m2\"");
        let json = serde_json::to_string(&ModuleId::Survival).unwrap();
        assert_eq!(json, "\"survival\"");
    }

    #[test]
    fn self_test_counts_flags() {
        assert_eq!(SelfTest::default().passed_count(), 0);
        assert_eq!(SelfTest::all().passed_count(), 3);
    }
}
