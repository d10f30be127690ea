//! # History Module - Looking Back at Stored Results
//!
//! Aggregates over a list of [`ResultRecord`]s: a dashboard-style
//! [`HistorySummary`] with [`Achievement`]s and [`GoalProgress`], a coarse
//! [`PerformanceLevel`] and [`Recommendation`]s per result, and the time formatting
//! used when presenting them.
//!
//! ## Targets
//!
//! | Value                | Default | Used by                                         |
//! |----------------------|---------|-------------------------------------------------|
//! | [`TARGET_WPM`]       | 40      | [`Recommendation::FocusOnSpeed`]                |
//! | [`TARGET_ACCURACY`]  | 95      | [`Recommendation::ImproveAccuracy`]             |
//! | [`DEFAULT_GOAL_WPM`] | 50      | [`GoalProgress`], [`Achievement::GoalAchieved`] |

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::record::ResultRecord;
use crate::{SECONDS_PER_MINUTE, div_round_half_up};

/// Speed a single result should reach
pub const TARGET_WPM: u32 = 40;

/// Accuracy a single result should reach
pub const TARGET_ACCURACY: u8 = 95;

/// Average speed goal when none is configured
pub const DEFAULT_GOAL_WPM: u32 = 50;

/// Coarse speed bracket of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum PerformanceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl PerformanceLevel {
    /// Bracket a words-per-minute value
    ///
    /// ```rust
    /// use cadence::PerformanceLevel;
    ///
    /// assert_eq!(PerformanceLevel::from_wpm(29), PerformanceLevel::Beginner);
    /// assert_eq!(PerformanceLevel::from_wpm(30), PerformanceLevel::Intermediate);
    /// assert_eq!(PerformanceLevel::from_wpm(50), PerformanceLevel::Advanced);
    /// assert_eq!(PerformanceLevel::from_wpm(70), PerformanceLevel::Expert);
    /// ```
    pub const fn from_wpm(wpm: u32) -> Self {
        match wpm {
            70.. => Self::Expert,
            50..70 => Self::Advanced,
            30..50 => Self::Intermediate,
            _ => Self::Beginner,
        }
    }

    /// Lowest words-per-minute value inside the bracket
    pub const fn threshold(&self) -> u32 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 30,
            Self::Advanced => 50,
            Self::Expert => 70,
        }
    }
}

impl From<&ResultRecord> for PerformanceLevel {
    fn from(record: &ResultRecord) -> Self {
        Self::from_wpm(record.words_per_minute)
    }
}

/// Aggregate view over all stored results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub total_tests: usize,
    /// Mean WPM, rounded half-up
    pub average_wpm: u32,
    /// Mean accuracy, rounded half-up
    pub average_accuracy: u8,
    pub best_wpm: u32,
    /// Sum of the elapsed time of every result
    pub total_seconds: u64,
}

impl HistorySummary {
    /// Summarize a list of results. An empty list yields all zeros.
    pub fn from_records(records: &[ResultRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let count = records.len() as u64;
        let total_wpm: u64 = records.iter().map(|r| u64::from(r.words_per_minute)).sum();
        let total_accuracy: u64 = records.iter().map(|r| u64::from(r.accuracy_percent)).sum();

        Self {
            total_tests: records.len(),
            average_wpm: u32::try_from(div_round_half_up(total_wpm, count)).unwrap_or(u32::MAX),
            average_accuracy: u8::try_from(div_round_half_up(total_accuracy, count))
                .unwrap_or(100),
            best_wpm: records
                .iter()
                .map(|r| r.words_per_minute)
                .max()
                .unwrap_or_default(),
            total_seconds: records.iter().map(|r| r.elapsed_seconds).sum(),
        }
    }

    /// Every achievement the history has earned, in catalog order
    pub fn achievements(&self, goal_wpm: u32) -> Vec<Achievement> {
        Achievement::iter()
            .filter(|achievement| achievement.is_earned(self, goal_wpm))
            .collect()
    }

    /// How far the average speed is from `goal_wpm`
    pub const fn goal_progress(&self, goal_wpm: u32) -> GoalProgress {
        GoalProgress {
            current_wpm: self.average_wpm,
            goal_wpm,
        }
    }
}

/// Milestones unlocked by practicing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Achievement {
    #[strum(to_string = "First Test")]
    FirstTest,
    #[strum(to_string = "Dedicated Learner")]
    DedicatedLearner,
    #[strum(to_string = "Typing Enthusiast")]
    TypingEnthusiast,
    #[strum(to_string = "Speed Demon")]
    SpeedDemon,
    #[strum(to_string = "Typing Master")]
    TypingMaster,
    #[strum(to_string = "Goal Achieved")]
    GoalAchieved,
}

impl Achievement {
    /// Returns true if `summary` unlocks this achievement
    ///
    /// The goal only counts once at least one test was taken.
    pub const fn is_earned(&self, summary: &HistorySummary, goal_wpm: u32) -> bool {
        match self {
            Self::FirstTest => summary.total_tests >= 1,
            Self::DedicatedLearner => summary.total_tests >= 10,
            Self::TypingEnthusiast => summary.total_tests >= 50,
            Self::SpeedDemon => summary.best_wpm >= 40,
            Self::TypingMaster => summary.best_wpm >= 70,
            Self::GoalAchieved => summary.total_tests > 0 && summary.average_wpm >= goal_wpm,
        }
    }

    pub fn description(&self, goal_wpm: u32) -> String {
        match self {
            Self::FirstTest => "Completed your first typing test".to_string(),
            Self::DedicatedLearner => "Completed 10 typing tests".to_string(),
            Self::TypingEnthusiast => "Completed 50 typing tests".to_string(),
            Self::SpeedDemon => "Achieved 40+ WPM".to_string(),
            Self::TypingMaster => "Achieved 70+ WPM".to_string(),
            Self::GoalAchieved => format!("Reached your goal of {goal_wpm} WPM"),
        }
    }
}

/// Average speed measured against a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    pub current_wpm: u32,
    pub goal_wpm: u32,
}

impl GoalProgress {
    pub const fn is_reached(&self) -> bool {
        self.current_wpm >= self.goal_wpm
    }

    /// Words per minute still missing, 0 once reached
    pub const fn remaining(&self) -> u32 {
        self.goal_wpm.saturating_sub(self.current_wpm)
    }

    /// Share of the goal reached, rounded half-up and capped at 100
    pub const fn percent(&self) -> u8 {
        if self.is_reached() {
            return 100;
        }
        // Below the goal, so the quotient is under 100
        div_round_half_up(self.current_wpm as u64 * 100, self.goal_wpm as u64) as u8
    }
}

/// Advice on what to practice next, based on one result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Recommendation {
    #[strum(to_string = "Focus on Speed")]
    FocusOnSpeed,
    #[strum(to_string = "Improve Accuracy")]
    ImproveAccuracy,
    #[strum(to_string = "Great Job!")]
    GreatJob,
}

impl Recommendation {
    /// Speed and accuracy advice for `record`, or [`Self::GreatJob`] when both targets are met
    pub fn for_record(record: &ResultRecord) -> Vec<Self> {
        let mut advice = Vec::new();
        if record.words_per_minute < TARGET_WPM {
            advice.push(Self::FocusOnSpeed);
        }
        if record.accuracy_percent < TARGET_ACCURACY {
            advice.push(Self::ImproveAccuracy);
        }
        if advice.is_empty() {
            advice.push(Self::GreatJob);
        }
        advice
    }

    pub const fn advice(&self) -> &'static str {
        match self {
            Self::FocusOnSpeed => {
                "Practice regularly to increase your typing speed. Aim for 40+ WPM."
            }
            Self::ImproveAccuracy => {
                "Slow down and focus on accuracy. Speed will naturally follow."
            }
            Self::GreatJob => "You're performing well. Keep practicing to maintain consistency.",
        }
    }
}

/// The most recent `limit` results, oldest first
pub fn recent(records: &[ResultRecord], limit: usize) -> &[ResultRecord] {
    &records[records.len().saturating_sub(limit)..]
}

/// Format seconds as `m:ss`
pub fn format_elapsed(seconds: u64) -> String {
    format!(
        "{}:{:02}",
        seconds / SECONDS_PER_MINUTE,
        seconds % SECONDS_PER_MINUTE
    )
}

/// Format a practice total as `Xh Ym`, or `Ym` below an hour
pub fn format_practice_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / SECONDS_PER_MINUTE;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
