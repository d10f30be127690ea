//! Plain-text output for the non-interactive commands.

use std::io::{self, Write};

use cadence::history::{format_elapsed, format_practice_time};
use cadence::{HistorySummary, PerformanceLevel, Recommendation, ResultRecord};

use crate::language::LANGUAGES;

/// One-line summary of a finished attempt
pub fn result_line(record: &ResultRecord) -> String {
    format!(
        "{} wpm | {}% accuracy | {} errors | {} | {}",
        record.words_per_minute,
        record.accuracy_percent,
        record.error_count,
        format_elapsed(record.elapsed_seconds),
        PerformanceLevel::from(record),
    )
}

/// Recent results, newest first
pub fn write_history<W: Write>(out: &mut W, records: &[ResultRecord]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "No results yet. Run `swiftype practice` to take a test.");
    }

    writeln!(
        out,
        "{:<17} {:>4} {:>9} {:>6} {:>6}  LEVEL",
        "DATE", "WPM", "ACCURACY", "ERRORS", "TIME"
    )?;
    for record in records.iter().rev() {
        writeln!(
            out,
            "{:<17} {:>4} {:>8}% {:>6} {:>6}  {}",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.words_per_minute,
            record.accuracy_percent,
            record.error_count,
            format_elapsed(record.elapsed_seconds),
            PerformanceLevel::from(record),
        )?;
    }
    Ok(())
}

/// Error rate and advice lines for a finished attempt
pub fn result_details(record: &ResultRecord) -> Vec<String> {
    let mut lines = vec![format!("Error rate: {:.1}%", record.error_rate())];
    lines.extend(
        Recommendation::for_record(record)
            .into_iter()
            .map(|advice| format!("{advice}: {}", advice.advice())),
    );
    lines
}

pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &HistorySummary,
    goal_wpm: u32,
) -> io::Result<()> {
    writeln!(out, "Tests taken:      {}", summary.total_tests)?;
    writeln!(out, "Average speed:    {} wpm", summary.average_wpm)?;
    writeln!(out, "Average accuracy: {}%", summary.average_accuracy)?;
    writeln!(out, "Best speed:       {} wpm", summary.best_wpm)?;
    writeln!(
        out,
        "Practice time:    {}",
        format_practice_time(summary.total_seconds)
    )?;
    writeln!(
        out,
        "Level:            {}",
        PerformanceLevel::from_wpm(summary.average_wpm)
    )?;

    let progress = summary.goal_progress(goal_wpm);
    if progress.is_reached() {
        writeln!(out, "Goal:             {goal_wpm} wpm, achieved")?;
    } else {
        writeln!(
            out,
            "Goal:             {goal_wpm} wpm, {}% there, {} wpm to go",
            progress.percent(),
            progress.remaining()
        )?;
    }

    let achievements = summary.achievements(goal_wpm);
    if !achievements.is_empty() {
        writeln!(out, "Achievements:")?;
        for achievement in achievements {
            writeln!(out, "  {achievement}: {}", achievement.description(goal_wpm))?;
        }
    }
    Ok(())
}

/// The language catalog, marking `selected`
pub fn write_languages<W: Write>(out: &mut W, selected: &str) -> io::Result<()> {
    for language in LANGUAGES {
        let marker = if language.code == selected { '*' } else { ' ' };
        writeln!(
            out,
            "{marker} {:<3} {:<9} {:<10} {}",
            language.code, language.name, language.native_name, language.direction
        )?;
    }
    Ok(())
}
