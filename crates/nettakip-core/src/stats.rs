//! Stat aggregation: daily summaries, per-subject rollups, weekly buckets,
//! and the exam countdown.
//!
//! All of these are single-pass reductions over the locally cached entry
//! list; nothing here touches the record store.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::{StudyEntry, Subject};
use crate::scoring::entry_net;

/// The dashboard's daily cards for one calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailySummary {
    pub total_questions: u32,
    pub total_net: f64,
    pub total_minutes: u32,
}

/// Summarize the entries that fall on the given UTC calendar day.
pub fn daily_summary(entries: &[StudyEntry], day: NaiveDate) -> DailySummary {
    let mut summary = DailySummary::default();
    for entry in entries.iter().filter(|e| e.date.date_naive() == day) {
        summary.total_questions += entry.question_count;
        summary.total_net += entry_net(entry);
        summary.total_minutes += entry.duration_minutes;
    }
    summary
}

/// Per-subject question counts for one day, ordered by the fixed subject
/// list. Subjects with no questions are omitted.
pub fn subject_breakdown(entries: &[StudyEntry], day: NaiveDate) -> Vec<(Subject, u32)> {
    let mut counts: HashMap<Subject, u32> = HashMap::new();
    for entry in entries.iter().filter(|e| e.date.date_naive() == day) {
        *counts.entry(entry.subject).or_default() += entry.question_count;
    }
    Subject::ALL
        .iter()
        .filter_map(|s| counts.get(s).map(|&q| (*s, q)))
        .collect()
}

/// All-time rollup for one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStats {
    pub subject: Subject,
    pub total_questions: u32,
    pub total_correct: u32,
    pub total_incorrect: u32,
    pub total_minutes: u32,
    pub session_count: u32,
    /// Sum of per-entry nets, not the net of pooled counts.
    pub net_sum: f64,
    pub last_date: DateTime<Utc>,
}

impl SubjectStats {
    pub fn average_net(&self) -> f64 {
        self.net_sum / self.session_count.max(1) as f64
    }

    /// Correct answers as a percentage of questions solved.
    pub fn accuracy_pct(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            self.total_correct as f64 / self.total_questions as f64 * 100.0
        }
    }

    /// Solving speed in questions per hour.
    pub fn questions_per_hour(&self) -> f64 {
        if self.total_minutes == 0 {
            0.0
        } else {
            self.total_questions as f64 / self.total_minutes as f64 * 60.0
        }
    }

    /// Whole days since this subject was last studied.
    pub fn days_since_studied(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_date).num_days().max(0)
    }
}

/// Roll up all entries per subject, ordered by the fixed subject list.
pub fn subject_stats(entries: &[StudyEntry]) -> Vec<SubjectStats> {
    let mut by_subject: HashMap<Subject, SubjectStats> = HashMap::new();
    for entry in entries {
        let stats = by_subject
            .entry(entry.subject)
            .or_insert_with(|| SubjectStats {
                subject: entry.subject,
                total_questions: 0,
                total_correct: 0,
                total_incorrect: 0,
                total_minutes: 0,
                session_count: 0,
                net_sum: 0.0,
                last_date: entry.date,
            });
        stats.total_questions += entry.question_count;
        stats.total_correct += entry.correct_count;
        stats.total_incorrect += entry.incorrect_count;
        stats.total_minutes += entry.duration_minutes;
        stats.session_count += 1;
        stats.net_sum += entry_net(entry);
        if entry.date > stats.last_date {
            stats.last_date = entry.date;
        }
    }
    Subject::ALL
        .iter()
        .filter_map(|s| by_subject.remove(s))
        .collect()
}

/// One day of the trailing-week activity chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayActivity {
    pub day: NaiveDate,
    pub total_questions: u32,
    pub total_net: f64,
    pub total_minutes: u32,
}

/// The trailing seven calendar days ending at `today`, oldest first.
pub fn weekly_activity(entries: &[StudyEntry], today: NaiveDate) -> Vec<DayActivity> {
    (0..7)
        .rev()
        .map(|back| {
            let day = today - Duration::days(back);
            let summary = daily_summary(entries, day);
            DayActivity {
                day,
                total_questions: summary.total_questions,
                total_net: summary.total_net,
                total_minutes: summary.total_minutes,
            }
        })
        .collect()
}

/// Time remaining until the exam, split for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Remaining time until `exam_date`, or `None` once the instant has passed.
pub fn exam_countdown(now: DateTime<Utc>, exam_date: DateTime<Utc>) -> Option<Countdown> {
    let remaining = exam_date - now;
    if remaining <= Duration::zero() {
        return None;
    }
    let secs = remaining.num_seconds();
    Some(Countdown {
        days: secs / 86_400,
        hours: secs % 86_400 / 3_600,
        minutes: secs % 3_600 / 60,
        seconds: secs % 60,
    })
}
