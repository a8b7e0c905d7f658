//! Core data model types for nettakip.
//!
//! These are the fundamental types the whole system uses to represent study
//! sessions, mock-exam ("deneme") results, and the fixed YKS subject and
//! exam-section tables.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed set of YKS study subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    #[serde(rename = "Türkçe")]
    Turkce,
    #[serde(rename = "Matematik")]
    Matematik,
    #[serde(rename = "Geometri")]
    Geometri,
    #[serde(rename = "Fizik")]
    Fizik,
    #[serde(rename = "Kimya")]
    Kimya,
    #[serde(rename = "Biyoloji")]
    Biyoloji,
    #[serde(rename = "Tarih")]
    Tarih,
    #[serde(rename = "Coğrafya")]
    Cografya,
    #[serde(rename = "Felsefe")]
    Felsefe,
    #[serde(rename = "Din Kültürü")]
    Din,
    #[serde(rename = "Yabancı Dil")]
    Dil,
}

impl Subject {
    /// All subjects, in the order the original dashboard lists them.
    pub const ALL: [Subject; 11] = [
        Subject::Turkce,
        Subject::Matematik,
        Subject::Geometri,
        Subject::Fizik,
        Subject::Kimya,
        Subject::Biyoloji,
        Subject::Tarih,
        Subject::Cografya,
        Subject::Felsefe,
        Subject::Din,
        Subject::Dil,
    ];

    /// The Turkish label, which is also the canonical serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Turkce => "Türkçe",
            Subject::Matematik => "Matematik",
            Subject::Geometri => "Geometri",
            Subject::Fizik => "Fizik",
            Subject::Kimya => "Kimya",
            Subject::Biyoloji => "Biyoloji",
            Subject::Tarih => "Tarih",
            Subject::Cografya => "Coğrafya",
            Subject::Felsefe => "Felsefe",
            Subject::Din => "Din Kültürü",
            Subject::Dil => "Yabancı Dil",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Subject {
    type Err = String;

    /// Accepts the Turkish label or an ASCII alias (for CLI input).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "türkçe" | "turkce" => Ok(Subject::Turkce),
            "matematik" | "mat" => Ok(Subject::Matematik),
            "geometri" => Ok(Subject::Geometri),
            "fizik" => Ok(Subject::Fizik),
            "kimya" => Ok(Subject::Kimya),
            "biyoloji" => Ok(Subject::Biyoloji),
            "tarih" => Ok(Subject::Tarih),
            "coğrafya" | "cografya" => Ok(Subject::Cografya),
            "felsefe" => Ok(Subject::Felsefe),
            "din kültürü" | "din" => Ok(Subject::Din),
            "yabancı dil" | "yabanci dil" | "dil" => Ok(Subject::Dil),
            other => Err(format!("unknown subject: {other}")),
        }
    }
}

/// One logged study session.
///
/// Entries are immutable once created: they are inserted and deleted, never
/// edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyEntry {
    /// Unique identifier for this entry.
    pub id: Uuid,
    /// When the session happened.
    pub date: DateTime<Utc>,
    /// Subject studied.
    pub subject: Subject,
    /// Free-text topic within the subject.
    pub topic: String,
    /// Total questions solved. Always `correct_count + incorrect_count`.
    pub question_count: u32,
    /// Correctly answered questions.
    pub correct_count: u32,
    /// Incorrectly answered questions.
    pub incorrect_count: u32,
    /// Session length in minutes.
    pub duration_minutes: u32,
}

impl StudyEntry {
    /// Build an entry with a fresh id, computing `question_count` so the
    /// correct/incorrect/total invariant holds by construction.
    pub fn new(
        date: DateTime<Utc>,
        subject: Subject,
        topic: impl Into<String>,
        correct_count: u32,
        incorrect_count: u32,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            subject,
            topic: topic.into(),
            question_count: correct_count.saturating_add(incorrect_count),
            correct_count,
            incorrect_count,
            duration_minutes,
        }
    }
}

/// The two mock-exam formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "TYT")]
    Tyt,
    #[serde(rename = "AYT")]
    Ayt,
}

impl ExamType {
    /// The fixed scored sections for this exam format.
    pub fn sections(&self) -> &'static [Section] {
        match self {
            ExamType::Tyt => TYT_SECTIONS,
            ExamType::Ayt => AYT_SECTIONS,
        }
    }

    /// Look up a section of this format by its stable key.
    pub fn section(&self, key: &str) -> Option<&'static Section> {
        self.sections().iter().find(|s| s.key == key)
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamType::Tyt => write!(f, "TYT"),
            ExamType::Ayt => write!(f, "AYT"),
        }
    }
}

impl FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tyt" => Ok(ExamType::Tyt),
            "ayt" => Ok(ExamType::Ayt),
            other => Err(format!("unknown exam type: {other}")),
        }
    }
}

/// A scored section of a mock exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Stable key used in the stored `scores` map.
    pub key: &'static str,
    /// Turkish display label.
    pub label: &'static str,
    /// Maximum question count in this section.
    pub max_questions: u32,
    /// Section grouping shown in the tracker.
    pub group: &'static str,
}

pub const TYT_SECTIONS: &[Section] = &[
    Section { key: "turkce", label: "Türkçe", max_questions: 40, group: "TYT" },
    Section { key: "sosyal", label: "Sosyal Bilimler", max_questions: 20, group: "TYT" },
    Section { key: "matematik", label: "Temel Matematik", max_questions: 40, group: "TYT" },
    Section { key: "fen", label: "Fen Bilimleri", max_questions: 20, group: "TYT" },
];

pub const AYT_SECTIONS: &[Section] = &[
    Section { key: "matematik_ayt", label: "Matematik", max_questions: 40, group: "Sayısal" },
    Section { key: "fizik", label: "Fizik", max_questions: 14, group: "Sayısal" },
    Section { key: "kimya", label: "Kimya", max_questions: 13, group: "Sayısal" },
    Section { key: "biyoloji", label: "Biyoloji", max_questions: 13, group: "Sayısal" },
    Section { key: "edebiyat", label: "Türk Dili ve Edebiyatı", max_questions: 24, group: "Sözel / EA" },
    Section { key: "tarih1", label: "Tarih-1", max_questions: 10, group: "Sözel / EA" },
    Section { key: "cografya1", label: "Coğrafya-1", max_questions: 6, group: "Sözel / EA" },
    Section { key: "tarih2", label: "Tarih-2", max_questions: 11, group: "Sözel" },
    Section { key: "cografya2", label: "Coğrafya-2", max_questions: 11, group: "Sözel" },
    Section { key: "felsefe", label: "Felsefe Grubu", max_questions: 12, group: "Sözel" },
];

/// Correct/incorrect counts for one exam section.
///
/// Owned entirely by its parent [`DenemeEntry`]; no independent lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectScore {
    pub correct: u32,
    pub incorrect: u32,
}

/// One saved mock-exam result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenemeEntry {
    /// Unique identifier for this exam record.
    pub id: Uuid,
    /// Which of the two formats was taken.
    pub exam_type: ExamType,
    /// Per-section scores, keyed by [`Section::key`].
    pub scores: BTreeMap<String, SubjectScore>,
    /// Sum of per-section nets, computed at save time and stored redundantly.
    pub total_net: f64,
    /// When the result was saved.
    pub created_at: DateTime<Utc>,
}

impl DenemeEntry {
    /// Build an exam record with a fresh id, computing `total_net` from the
    /// section scores.
    pub fn new(exam_type: ExamType, scores: BTreeMap<String, SubjectScore>) -> Self {
        let total_net = crate::scoring::exam_total_net(&scores);
        Self {
            id: Uuid::new_v4(),
            exam_type,
            scores,
            total_net,
            created_at: Utc::now(),
        }
    }

    /// Validate every score against the section table of this exam format:
    /// keys must exist and correct + incorrect must fit the section maximum.
    pub fn validate_scores(&self) -> Result<(), String> {
        for (key, score) in &self.scores {
            let Some(section) = self.exam_type.section(key) else {
                return Err(format!("unknown {} section: {key}", self.exam_type));
            };
            let answered = score.correct.saturating_add(score.incorrect);
            if answered > section.max_questions {
                return Err(format!(
                    "{} has {answered} answers but only {} questions",
                    section.label, section.max_questions
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_display_and_parse() {
        assert_eq!(Subject::Turkce.to_string(), "Türkçe");
        assert_eq!("turkce".parse::<Subject>().unwrap(), Subject::Turkce);
        assert_eq!("Coğrafya".parse::<Subject>().unwrap(), Subject::Cografya);
        assert_eq!("cografya".parse::<Subject>().unwrap(), Subject::Cografya);
        assert_eq!("mat".parse::<Subject>().unwrap(), Subject::Matematik);
        assert!("beden".parse::<Subject>().is_err());
    }

    #[test]
    fn subject_serializes_as_turkish_label() {
        let json = serde_json::to_string(&Subject::Din).unwrap();
        assert_eq!(json, "\"Din Kültürü\"");
        let back: Subject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Subject::Din);
    }

    #[test]
    fn study_entry_question_count_invariant() {
        let entry = StudyEntry::new(Utc::now(), Subject::Matematik, "Türev", 30, 8, 60);
        assert_eq!(entry.question_count, 38);
        assert_eq!(entry.question_count, entry.correct_count + entry.incorrect_count);
    }

    #[test]
    fn question_count_saturates_on_extreme_inputs() {
        let entry = StudyEntry::new(Utc::now(), Subject::Matematik, "Türev", u32::MAX, 1, 60);
        assert_eq!(entry.question_count, u32::MAX);

        let mut scores = BTreeMap::new();
        scores.insert("turkce".into(), SubjectScore { correct: u32::MAX, incorrect: 1 });
        let exam = DenemeEntry::new(ExamType::Tyt, scores);
        assert!(exam.validate_scores().is_err());
    }

    #[test]
    fn exam_type_sections() {
        assert_eq!(ExamType::Tyt.sections().len(), 4);
        assert_eq!(ExamType::Ayt.sections().len(), 10);
        assert_eq!(ExamType::Tyt.section("turkce").unwrap().max_questions, 40);
        assert!(ExamType::Tyt.section("edebiyat").is_none());
        assert_eq!(ExamType::Ayt.section("fizik").unwrap().max_questions, 14);
    }

    #[test]
    fn deneme_computes_total_net() {
        let mut scores = BTreeMap::new();
        scores.insert("turkce".into(), SubjectScore { correct: 20, incorrect: 4 });
        scores.insert("fen".into(), SubjectScore { correct: 10, incorrect: 0 });
        let exam = DenemeEntry::new(ExamType::Tyt, scores);
        assert!((exam.total_net - 29.0).abs() < f64::EPSILON);
        assert!(exam.validate_scores().is_ok());
    }

    #[test]
    fn deneme_rejects_unknown_section_and_overflow() {
        let mut scores = BTreeMap::new();
        scores.insert("edebiyat".into(), SubjectScore { correct: 10, incorrect: 0 });
        let exam = DenemeEntry::new(ExamType::Tyt, scores);
        assert!(exam.validate_scores().is_err());

        let mut scores = BTreeMap::new();
        scores.insert("fen".into(), SubjectScore { correct: 19, incorrect: 2 });
        let exam = DenemeEntry::new(ExamType::Tyt, scores);
        assert!(exam.validate_scores().unwrap_err().contains("Fen Bilimleri"));
    }

    #[test]
    fn deneme_serde_roundtrip() {
        let mut scores = BTreeMap::new();
        scores.insert("fizik".into(), SubjectScore { correct: 10, incorrect: 2 });
        let exam = DenemeEntry::new(ExamType::Ayt, scores);
        let json = serde_json::to_string(&exam).unwrap();
        assert!(json.contains("\"AYT\""));
        let back: DenemeEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exam);
    }
}
