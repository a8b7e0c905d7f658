//! Wire row types for the stored schema.
//!
//! The stored tables use lower-snake-case column names; these structs are the
//! explicit mapping at that boundary. Subjects cross the wire as their
//! Turkish labels and exam types as "TYT"/"AYT" (the canonical serde forms of
//! the domain enums); exam `scores` cross as a JSON object, though older rows
//! may hold it as a JSON-encoded string.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use nettakip_core::model::{DenemeEntry, ExamType, StudyEntry, Subject, SubjectScore};
use nettakip_core::scoring::reconcile_total_net;

/// A row of the study-entry table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyEntryRow {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub subject: Subject,
    pub topic: String,
    pub question_count: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub duration_minutes: u32,
}

impl From<&StudyEntry> for StudyEntryRow {
    fn from(entry: &StudyEntry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            subject: entry.subject,
            topic: entry.topic.clone(),
            question_count: entry.question_count,
            correct_count: entry.correct_count,
            incorrect_count: entry.incorrect_count,
            duration_minutes: entry.duration_minutes,
        }
    }
}

impl From<StudyEntryRow> for StudyEntry {
    fn from(row: StudyEntryRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            subject: row.subject,
            topic: row.topic,
            question_count: row.question_count,
            correct_count: row.correct_count,
            incorrect_count: row.incorrect_count,
            duration_minutes: row.duration_minutes,
        }
    }
}

/// A row of the mock-exam table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenemeRow {
    pub id: Uuid,
    pub exam_type: ExamType,
    #[serde(deserialize_with = "scores_object_or_string")]
    pub scores: BTreeMap<String, SubjectScore>,
    pub total_net: f64,
    pub created_at: DateTime<Utc>,
}

impl From<&DenemeEntry> for DenemeRow {
    fn from(exam: &DenemeEntry) -> Self {
        Self {
            id: exam.id,
            exam_type: exam.exam_type,
            scores: exam.scores.clone(),
            total_net: exam.total_net,
            created_at: exam.created_at,
        }
    }
}

impl From<DenemeRow> for DenemeEntry {
    fn from(row: DenemeRow) -> Self {
        let mut exam = DenemeEntry {
            id: row.id,
            exam_type: row.exam_type,
            scores: row.scores,
            total_net: row.total_net,
            created_at: row.created_at,
        };
        // The stored aggregate is written once at save time; repair it from
        // the section scores on read.
        exam.total_net = reconcile_total_net(&exam);
        exam
    }
}

/// Accept `scores` either as a JSON object or as a JSON-encoded string.
fn scores_object_or_string<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, SubjectScore>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Object(BTreeMap<String, SubjectScore>),
        Encoded(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Object(map) => Ok(map),
        Raw::Encoded(s) => serde_json::from_str(&s).map_err(serde::de::Error::custom),
    }
}
