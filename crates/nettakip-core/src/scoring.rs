//! Net-score arithmetic.
//!
//! YKS scoring cancels one correct answer for every four wrong ones:
//! `net = correct - incorrect / 4`. The same formula applies to a single
//! study entry, a single exam section, and any rollup of either; rollups
//! always sum per-item nets rather than pooling counts first.

use std::collections::BTreeMap;

use crate::model::{DenemeEntry, StudyEntry, SubjectScore};

/// The net score for a raw correct/incorrect pair.
///
/// Exact floating-point division, may be negative, no upper bound.
pub fn net_score(correct: u32, incorrect: u32) -> f64 {
    correct as f64 - incorrect as f64 / 4.0
}

/// The net score of one study entry.
pub fn entry_net(entry: &StudyEntry) -> f64 {
    net_score(entry.correct_count, entry.incorrect_count)
}

/// The net score of one exam section.
pub fn section_net(score: &SubjectScore) -> f64 {
    net_score(score.correct, score.incorrect)
}

/// The whole-exam net: sum of the per-section nets.
pub fn exam_total_net(scores: &BTreeMap<String, SubjectScore>) -> f64 {
    scores.values().map(section_net).sum()
}

/// The displayed aggregate net over a set of entries: always the sum of
/// per-entry nets, never `net_score` of pooled counts.
pub fn entries_net(entries: &[StudyEntry]) -> f64 {
    entries.iter().map(entry_net).sum()
}

/// Recompute an exam's total net from its scores, warning if the stored
/// aggregate has drifted. Returns the recomputed value.
pub fn reconcile_total_net(exam: &DenemeEntry) -> f64 {
    let recomputed = exam_total_net(&exam.scores);
    if (recomputed - exam.total_net).abs() > 0.005 {
        tracing::warn!(
            exam_id = %exam.id,
            stored = exam.total_net,
            recomputed,
            "stored total_net diverges from section scores, using recomputed value"
        );
    }
    recomputed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExamType, Subject};
    use chrono::Utc;

    #[test]
    fn net_formula() {
        assert!((net_score(30, 8) - 28.0).abs() < f64::EPSILON);
        assert!((net_score(0, 4) + 1.0).abs() < f64::EPSILON);
        assert!((net_score(0, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_incorrect_is_identity() {
        for c in 0..200 {
            assert!((net_score(c, 0) - c as f64).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn exam_total_is_sum_of_section_nets() {
        let mut scores = BTreeMap::new();
        scores.insert("a".into(), SubjectScore { correct: 20, incorrect: 4 });
        scores.insert("b".into(), SubjectScore { correct: 10, incorrect: 0 });
        assert!((exam_total_net(&scores) - 29.0).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregate_sums_individual_nets_not_pooled_counts() {
        let entries = vec![
            StudyEntry::new(Utc::now(), Subject::Matematik, "a", 10, 1, 30),
            StudyEntry::new(Utc::now(), Subject::Fizik, "b", 10, 2, 30),
            StudyEntry::new(Utc::now(), Subject::Kimya, "c", 10, 3, 30),
        ];
        let summed: f64 = entries.iter().map(entry_net).sum();
        assert!((entries_net(&entries) - summed).abs() < f64::EPSILON);
        // Pooling counts first happens to agree here because net is linear in
        // (correct, incorrect); the displayed number is defined as the sum of
        // per-entry nets regardless.
        assert!((entries_net(&entries) - net_score(30, 6)).abs() < f64::EPSILON);
    }

    #[test]
    fn reconcile_repairs_divergent_stored_aggregate() {
        let mut scores = BTreeMap::new();
        scores.insert("turkce".into(), SubjectScore { correct: 20, incorrect: 4 });
        let mut exam = DenemeEntry::new(ExamType::Tyt, scores);
        exam.total_net = 5.0; // simulate a partial write
        assert!((reconcile_total_net(&exam) - 19.0).abs() < f64::EPSILON);
    }
}
