//! nettakip-coach — AI coaching text.
//!
//! Wraps an [`AdviceModel`] with the three prompt templates and the fallback
//! policy: any model failure is logged and degraded to a fixed Turkish
//! fallback string, and an empty study history short-circuits to a
//! per-template "no data yet" message without calling the model at all.

pub mod gemini;
pub mod mock;
pub mod prompts;

use chrono::Utc;

use nettakip_core::model::StudyEntry;
use nettakip_core::traits::AdviceModel;

pub use gemini::GeminiModel;
pub use mock::MockModel;

/// Returned whenever the model fails, whatever the cause.
pub const FALLBACK: &str =
    "Şu anda yapay zeka koçuna ulaşılamıyor. Lütfen daha sonra tekrar dene.";

const NO_DATA_ADVICE: &str =
    "Henüz veri girişi yapılmamış. Analiz için lütfen önce çalıştığın dersleri ekle.";
const NO_DATA_PLAN: &str =
    "Haftalık plan oluşturmak için önce birkaç çalışma kaydı eklemelisin.";
const NO_DATA_REPORT: &str =
    "Performans analizi yapabilmem için birkaç çalışma kaydın olmalı.";

/// The coach surface: always answers with text, never with an error.
pub struct Coach {
    model: Box<dyn AdviceModel>,
}

impl Coach {
    pub fn new(model: Box<dyn AdviceModel>) -> Self {
        Self { model }
    }

    pub async fn study_advice(&self, entries: &[StudyEntry]) -> String {
        if entries.is_empty() {
            return NO_DATA_ADVICE.to_string();
        }
        self.call(&prompts::advice_prompt(entries)).await
    }

    pub async fn weekly_plan(&self, entries: &[StudyEntry]) -> String {
        if entries.is_empty() {
            return NO_DATA_PLAN.to_string();
        }
        self.call(&prompts::weekly_plan_prompt(entries)).await
    }

    pub async fn performance_report(&self, entries: &[StudyEntry]) -> String {
        if entries.is_empty() {
            return NO_DATA_REPORT.to_string();
        }
        self.call(&prompts::performance_prompt(entries, Utc::now()))
            .await
    }

    async fn call(&self, prompt: &str) -> String {
        match self.model.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(model = self.model.name(), error = %e, "coach request failed");
                FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nettakip_core::model::Subject;

    fn entries() -> Vec<StudyEntry> {
        vec![StudyEntry::new(
            Utc::now(),
            Subject::Fizik,
            "Optik",
            12,
            4,
            40,
        )]
    }

    #[tokio::test]
    async fn empty_history_skips_the_model() {
        let model = std::sync::Arc::new(MockModel::with_fixed_response("x"));
        let coach = Coach::new(Box::new(std::sync::Arc::clone(&model)));
        assert_eq!(coach.study_advice(&[]).await, NO_DATA_ADVICE);
        assert_eq!(coach.weekly_plan(&[]).await, NO_DATA_PLAN);
        assert_eq!(coach.performance_report(&[]).await, NO_DATA_REPORT);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn advice_passes_summary_to_model() {
        let model = std::sync::Arc::new(MockModel::with_fixed_response("## Tavsiye"));
        let coach = Coach::new(Box::new(std::sync::Arc::clone(&model)));
        let reply = coach.study_advice(&entries()).await;
        assert_eq!(reply, "## Tavsiye");
        assert!(model.last_prompt().unwrap().contains("Optik"));
    }

    #[tokio::test]
    async fn any_failure_degrades_to_fallback() {
        let coach = Coach::new(Box::new(MockModel::failing()));
        assert_eq!(coach.study_advice(&entries()).await, FALLBACK);
        assert_eq!(coach.weekly_plan(&entries()).await, FALLBACK);
        assert_eq!(coach.performance_report(&entries()).await, FALLBACK);
    }
}
