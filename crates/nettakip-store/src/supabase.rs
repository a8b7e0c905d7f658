//! Supabase PostgREST record store.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::instrument;
use uuid::Uuid;

use nettakip_core::config::SupabaseConfig;
use nettakip_core::error::StoreError;
use nettakip_core::model::{DenemeEntry, StudyEntry};
use nettakip_core::traits::RecordStore;

use crate::rows::{DenemeRow, StudyEntryRow};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Record store backed by a Supabase project's PostgREST endpoint.
pub struct SupabaseStore {
    base_url: String,
    api_key: String,
    study_table: String,
    deneme_table: String,
    client: reqwest::Client,
}

impl SupabaseStore {
    pub fn new(
        base_url: &str,
        api_key: &str,
        study_table: impl Into<String>,
        deneme_table: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            study_table: study_table.into(),
            deneme_table: deneme_table.into(),
            client,
        }
    }

    pub fn from_config(config: &SupabaseConfig) -> Self {
        Self::new(
            &config.url,
            &config.api_key,
            config.study_table.clone(),
            config.deneme_table.clone(),
        )
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout(DEFAULT_TIMEOUT_SECS)
            } else {
                StoreError::Network(e.to_string())
            }
        })?;
        check_status(response).await
    }

    /// Insert with `Prefer: return=representation` and take the first
    /// returned row.
    async fn insert_returning<Row>(&self, table: &str, row: &Row) -> Result<Row, StoreError>
    where
        Row: serde::Serialize + serde::de::DeserializeOwned,
    {
        let response = self
            .send(
                self.request(Method::POST, table)
                    .header("Prefer", "return=representation")
                    .json(&[row]),
            )
            .await?;
        let mut rows: Vec<Row> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::Decode("insert returned no rows".into()));
        }
        Ok(rows.remove(0))
    }

    async fn list_ordered<Row>(&self, table: &str, order: &str) -> Result<Vec<Row>, StoreError>
    where
        Row: serde::de::DeserializeOwned,
    {
        let response = self
            .send(
                self.request(Method::GET, table)
                    .query(&[("select", "*"), ("order", order)]),
            )
            .await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Delete by id. PostgREST reports success even when no row matched,
    /// which gives the deletion-idempotence behavior for free.
    async fn delete_by_id(&self, table: &str, id: Uuid) -> Result<(), StoreError> {
        self.send(
            self.request(Method::DELETE, table)
                .query(&[("id", format!("eq.{id}"))]),
        )
        .await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5)
            * 1000;
        return Err(StoreError::RateLimited {
            retry_after_ms: retry_after,
        });
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::AuthenticationFailed(body));
    }
    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }
    Ok(response)
}

#[async_trait]
impl RecordStore for SupabaseStore {
    #[instrument(skip(self, entry), fields(id = %entry.id))]
    async fn insert_entry(&self, entry: &StudyEntry) -> Result<StudyEntry, StoreError> {
        let row = StudyEntryRow::from(entry);
        let stored = self.insert_returning(&self.study_table, &row).await?;
        Ok(stored.into())
    }

    #[instrument(skip(self))]
    async fn list_entries(&self) -> Result<Vec<StudyEntry>, StoreError> {
        let rows: Vec<StudyEntryRow> = self.list_ordered(&self.study_table, "date.desc").await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn delete_entry(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_by_id(&self.study_table, id).await
    }

    #[instrument(skip(self, exam), fields(id = %exam.id))]
    async fn insert_exam(&self, exam: &DenemeEntry) -> Result<DenemeEntry, StoreError> {
        let row = DenemeRow::from(exam);
        let stored = self.insert_returning(&self.deneme_table, &row).await?;
        Ok(stored.into())
    }

    #[instrument(skip(self))]
    async fn list_exams(&self) -> Result<Vec<DenemeEntry>, StoreError> {
        let rows: Vec<DenemeRow> = self
            .list_ordered(&self.deneme_table, "created_at.desc")
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn delete_exam(&self, id: Uuid) -> Result<(), StoreError> {
        self.delete_by_id(&self.deneme_table, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nettakip_core::model::{ExamType, Subject, SubjectScore};
    use std::collections::BTreeMap;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> SupabaseStore {
        SupabaseStore::new(&server.uri(), "test-key", "study_sessions", "deneme_results")
    }

    fn sample_entry() -> StudyEntry {
        StudyEntry::new(Utc::now(), Subject::Matematik, "Türev", 30, 8, 60)
    }

    #[tokio::test]
    async fn insert_entry_round_trips() {
        let server = MockServer::start().await;
        let entry = sample_entry();
        let row_json = serde_json::to_value(StudyEntryRow::from(&entry)).unwrap();

        Mock::given(method("POST"))
            .and(path("/rest/v1/study_sessions"))
            .and(header("apikey", "test-key"))
            .and(header("Prefer", "return=representation"))
            .and(body_partial_json(serde_json::json!([{
                "subject": "Matematik",
                "question_count": 38,
                "correct_count": 30,
                "incorrect_count": 8,
                "duration_minutes": 60,
            }])))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!([row_json])),
            )
            .mount(&server)
            .await;

        let stored = store(&server).insert_entry(&entry).await.unwrap();
        assert_eq!(stored, entry);
    }

    #[tokio::test]
    async fn list_entries_ordered_by_date_desc() {
        let server = MockServer::start().await;
        let entry = sample_entry();
        let row_json = serde_json::to_value(StudyEntryRow::from(&entry)).unwrap();

        Mock::given(method("GET"))
            .and(path("/rest/v1/study_sessions"))
            .and(query_param("order", "date.desc"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([row_json])),
            )
            .mount(&server)
            .await;

        let entries = store(&server).list_entries().await.unwrap();
        assert_eq!(entries, vec![entry]);
    }

    #[tokio::test]
    async fn delete_entry_by_id() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/study_sessions"))
            .and(query_param("id", format!("eq.{id}")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        store(&server).delete_entry(id).await.unwrap();
    }

    #[tokio::test]
    async fn list_exams_repairs_stored_total_net() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/deneme_results"))
            .and(query_param("order", "created_at.desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": Uuid::new_v4(),
                "exam_type": "TYT",
                "scores": { "turkce": { "correct": 20, "incorrect": 4 } },
                "total_net": 99.0,
                "created_at": Utc::now(),
            }])))
            .mount(&server)
            .await;

        let exams = store(&server).list_exams().await.unwrap();
        assert_eq!(exams.len(), 1);
        assert!((exams[0].total_net - 19.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn insert_exam_sends_snake_case_columns() {
        let server = MockServer::start().await;
        let mut scores = BTreeMap::new();
        scores.insert("fen".into(), SubjectScore { correct: 15, incorrect: 4 });
        let exam = DenemeEntry::new(ExamType::Tyt, scores);
        let row_json = serde_json::to_value(DenemeRow::from(&exam)).unwrap();

        Mock::given(method("POST"))
            .and(path("/rest/v1/deneme_results"))
            .and(body_partial_json(serde_json::json!([{
                "exam_type": "TYT",
                "total_net": 14.0,
            }])))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!([row_json])),
            )
            .mount(&server)
            .await;

        let stored = store(&server).insert_exam(&exam).await.unwrap();
        assert_eq!(stored.id, exam.id);
    }

    #[tokio::test]
    async fn auth_failure_is_classified() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/study_sessions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = store(&server).list_entries().await.unwrap_err();
        assert!(matches!(err, StoreError::AuthenticationFailed(_)));
        assert!(err.is_permanent());
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/study_sessions"))
            .respond_with(
                ResponseTemplate::new(429).insert_header("retry-after", "7"),
            )
            .mount(&server)
            .await;

        let err = store(&server).list_entries().await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::RateLimited { retry_after_ms: 7000 }
        ));
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/deneme_results"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = store(&server).delete_exam(Uuid::new_v4()).await.unwrap_err();
        match err {
            StoreError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/study_sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = store(&server).list_entries().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }
}
