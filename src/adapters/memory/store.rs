//! In-Memory Survey Store
//!
//! Keeps customers, calls, transcripts and responses behind one lock so the
//! reporting joins see a consistent view. Deleting a customer cascades to
//! their calls and results, like the foreign keys in the SQL schema.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::call::Call;
use crate::domain::customer::{Customer, PhoneNumber};
use crate::domain::foundation::{
    CallId, CallStatus, ConversationId, CustomerId, DomainError, ErrorCode,
};
use crate::domain::survey::{QuestionNumber, SurveyResponse, Transcript};
use crate::ports::{
    CallRepository, CustomerRepository, HealthCheck, QuestionStats, ReportReader, ResponseExportRow,
    StatusCounts, SurveyRepository, SurveySummary,
};

#[derive(Debug, Default)]
struct Tables {
    /// Insertion order doubles as creation order.
    customers: Vec<Customer>,
    calls: Vec<Call>,
    transcripts: HashMap<CallId, Transcript>,
    responses: Vec<SurveyResponse>,
}

/// In-memory implementation of the persistence and reporting ports.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemorySurveyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers
    pub async fn customer_count(&self) -> usize {
        self.tables.read().await.customers.len()
    }

    /// Number of stored calls
    pub async fn call_count(&self) -> usize {
        self.tables.read().await.calls.len()
    }
}

fn page<T>(items: impl Iterator<Item = T>, limit: u32, offset: u32) -> Vec<T> {
    items.skip(offset as usize).take(limit as usize).collect()
}

#[async_trait]
impl CustomerRepository for InMemorySurveyStore {
    async fn save(&self, customer: &Customer) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if tables
            .customers
            .iter()
            .any(|c| c.phone_number() == customer.phone_number())
        {
            return Err(DomainError::new(
                ErrorCode::DuplicatePhoneNumber,
                format!("Phone number {} already exists", customer.phone_number()),
            )
            .with_detail("phone_number", customer.phone_number().as_str()));
        }
        tables.customers.push(customer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<Customer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .iter()
            .find(|c| c.phone_number() == phone)
            .cloned())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Customer>, DomainError> {
        let tables = self.tables.read().await;
        Ok(page(tables.customers.iter().cloned(), limit, offset))
    }

    async fn list_ids(&self) -> Result<Vec<CustomerId>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().map(|c| c.id()).collect())
    }

    async fn delete(&self, id: CustomerId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let before = tables.customers.len();
        tables.customers.retain(|c| c.id() != id);
        if tables.customers.len() == before {
            return Err(DomainError::new(
                ErrorCode::CustomerNotFound,
                format!("Customer not found: {}", id),
            ));
        }

        let removed: Vec<CallId> = tables
            .calls
            .iter()
            .filter(|c| c.customer_id() == id)
            .map(|c| c.id())
            .collect();
        tables.calls.retain(|c| c.customer_id() != id);
        tables.responses.retain(|r| !removed.contains(&r.call_id));
        for call_id in &removed {
            tables.transcripts.remove(call_id);
        }
        Ok(())
    }
}

#[async_trait]
impl CallRepository for InMemorySurveyStore {
    async fn save(&self, call: &Call) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        if !tables.customers.iter().any(|c| c.id() == call.customer_id()) {
            return Err(DomainError::new(
                ErrorCode::CustomerNotFound,
                format!("Customer not found: {}", call.customer_id()),
            ));
        }
        tables.calls.push(call.clone());
        Ok(())
    }

    async fn update(&self, call: &Call) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let slot = tables
            .calls
            .iter_mut()
            .find(|c| c.id() == call.id())
            .ok_or_else(|| {
                DomainError::new(ErrorCode::CallNotFound, format!("Call not found: {}", call.id()))
            })?;
        *slot = call.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: CallId) -> Result<Option<Call>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.calls.iter().find(|c| c.id() == id).cloned())
    }

    async fn find_by_conversation_id(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Call>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .calls
            .iter()
            .find(|c| c.conversation_id() == Some(conversation_id))
            .cloned())
    }

    async fn list(
        &self,
        status: Option<CallStatus>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Call>, DomainError> {
        let tables = self.tables.read().await;
        let matching = tables
            .calls
            .iter()
            .rev()
            .filter(|c| status.map_or(true, |s| c.status() == s))
            .cloned();
        Ok(page(matching, limit, offset))
    }

    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Call>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .calls
            .iter()
            .rev()
            .filter(|c| c.customer_id() == customer_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyStore {
    async fn save_transcript(
        &self,
        call_id: CallId,
        transcript: &Transcript,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.transcripts.insert(call_id, transcript.clone());
        Ok(())
    }

    async fn find_transcript(&self, call_id: CallId) -> Result<Option<Transcript>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.transcripts.get(&call_id).cloned())
    }

    async fn replace_responses(
        &self,
        call_id: CallId,
        responses: &[SurveyResponse],
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.responses.retain(|r| r.call_id != call_id);
        for response in responses {
            // Last write wins per question, as with ON CONFLICT in SQL.
            tables.responses.retain(|r| {
                !(r.call_id == call_id && r.question_number == response.question_number)
            });
            tables.responses.push(response.clone());
        }
        Ok(())
    }

    async fn responses_for_call(&self, call_id: CallId) -> Result<Vec<SurveyResponse>, DomainError> {
        let tables = self.tables.read().await;
        let mut responses: Vec<SurveyResponse> = tables
            .responses
            .iter()
            .filter(|r| r.call_id == call_id)
            .cloned()
            .collect();
        responses.sort_by_key(|r| r.question_number);
        Ok(responses)
    }
}

#[async_trait]
impl ReportReader for InMemorySurveyStore {
    async fn summary(&self) -> Result<SurveySummary, DomainError> {
        let tables = self.tables.read().await;

        let mut calls = StatusCounts::default();
        for call in &tables.calls {
            match call.status() {
                CallStatus::Pending => calls.pending += 1,
                CallStatus::InProgress => calls.in_progress += 1,
                CallStatus::Completed => calls.completed += 1,
                CallStatus::Failed => calls.failed += 1,
            }
        }

        let durations: Vec<u32> = tables.calls.iter().filter_map(|c| c.duration_secs()).collect();
        let average_duration_secs = if durations.is_empty() {
            None
        } else {
            Some(durations.iter().map(|d| *d as f64).sum::<f64>() / durations.len() as f64)
        };

        Ok(SurveySummary {
            total_customers: tables.customers.len() as u64,
            calls,
            total_responses: tables.responses.len() as u64,
            average_duration_secs,
        })
    }

    async fn question_stats(&self) -> Result<Vec<QuestionStats>, DomainError> {
        let tables = self.tables.read().await;
        let mut stats: Vec<QuestionStats> = QuestionNumber::all().map(QuestionStats::empty).collect();
        for response in &tables.responses {
            if let Some(entry) = stats
                .iter_mut()
                .find(|s| s.question_number == response.question_number)
            {
                entry.record(response.sentiment);
            }
        }
        Ok(stats)
    }

    async fn export_rows(&self) -> Result<Vec<ResponseExportRow>, DomainError> {
        let tables = self.tables.read().await;
        let mut rows = Vec::new();
        for call in &tables.calls {
            let Some(customer) = tables.customers.iter().find(|c| c.id() == call.customer_id())
            else {
                continue;
            };
            let mut responses: Vec<&SurveyResponse> = tables
                .responses
                .iter()
                .filter(|r| r.call_id == call.id())
                .collect();
            responses.sort_by_key(|r| r.question_number);
            rows.extend(responses.into_iter().map(|r| ResponseExportRow {
                call_id: call.id(),
                customer_name: customer.name().to_string(),
                phone_number: customer.phone_number().to_string(),
                question_number: r.question_number,
                question_text: r.question_text.clone(),
                answer: r.answer.clone(),
                sentiment: r.sentiment,
                source: r.source,
                created_at: r.created_at,
            }));
        }
        Ok(rows)
    }
}

#[async_trait]
impl HealthCheck for InMemorySurveyStore {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::{ResponseSource, Sentiment};

    fn customer(name: &str, phone: &str) -> Customer {
        Customer::new(name, PhoneNumber::parse(phone).unwrap(), None, None).unwrap()
    }

    fn q(n: u8) -> QuestionNumber {
        QuestionNumber::new(n).unwrap()
    }

    #[tokio::test]
    async fn duplicate_phone_is_rejected_with_detail() {
        let store = InMemorySurveyStore::new();
        CustomerRepository::save(&store, &customer("Ada", "+14155550100"))
            .await
            .unwrap();

        let err = CustomerRepository::save(&store, &customer("Grace", "+1 415 555 0100"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicatePhoneNumber);
        assert_eq!(err.details.get("phone_number").unwrap(), "+14155550100");
    }

    #[tokio::test]
    async fn call_for_unknown_customer_is_rejected() {
        let store = InMemorySurveyStore::new();
        let err = CallRepository::save(&store, &Call::new(CustomerId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerNotFound);
    }

    #[tokio::test]
    async fn calls_list_newest_first_with_status_filter() {
        let store = InMemorySurveyStore::new();
        let c = customer("Ada", "+14155550100");
        CustomerRepository::save(&store, &c).await.unwrap();

        let first = Call::new(c.id());
        let mut second = Call::new(c.id());
        second.mark_failed("busy", None).unwrap();
        CallRepository::save(&store, &first).await.unwrap();
        CallRepository::save(&store, &second).await.unwrap();

        let all = CallRepository::list(&store, None, 10, 0).await.unwrap();
        assert_eq!(all[0].id(), second.id());
        assert_eq!(all[1].id(), first.id());

        let failed = CallRepository::list(&store, Some(CallStatus::Failed), 10, 0)
            .await
            .unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].id(), second.id());
    }

    #[tokio::test]
    async fn replace_responses_drops_previous_answers() {
        let store = InMemorySurveyStore::new();
        let call_id = CallId::new();
        store
            .replace_responses(
                call_id,
                &[
                    SurveyResponse::new(call_id, q(1), "great", ResponseSource::Transcript),
                    SurveyResponse::new(call_id, q(2), "fine", ResponseSource::Transcript),
                ],
            )
            .await
            .unwrap();
        store
            .replace_responses(
                call_id,
                &[SurveyResponse::new(call_id, q(1), "nine", ResponseSource::DataCollection)],
            )
            .await
            .unwrap();

        let stored = store.responses_for_call(call_id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].answer, "nine");
    }

    #[tokio::test]
    async fn delete_customer_cascades() {
        let store = InMemorySurveyStore::new();
        let c = customer("Ada", "+14155550100");
        CustomerRepository::save(&store, &c).await.unwrap();
        let call = Call::new(c.id());
        CallRepository::save(&store, &call).await.unwrap();
        store
            .replace_responses(
                call.id(),
                &[SurveyResponse::new(call.id(), q(1), "good", ResponseSource::Transcript)],
            )
            .await
            .unwrap();

        CustomerRepository::delete(&store, c.id()).await.unwrap();

        assert_eq!(store.call_count().await, 0);
        assert!(store.responses_for_call(call.id()).await.unwrap().is_empty());
        let err = CustomerRepository::delete(&store, c.id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CustomerNotFound);
    }

    #[tokio::test]
    async fn reports_aggregate_calls_and_sentiment() {
        let store = InMemorySurveyStore::new();
        let c = customer("Ada", "+14155550100");
        CustomerRepository::save(&store, &c).await.unwrap();

        let mut done = Call::new(c.id());
        done.mark_placed(ConversationId::new("conv_1").unwrap(), None)
            .unwrap();
        done.mark_completed(Some(120), None).unwrap();
        CallRepository::save(&store, &done).await.unwrap();
        CallRepository::save(&store, &Call::new(c.id())).await.unwrap();

        store
            .replace_responses(
                done.id(),
                &[
                    SurveyResponse::new(done.id(), q(1), "great service", ResponseSource::Transcript),
                    SurveyResponse::new(done.id(), q(2), "rude staff", ResponseSource::Transcript),
                ],
            )
            .await
            .unwrap();

        let summary = store.summary().await.unwrap();
        assert_eq!(summary.total_customers, 1);
        assert_eq!(summary.calls.completed, 1);
        assert_eq!(summary.calls.pending, 1);
        assert_eq!(summary.completion_rate(), 0.5);
        assert_eq!(summary.average_duration_secs, Some(120.0));

        let stats = store.question_stats().await.unwrap();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].positive, 1);
        assert_eq!(stats[1].negative, 1);
        assert_eq!(stats[4].responses, 0);

        let rows = store.export_rows().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].customer_name, "Ada");
        assert_eq!(rows[1].sentiment, Sentiment::Negative);
    }
}
