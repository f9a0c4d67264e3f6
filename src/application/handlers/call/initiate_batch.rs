//! InitiateBatchHandler - Command handler for calling many customers.
//!
//! Customers are dialled in fixed-size chunks. Calls within a chunk run
//! concurrently; chunks are separated by a fixed pause. A failed call is
//! reported for its customer and never stops the batch.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;

use super::initiate_call::InitiateCallHandler;
use crate::config::BatchConfig;
use crate::domain::call::CallError;
use crate::domain::foundation::{CallId, CallStatus, CustomerId};
use crate::ports::{CallRepository, CustomerRepository, VoiceProvider};

/// Command to call a set of customers.
#[derive(Debug, Clone, Default)]
pub struct InitiateBatchCommand {
    /// Customers to call; `None` calls every customer.
    pub customer_ids: Option<Vec<CustomerId>>,
}

/// Per-customer result of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchCallOutcome {
    pub customer_id: CustomerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_id: Option<CallId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub requested: usize,
    pub placed: usize,
    pub failed: usize,
    pub results: Vec<BatchCallOutcome>,
}

/// Handler for batch calls.
pub struct InitiateBatchHandler {
    customers: Arc<dyn CustomerRepository>,
    single: InitiateCallHandler,
    chunk_size: usize,
    pause: Duration,
}

impl InitiateBatchHandler {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        calls: Arc<dyn CallRepository>,
        voice: Arc<dyn VoiceProvider>,
        batch: &BatchConfig,
    ) -> Self {
        Self {
            single: InitiateCallHandler::new(customers.clone(), calls, voice),
            customers,
            chunk_size: batch.chunk_size.max(1),
            pause: batch.pause(),
        }
    }

    /// Calls every requested customer.
    ///
    /// # Errors
    ///
    /// Only fails if the customer list itself cannot be read.
    pub async fn handle(&self, cmd: InitiateBatchCommand) -> Result<BatchResult, CallError> {
        let ids = match cmd.customer_ids {
            Some(ids) => dedupe(ids),
            None => self.customers.list_ids().await?,
        };

        let chunks = plan_chunks(&ids, self.chunk_size);
        let mut result = BatchResult {
            requested: ids.len(),
            ..Default::default()
        };

        tracing::info!(
            requested = result.requested,
            chunks = chunks.len(),
            "Starting batch call"
        );

        for (index, chunk) in chunks.iter().enumerate() {
            if index > 0 && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }

            let attempts = join_all(chunk.iter().map(|&id| async move {
                (id, self.single.attempt(id).await)
            }))
            .await;

            for (customer_id, attempt) in attempts {
                let outcome = match attempt {
                    Ok(call) => {
                        result.placed += 1;
                        BatchCallOutcome {
                            customer_id,
                            call_id: Some(call.id()),
                            status: Some(call.status()),
                            error: None,
                        }
                    }
                    Err(failed) => {
                        result.failed += 1;
                        BatchCallOutcome {
                            customer_id,
                            call_id: failed.call.as_ref().map(|c| c.id()),
                            status: failed.call.as_ref().map(|c| c.status()),
                            error: Some(failed.error.to_string()),
                        }
                    }
                };
                result.results.push(outcome);
            }
        }

        tracing::info!(
            placed = result.placed,
            failed = result.failed,
            "Batch call finished"
        );
        Ok(result)
    }
}

/// Drops repeated ids, keeping first occurrences in order.
fn dedupe(ids: Vec<CustomerId>) -> Vec<CustomerId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Splits `items` into consecutive groups of at most `chunk_size`.
fn plan_chunks<T: Clone>(items: &[T], chunk_size: usize) -> Vec<Vec<T>> {
    items
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::adapters::voice::MockVoiceProvider;
    use crate::application::handlers::call::initiate_call::tests::customer;
    use crate::domain::customer::Customer;
    use crate::ports::CustomerRepository;
    use proptest::prelude::*;
    use tokio::time::Instant;

    async fn seed(store: &InMemorySurveyStore, count: usize) -> Vec<Customer> {
        let mut customers = Vec::new();
        for i in 0..count {
            let c = customer(&format!("Customer {}", i), &format!("+1415555{:04}", i));
            CustomerRepository::save(store, &c).await.unwrap();
            customers.push(c);
        }
        customers
    }

    fn handler(
        store: &Arc<InMemorySurveyStore>,
        voice: MockVoiceProvider,
        chunk_size: usize,
        pause_ms: u64,
    ) -> InitiateBatchHandler {
        InitiateBatchHandler::new(
            store.clone(),
            store.clone(),
            Arc::new(voice),
            &BatchConfig {
                chunk_size,
                pause_ms,
            },
        )
    }

    #[tokio::test]
    async fn calls_every_customer_when_no_ids_given() {
        let store = Arc::new(InMemorySurveyStore::new());
        seed(&store, 7).await;
        let voice = MockVoiceProvider::new();

        let result = handler(&store, voice.clone(), 3, 0)
            .handle(InitiateBatchCommand::default())
            .await
            .unwrap();

        assert_eq!(result.requested, 7);
        assert_eq!(result.placed, 7);
        assert_eq!(result.failed, 0);
        assert_eq!(voice.placed_calls().len(), 7);
        assert_eq!(store.call_count().await, 7);
    }

    #[tokio::test]
    async fn failure_is_reported_per_customer_without_aborting() {
        let store = Arc::new(InMemorySurveyStore::new());
        let customers = seed(&store, 3).await;
        let voice = MockVoiceProvider::new();
        voice.fail_number(customers[1].phone_number().as_str());
        let missing = CustomerId::new();

        let ids = vec![customers[0].id(), customers[1].id(), missing, customers[2].id()];
        let result = handler(&store, voice, 2, 0)
            .handle(InitiateBatchCommand {
                customer_ids: Some(ids),
            })
            .await
            .unwrap();

        assert_eq!(result.requested, 4);
        assert_eq!(result.placed, 2);
        assert_eq!(result.failed, 2);

        let refused = &result.results[1];
        assert_eq!(refused.customer_id, customers[1].id());
        assert_eq!(refused.status, Some(CallStatus::Failed));
        assert!(refused.call_id.is_some());

        let unknown = &result.results[2];
        assert_eq!(unknown.customer_id, missing);
        assert!(unknown.call_id.is_none());
        assert!(unknown.error.as_deref().unwrap().contains("Customer not found"));
    }

    #[tokio::test]
    async fn repeated_ids_are_called_once() {
        let store = Arc::new(InMemorySurveyStore::new());
        let customers = seed(&store, 2).await;
        let voice = MockVoiceProvider::new();

        let ids = vec![customers[0].id(), customers[1].id(), customers[0].id()];
        let result = handler(&store, voice.clone(), 5, 0)
            .handle(InitiateBatchCommand {
                customer_ids: Some(ids),
            })
            .await
            .unwrap();

        assert_eq!(result.requested, 2);
        assert_eq!(voice.placed_calls().len(), 2);
    }

    #[tokio::test]
    async fn calls_within_a_chunk_run_concurrently() {
        let store = Arc::new(InMemorySurveyStore::new());
        seed(&store, 6).await;
        let voice = MockVoiceProvider::new().with_latency(Duration::from_millis(20));

        handler(&store, voice.clone(), 3, 0)
            .handle(InitiateBatchCommand::default())
            .await
            .unwrap();

        assert_eq!(voice.max_in_flight(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn pauses_between_chunks_only() {
        let store = Arc::new(InMemorySurveyStore::new());
        seed(&store, 3).await;

        let started = Instant::now();
        handler(&store, MockVoiceProvider::new(), 1, 200)
            .handle(InitiateBatchCommand::default())
            .await
            .unwrap();
        let elapsed = started.elapsed();

        // Three chunks, two pauses; the clock only moves through the sleeps.
        assert!(elapsed >= Duration::from_millis(400), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(600), "{:?}", elapsed);
    }

    #[tokio::test]
    async fn empty_batch_does_nothing() {
        let store = Arc::new(InMemorySurveyStore::new());
        let result = handler(&store, MockVoiceProvider::new(), 5, 1000)
            .handle(InitiateBatchCommand {
                customer_ids: Some(vec![]),
            })
            .await
            .unwrap();

        assert_eq!(result, BatchResult::default());
    }

    proptest! {
        #[test]
        fn chunks_preserve_order_and_respect_size(
            items in proptest::collection::vec(any::<u16>(), 0..60),
            size in 1usize..12,
        ) {
            let chunks = plan_chunks(&items, size);

            prop_assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= size));
            prop_assert_eq!(chunks.concat(), items.clone());
            prop_assert_eq!(chunks.len(), items.len().div_ceil(size));
        }
    }
}
