use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::object_store::ObjectRemover;
use crate::adapters::redelivery::RedeliveryScheduler;
use crate::runtime::contract::{validate_event, StorageEvent};
use crate::runtime::disposition::{BatchOutcome, Disposition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerConfig {
    pub target_bucket: String,
}

/// One queue record as delivered by the SQS event source, with its body kept
/// unparsed so that a malformed body fails only its own record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRecord {
    pub message_id: String,
    pub receipt_handle: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SqsBatchResponse {
    #[serde(rename = "batchItemFailures")]
    pub batch_item_failures: Vec<BatchItemFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchItemFailure {
    #[serde(rename = "itemIdentifier")]
    pub item_identifier: String,
}

pub fn is_sqs_event(event: &Value) -> bool {
    event
        .get("Records")
        .and_then(Value::as_array)
        .map(|records| {
            !records.is_empty()
                && records.iter().all(|record| {
                    record
                        .get("eventSource")
                        .and_then(Value::as_str)
                        .map(|source| source == "aws:sqs")
                        .unwrap_or(false)
                })
        })
        .unwrap_or(false)
}

/// Decodes the SQS event envelope. Envelope-level malformation fails the
/// whole invocation; record bodies stay unparsed here.
pub fn decode_queue_records(event: &Value) -> Result<Vec<QueueRecord>, String> {
    let records = event
        .get("Records")
        .and_then(Value::as_array)
        .ok_or_else(|| "SQS event must include a Records array".to_string())?;

    let mut decoded = Vec::with_capacity(records.len());
    for record in records {
        let message_id = record
            .get("messageId")
            .and_then(Value::as_str)
            .ok_or_else(|| "SQS record must include a messageId".to_string())?;
        let receipt_handle = record
            .get("receiptHandle")
            .and_then(Value::as_str)
            .ok_or_else(|| "SQS record must include a receiptHandle".to_string())?;
        let body = record
            .get("body")
            .and_then(Value::as_str)
            .ok_or_else(|| "SQS record body must be a string".to_string())?;

        decoded.push(QueueRecord {
            message_id: message_id.to_string(),
            receipt_handle: receipt_handle.to_string(),
            body: body.to_string(),
        });
    }

    Ok(decoded)
}

/// Processes one batch: exactly one delete call and exactly one disposition
/// per record. A record's failure never aborts or skips its siblings.
pub fn handle_record_batch(
    records: &[QueueRecord],
    config: &ConsumerConfig,
    remover: &impl ObjectRemover,
    scheduler: &impl RedeliveryScheduler,
) -> BatchOutcome {
    log_consumer_info(
        "batch_started",
        json!({
            "target_bucket": config.target_bucket.clone(),
            "record_count": records.len(),
        }),
    );

    let mut outcome = BatchOutcome::new();
    for record in records {
        let disposition = process_record(record, config, remover);
        if let Disposition::Retry { delay_seconds } = disposition {
            if let Err(error) = scheduler.schedule_redelivery(&record.receipt_handle, delay_seconds)
            {
                // The record still retries: the queue's own visibility
                // timeout governs redelivery when the delay cannot be set.
                log_consumer_error(
                    "redelivery_schedule_failed",
                    json!({
                        "message_id": record.message_id.clone(),
                        "error": error,
                    }),
                );
            }
        }
        outcome.record(record.message_id.clone(), disposition);
    }

    log_consumer_info(
        "batch_completed",
        json!({
            "record_count": outcome.len(),
            "acknowledged": outcome.acknowledged_count(),
            "retried": outcome.retry_count(),
        }),
    );

    outcome
}

/// Renders the batch outcome as an SQS partial-batch response. Records absent
/// from the failure list are removed from the queue by the runtime.
pub fn batch_response(outcome: &BatchOutcome) -> SqsBatchResponse {
    SqsBatchResponse {
        batch_item_failures: outcome
            .retried_message_ids()
            .into_iter()
            .map(|message_id| BatchItemFailure {
                item_identifier: message_id.to_string(),
            })
            .collect(),
    }
}

fn process_record(
    record: &QueueRecord,
    config: &ConsumerConfig,
    remover: &impl ObjectRemover,
) -> Disposition {
    let event: StorageEvent = match serde_json::from_str(&record.body) {
        Ok(value) => value,
        Err(error) => {
            log_consumer_error(
                "event_rejected",
                json!({
                    "message_id": record.message_id.clone(),
                    "error": format!("invalid event body: {error}"),
                }),
            );
            return Disposition::retry();
        }
    };

    if let Err(error) = validate_event(&event) {
        log_consumer_error(
            "event_rejected",
            json!({
                "message_id": record.message_id.clone(),
                "error": error.message(),
            }),
        );
        return Disposition::retry();
    }

    let object_key = event.object.key.as_str();
    match remover.delete_object(object_key) {
        Ok(receipt) => {
            log_consumer_info(
                "object_deleted",
                json!({
                    "msg": format!(
                        "{}/{object_key} deleted successfully",
                        config.target_bucket
                    ),
                    "target_bucket": config.target_bucket.clone(),
                    "object_key": object_key,
                    "source_bucket": event.bucket.clone(),
                    "action": event.action.clone(),
                    "event_time": event.event_time.clone(),
                    "request_id": receipt.request_id.clone(),
                    "http_status_code": receipt.http_status_code,
                }),
            );
            Disposition::Acknowledge
        }
        Err(error) => {
            log_consumer_error(
                "delete_failed",
                json!({
                    "message_id": record.message_id.clone(),
                    "object_key": object_key,
                    "error": error,
                }),
            );
            Disposition::retry()
        }
    }
}

fn log_consumer_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "consumer_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_consumer_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "consumer_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
