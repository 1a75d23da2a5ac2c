use serde::Serialize;

use crate::contract::RETRY_DELAY_SECONDS;

/// Final decision for one queue message: remove it permanently, or schedule
/// redelivery after a delay.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "disposition")]
pub enum Disposition {
    Acknowledge,
    Retry { delay_seconds: u32 },
}

impl Disposition {
    /// The standard retry disposition with the fixed redelivery delay.
    pub fn retry() -> Self {
        Self::Retry {
            delay_seconds: RETRY_DELAY_SECONDS,
        }
    }

    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Retry { .. })
    }
}

/// Ordered ledger of per-message dispositions for one batch.
///
/// Every message id appended here received exactly one disposition; a message
/// absent from the ledger was never disposed, which callers treat as a
/// processing bug rather than a recoverable state.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    dispositions: Vec<(String, Disposition)>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, message_id: impl Into<String>, disposition: Disposition) {
        self.dispositions.push((message_id.into(), disposition));
    }

    pub fn len(&self) -> usize {
        self.dispositions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispositions.is_empty()
    }

    pub fn dispositions(&self) -> &[(String, Disposition)] {
        &self.dispositions
    }

    pub fn acknowledged_count(&self) -> usize {
        self.dispositions
            .iter()
            .filter(|(_, disposition)| !disposition.is_retry())
            .count()
    }

    pub fn retry_count(&self) -> usize {
        self.dispositions
            .iter()
            .filter(|(_, disposition)| disposition.is_retry())
            .count()
    }

    pub fn retried_message_ids(&self) -> Vec<&str> {
        self.dispositions
            .iter()
            .filter(|(_, disposition)| disposition.is_retry())
            .map(|(message_id, _)| message_id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_uses_fixed_delay() {
        assert_eq!(Disposition::retry(), Disposition::Retry { delay_seconds: 5 });
    }

    #[test]
    fn counts_partition_the_batch() {
        let mut outcome = BatchOutcome::new();
        outcome.record("m-1", Disposition::Acknowledge);
        outcome.record("m-2", Disposition::retry());
        outcome.record("m-3", Disposition::Acknowledge);

        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.acknowledged_count(), 2);
        assert_eq!(outcome.retry_count(), 1);
        assert_eq!(
            outcome.acknowledged_count() + outcome.retry_count(),
            outcome.len()
        );
    }

    #[test]
    fn retried_ids_preserve_batch_order() {
        let mut outcome = BatchOutcome::new();
        outcome.record("m-1", Disposition::retry());
        outcome.record("m-2", Disposition::Acknowledge);
        outcome.record("m-3", Disposition::retry());

        assert_eq!(outcome.retried_message_ids(), vec!["m-1", "m-3"]);
    }
}
