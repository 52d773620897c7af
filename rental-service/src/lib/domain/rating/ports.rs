use crate::domain::offer::models::OfferId;
use crate::domain::rating::errors::AggregationError;

/// Sink for offers whose derived fields could not be refreshed.
///
/// Implementations must not fail. The offer stays stale until the next
/// comment on it triggers another recomputation.
pub trait StaleAggregateReporter: Send + Sync + 'static {
    fn report_stale(&self, offer_id: &OfferId, error: &AggregationError);
}
