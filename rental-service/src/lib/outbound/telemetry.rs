use crate::domain::offer::models::OfferId;
use crate::domain::rating::errors::AggregationError;
use crate::domain::rating::ports::StaleAggregateReporter;

/// Reports stale offer aggregates as error events on a dedicated target,
/// so they can be filtered and alerted on separately from request logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStaleAggregateReporter;

impl StaleAggregateReporter for TracingStaleAggregateReporter {
    fn report_stale(&self, offer_id: &OfferId, error: &AggregationError) {
        tracing::error!(
            target: "rental_service::aggregation",
            offer_id = %offer_id,
            error = %error,
            "Offer rating and comment count left stale"
        );
    }
}
