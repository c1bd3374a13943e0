//! Provider fallback for contact enrichment.
//!
//! [`Waterfall::enrich_one`] tries providers in order until one finds an
//! email; [`Waterfall::enrich_many`] adds the batch fast path and a per-person
//! repair pass on top.

pub mod bulk;
pub mod credentials;
pub mod waterfall;

#[cfg(test)]
mod testing;

pub use bulk::BatchRejected;
pub use credentials::resolve;
pub use waterfall::{ProviderAttempt, SkipReason, SkippedProvider, Waterfall, WaterfallReport};
