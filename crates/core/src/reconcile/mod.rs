//! Queue reconciliation engine
//!
//! Leaves first: [`codec`] and [`drift`] are pure; [`prober`] and
//! [`executor`] talk to the queue service through [`ports`];
//! [`annotator`] writes identifiers onto the record; [`service`] sequences
//! everything per event.

pub mod annotator;
pub mod codec;
pub mod drift;
pub mod executor;
pub mod ports;
pub mod prober;
pub mod service;

pub use annotator::IdentityAnnotator;
pub use codec::{build_attributes, encode_redrive_policy, strip_whitespace};
pub use drift::{has_changed, json_equivalent};
pub use executor::{CooldownPolicy, CreateOutcome, MutationExecutor};
pub use prober::RemoteProber;
pub use service::{QueueReconciler, ReconcileOutcome};
