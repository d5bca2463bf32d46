//! Pure computation over in-memory trade sets: no I/O, no shared state.

pub mod describe;
pub mod lifecycle;
pub mod reconcile;
pub mod rooting;
pub mod summary;

pub use describe::{describe, describe_exotic, describe_vanilla, Description};
pub use lifecycle::{expire_worthless, unwind};
pub use reconcile::{
    partition_by_key, reconcile, DuplicateKey, DuplicateKeyWarning, KeyedPartition, MatchedPair,
    Reconciliation, RecordSource,
};
pub use rooting::{rooting_direction, rooting_for, Rooting};
pub use summary::{summarize, BlotterSummary};
