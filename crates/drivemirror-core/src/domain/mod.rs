//! Domain types for one-way bucket-to-drive reconciliation

pub mod addressing;
pub mod errors;
pub mod snapshot;
pub mod stats;

pub use addressing::{identifier_for, split_identifier, AddressingMode, PATH_SEPARATOR};
pub use errors::DomainError;
pub use snapshot::{RemoteEntry, SourceObject};
pub use stats::SyncStats;
