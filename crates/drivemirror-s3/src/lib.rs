//! Drivemirror S3 - Source store adapter
//!
//! Implements the [`ISourceStore`](drivemirror_core::ports::ISourceStore)
//! port on top of [`opendal`], targeting AWS S3 and S3-compatible services
//! (MinIO, Wasabi, ...) via a configurable endpoint.
//!
//! ## Modules
//!
//! - [`store`] - The `S3SourceStore` adapter and its listing filters

pub mod store;

pub use store::S3SourceStore;
