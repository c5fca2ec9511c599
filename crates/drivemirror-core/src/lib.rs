//! Drivemirror Core - Domain logic and business rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain types** - `SourceObject`, `RemoteEntry`, `SyncStats`, addressing modes
//! - **Port definitions** - Traits for adapters: `ISourceStore`, `IDestinationStore`
//! - **Configuration** - Typed YAML configuration with validation and a builder
//!
//! # Architecture
//!
//! This crate follows the hexagonal (ports & adapters) architecture pattern.
//! The domain module contains pure business logic with no external dependencies.
//! Ports define trait interfaces that adapter crates implement.
//! The reconciliation engine in `drivemirror-sync` orchestrates domain types
//! through the port interfaces.

pub mod config;
pub mod domain;
pub mod ports;
