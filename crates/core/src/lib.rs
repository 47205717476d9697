//! `deskerp-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every dashboard
//! book (no infrastructure concerns, no UI concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod filter;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::{Entity, locate, lookup};
pub use error::{DomainError, DomainResult};
pub use filter::{CategoryFilter, RecordFilter, Searchable, matches};
pub use id::RecordId;
