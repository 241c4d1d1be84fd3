//! Generic record-service client SDK.
//!
//! The TaskFlow store keeps its data in a remote record service that
//! exposes fetch/create/update/delete over named collections with field
//! projections and filter predicates. This crate provides the typed
//! wire shapes for that contract, the [`RecordGateway`] trait the
//! repository layer is written against, and two backends:
//!
//! - [`RecordClient`] — the live HTTP backend, built on [`reqwest`].
//! - [`MemoryGateway`] — an in-memory backend with the same observable
//!   behavior, used by tests and local development.

pub mod client;
pub mod config;
pub mod gateway;
pub mod memory;
pub mod records;

pub use client::RecordClient;
pub use config::GatewayConfig;
pub use gateway::{GatewayError, RecordGateway};
pub use memory::MemoryGateway;
pub use records::{
    ConditionGroup, FetchResponse, FieldSpec, GroupCondition, GroupOperator, MutationResponse,
    Operator, OrderBy, QueryParams, RecordResponse, RecordResult, SortType, WhereCondition,
    WhereGroup, ID_FIELD,
};
