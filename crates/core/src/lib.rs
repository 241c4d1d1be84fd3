//! TaskFlow domain core.
//!
//! This crate holds everything that is pure and backend-independent:
//! the domain types ([`task::Task`], [`category::Category`]), the error
//! taxonomy ([`error::CoreError`]), input validation, the category color
//! palette, and the task derivation pipeline ([`derive::visible_tasks`])
//! that turns a task snapshot plus UI filter state into the ordered list
//! the presentation layer renders.
//!
//! Nothing in here performs I/O; the gateway and repository layers live
//! in their own crates and depend on this one.

pub mod category;
pub mod derive;
pub mod error;
pub mod filter;
pub mod palette;
pub mod task;
pub mod types;
pub mod validate;
