//! TaskFlow notification side channel.
//!
//! Write operations in the store layer surface short, human-readable
//! status messages -- the equivalent of the toast strip in the UI. This
//! crate provides:
//!
//! - [`Notice`] — one user-facing status message.
//! - [`NoticeBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`, so any number of presentation-side
//!   consumers can observe notices independently.

pub mod bus;

pub use bus::{Notice, NoticeBus, NoticeLevel};
