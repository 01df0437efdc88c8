//! Data-fetching hooks
//!
//! `use_*` functions read through the query cache. Every other function is a
//! mutation: it sends the write and, once the server accepts it, invalidates
//! a fixed set of keys so the views depending on them re-fetch.

pub mod admin;
pub mod calendar;
pub mod events;
pub mod keys;
pub mod rooms;
pub mod timetable;
pub mod users;

pub use crate::query::{QueryResult, QueryStatus};
