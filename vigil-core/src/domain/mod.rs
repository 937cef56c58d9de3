//! Core domain types
//!
//! These types describe a unit of asynchronous remote work as the poller sees
//! it. They carry no transport concerns; wire shapes live in [`crate::dto`].

pub mod job;
