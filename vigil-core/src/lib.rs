//! Vigil Core
//!
//! Core types shared by the Vigil job poller crates.
//!
//! This crate contains:
//! - Domain types: jobs, handles, statuses and poll results
//! - DTOs: wire representations exchanged with a remote job API

pub mod domain;
pub mod dto;
