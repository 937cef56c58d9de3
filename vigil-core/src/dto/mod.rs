//! Data Transfer Objects
//!
//! Request and response bodies exchanged with a remote job API.

pub mod job;
