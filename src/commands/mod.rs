//! Command handlers for topic-check
//!
//! - `check`: run the topic checklist for each topic config
//! - `list`: describe every available check

pub mod check;
pub mod list;
