//! Check engine module.
//!
//! Provides check orchestration and the ordered result report.

pub mod orchestrator;
pub mod result;
