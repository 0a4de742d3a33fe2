//! Core engine: ranking, the per-tick cycle, and the scheduler that
//! drives it.

pub mod poller;
pub mod ranker;
pub mod scheduler;
