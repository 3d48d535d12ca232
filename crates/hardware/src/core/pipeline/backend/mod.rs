//! Backend pipeline stages.
//!
//! The backend covers Dispatch -> Issue -> Complete -> Commit, all owned by
//! the out-of-order [`o3::Scheduler`].

pub mod o3;
