//! # Domain Module
//!
//! The transaction pipeline itself:
//!
//! * Proposal creation and fan-out to endorsers
//! * Endorsement validation
//! * Transaction assembly and ordering
//! * Commit status watch
//! * The handler chain and the channel client driving it

mod proposal;
pub use proposal::*;

mod endorsement;
pub use endorsement::*;

mod commit;
pub use commit::*;

mod commit_watch;
pub use commit_watch::*;

pub mod handler;
pub use handler::*;

mod channel_client;
pub use channel_client::*;
