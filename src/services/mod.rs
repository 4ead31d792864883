//! # Services Module
//!
//! Collaborators the transaction pipeline talks to: peers, orderers, the
//! channel, discovery and selection, the signing identity and the commit
//! event source. Also hosts the retry policy used at the client boundary.

mod peer;
pub use peer::*;

mod orderer;
pub use orderer::*;

mod channel;
pub use channel::*;

mod discovery;
pub use discovery::*;

mod identity;
pub use identity::*;

mod events;
pub use events::*;

mod retry;
pub use retry::*;
