mod logging;
pub use logging::*;

mod retry;
pub use retry::*;

mod transaction;
pub use transaction::*;
