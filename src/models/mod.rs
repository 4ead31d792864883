mod error;
pub use error::*;

mod request;
pub use request::*;

mod response;
pub use response::*;

mod options;
pub use options::*;

mod proposal;
pub use proposal::*;

mod transaction;
pub use transaction::*;
