mod codes;
pub use codes::*;

mod rpc;
pub use rpc::*;

mod status;
pub use status::*;
