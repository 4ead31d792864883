mod hash;
pub use hash::*;

mod time;
pub use time::*;
