mod key;
mod table;

pub use key::*;
pub use table::*;
