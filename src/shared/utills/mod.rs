pub mod locks;
pub mod retry;

pub use locks::*;
pub use retry::*;
