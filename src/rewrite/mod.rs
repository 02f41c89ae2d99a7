pub mod observer;
pub mod link;

pub use observer::*;
pub use link::*;
