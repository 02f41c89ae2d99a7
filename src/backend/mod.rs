pub mod http;
pub mod retry;
pub mod metadata;
pub mod build_strategy;

pub use http::*;
pub use retry::*;
pub use metadata::*;
pub use build_strategy::*;
