pub mod entity;
pub mod location;
pub mod version;
pub mod paths;
pub mod context;

pub use entity::*;
pub use location::*;
pub use version::*;
pub use paths::*;
pub use context::*;
