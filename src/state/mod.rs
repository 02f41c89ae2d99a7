pub mod store;
pub mod gate;
pub mod reconcile;
pub mod navigator;
pub mod session;

pub use store::*;
pub use gate::*;
pub use reconcile::*;
pub use navigator::*;
pub use session::*;

#[cfg(test)]
mod tests;
