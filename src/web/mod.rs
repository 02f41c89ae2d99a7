//! Browser implementations of the session and link-rewriter seams

pub mod window;
pub mod session_storage;
pub mod fetch;
pub mod click;
pub mod bindings;

pub use window::{BrowserLocation, TimeoutDelay};
pub use session_storage::SessionStorage;
pub use fetch::{FetchClient, JsCredentials};
pub use click::{ClickSubscription, DocumentClickObserver, JsNotifier};
pub use bindings::TechDocsVersioning;
