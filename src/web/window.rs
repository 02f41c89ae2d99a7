//! `window.location` and `setTimeout` behind the session seams

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::backend::Delay;
use crate::error::{Result, VersioningError};
use crate::resolve::Location;
use crate::state::LocationHost;

pub(crate) fn browser_window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| VersioningError::Browser("no global `window`".into()))
}

pub(crate) fn js_error(context: &str, value: JsValue) -> VersioningError {
    VersioningError::Browser(format!("{}: {:?}", context, value))
}

pub struct BrowserLocation {
    window: web_sys::Window,
}

impl BrowserLocation {
    pub fn new() -> Result<Self> {
        Ok(Self {
            window: browser_window()?,
        })
    }
}

impl LocationHost for BrowserLocation {
    fn current(&self) -> Result<Location> {
        let location = self.window.location();
        let read = |value: std::result::Result<String, JsValue>| {
            value.map_err(|e| js_error("reading window.location", e))
        };
        Ok(Location {
            href: read(location.href())?,
            origin: read(location.origin())?,
            protocol: read(location.protocol())?,
            hostname: read(location.hostname())?,
            port: read(location.port())?,
            pathname: read(location.pathname())?,
        })
    }

    fn replace(&self, href: &str) -> Result<()> {
        self.window
            .location()
            .replace(href)
            .map_err(|e| js_error("location.replace", e))
    }
}

/// Waits with `setTimeout`
pub struct TimeoutDelay {
    window: web_sys::Window,
}

impl TimeoutDelay {
    pub fn new() -> Result<Self> {
        Ok(Self {
            window: browser_window()?,
        })
    }
}

impl Delay for TimeoutDelay {
    async fn sleep(&self, ms: u32) {
        let window = self.window.clone();
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
            if window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
                .is_err()
            {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
