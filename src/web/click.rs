//! Document click listener as an `ActivationObserver`
//!
//! The listener walks `event.composedPath()` so anchors rendered inside the
//! docs shadow root are found. Dropping `ClickSubscription` removes it.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlAnchorElement};

use super::window::{browser_window, js_error};
use crate::error::Result;
use crate::rewrite::{
    Activation, ActivationHandler, ActivationObserver, AnchorInfo, LinkEffects, Notifier, PathEntry,
};

pub struct DocumentClickObserver {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl DocumentClickObserver {
    pub fn new() -> Result<Self> {
        let window = browser_window()?;
        let document = window
            .document()
            .ok_or_else(|| crate::error::VersioningError::Browser("no document".into()))?;
        Ok(Self { window, document })
    }
}

pub struct ClickSubscription {
    document: web_sys::Document,
    listener: Closure<dyn FnMut(Event)>,
}

impl Drop for ClickSubscription {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("click", self.listener.as_ref().unchecked_ref());
    }
}

impl ActivationObserver for DocumentClickObserver {
    type Subscription = ClickSubscription;

    fn observe(&self, mut handler: ActivationHandler) -> Result<ClickSubscription> {
        let window = self.window.clone();
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let (activation, anchor) = composed_activation(&event);
            let mut effects = DomLinkEffects {
                window: &window,
                event: &event,
                anchor,
            };
            handler(&activation, &mut effects);
        });
        self.document
            .add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
            .map_err(|e| js_error("addEventListener(click)", e))?;
        Ok(ClickSubscription {
            document: self.document.clone(),
            listener,
        })
    }
}

/// Activation for `event` plus the element behind its nearest anchor
fn composed_activation(event: &Event) -> (Activation, Option<HtmlAnchorElement>) {
    let mut nearest = None;
    let path = event
        .composed_path()
        .iter()
        .map(|target| match target.dyn_ref::<HtmlAnchorElement>() {
            Some(element) => {
                let info = AnchorInfo {
                    href: element.href(),
                    classes: element
                        .class_name()
                        .split_whitespace()
                        .map(str::to_string)
                        .collect(),
                    title: element.title(),
                };
                if nearest.is_none() && !info.href.is_empty() {
                    nearest = Some(element.clone());
                }
                PathEntry::Anchor(info)
            }
            None => PathEntry::Other,
        })
        .collect();
    (Activation { path }, nearest)
}

struct DomLinkEffects<'a> {
    window: &'a web_sys::Window,
    event: &'a Event,
    anchor: Option<HtmlAnchorElement>,
}

impl LinkEffects for DomLinkEffects<'_> {
    fn prevent_default(&mut self) {
        self.event.prevent_default();
    }

    fn disable(&mut self, tooltip: &str) {
        let Some(anchor) = &self.anchor else {
            return;
        };
        let style = anchor.style();
        for (property, value) in [
            ("pointer-events", "none"),
            ("color", "grey"),
            ("cursor", "not-allowed"),
        ] {
            if let Err(e) = style.set_property(property, value) {
                log_warn!("[LinkRewriter] Could not set {}: {:?}", property, e);
            }
        }
        anchor.set_title(tooltip);
    }

    fn open_in_new_context(&mut self, url: &str) {
        if let Err(e) = self.window.open_with_url_and_target(url, "_blank") {
            log_error!("[LinkRewriter] Could not open {}: {:?}", url, e);
        }
    }
}

#[derive(Serialize)]
struct Alert<'a> {
    message: &'a str,
    severity: &'a str,
}

/// Forwards warnings to a JS callback (`alertApi.post`), else the console
pub struct JsNotifier {
    callback: Option<js_sys::Function>,
}

impl JsNotifier {
    pub fn new(callback: Option<js_sys::Function>) -> Self {
        Self { callback }
    }
}

impl Notifier for JsNotifier {
    fn warn(&self, message: &str) {
        let Some(callback) = &self.callback else {
            log_warn!("{}", message);
            return;
        };
        let alert = Alert {
            message,
            severity: "warning",
        };
        let delivered = serde_wasm_bindgen::to_value(&alert)
            .map_err(JsValue::from)
            .and_then(|value| callback.call1(&JsValue::NULL, &value));
        if let Err(e) = delivered {
            log_warn!("[LinkRewriter] {} (notification failed: {:?})", message, e);
        }
    }
}
