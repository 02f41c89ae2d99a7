//! WASM bindings for the version selector add-on

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use super::click::{ClickSubscription, DocumentClickObserver, JsNotifier};
use super::fetch::{FetchClient, JsCredentials};
use super::session_storage::SessionStorage;
use super::window::{BrowserLocation, TimeoutDelay};
use crate::backend::MetadataClient;
use crate::config::VersioningConfig;
use crate::rewrite::{attach_link_rewriter, LinkRewriter};
use crate::state::VersioningSession;

type BrowserMetadata = MetadataClient<FetchClient, JsCredentials, TimeoutDelay>;
type BrowserSession = VersioningSession<BrowserLocation, SessionStorage, BrowserMetadata>;

/// Version selector for one mounted TechDocs reader
#[wasm_bindgen]
pub struct TechDocsVersioning {
    session: Rc<BrowserSession>,
    rewriter: Rc<LinkRewriter>,
    notifier: Rc<JsNotifier>,
    subscription: Option<ClickSubscription>,
}

#[wasm_bindgen]
impl TechDocsVersioning {
    /// `config` may be `undefined` for defaults. `get_token` returns the
    /// bearer token or a promise of it; `notify` receives
    /// `{ message, severity }` alerts.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        get_token: js_sys::Function,
        notify: Option<js_sys::Function>,
    ) -> Result<TechDocsVersioning, JsValue> {
        let config = VersioningConfig::from_js(config)?;
        let metadata = MetadataClient::new(
            &config,
            FetchClient::new()?,
            JsCredentials::new(get_token),
            TimeoutDelay::new()?,
        );
        let session = VersioningSession::new(
            &config,
            BrowserLocation::new()?,
            SessionStorage::new()?,
            metadata,
        );
        log_info!("[TechDocsVersioning] Created (backend: {})", config.backend_base_url);

        Ok(TechDocsVersioning {
            session: Rc::new(session),
            rewriter: Rc::new(LinkRewriter::new(&config)),
            notifier: Rc::new(JsNotifier::new(notify)),
            subscription: None,
        })
    }

    /// Process the current location; resolves to the selector model
    #[wasm_bindgen(js_name = onNavigation)]
    pub fn on_navigation(&self) -> js_sys::Promise {
        let session = self.session.clone();
        future_to_promise(async move {
            let outcome = session.on_navigation().await?;
            log_debug!("[TechDocsVersioning] {:?}", outcome);
            serde_wasm_bindgen::to_value(&session.selector_model()).map_err(JsValue::from)
        })
    }

    /// Switch to a published version; returns the target href
    #[wasm_bindgen(js_name = selectVersion)]
    pub fn select_version(&self, version: &str) -> Result<String, JsValue> {
        Ok(self.session.select_version(version)?)
    }

    #[wasm_bindgen(js_name = selectorModel)]
    pub fn selector_model(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.selector_model()).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = activeVersion)]
    pub fn active_version(&self) -> String {
        self.session.active_version().get()
    }

    /// Start intercepting edit-link clicks; replaces an earlier listener
    #[wasm_bindgen(js_name = attachLinkRewriter)]
    pub fn attach_link_rewriter(&mut self) -> Result<(), JsValue> {
        self.subscription = None;
        let subscription = attach_link_rewriter(
            &DocumentClickObserver::new()?,
            self.rewriter.clone(),
            self.session.active_version(),
            self.notifier.clone(),
        )?;
        self.subscription = Some(subscription);
        Ok(())
    }

    /// Remove the click listener
    pub fn detach(&mut self) {
        if self.subscription.take().is_some() {
            log_debug!("[TechDocsVersioning] Link rewriter detached");
        }
    }
}
