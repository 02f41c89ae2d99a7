//! `fetch` + JS identity callback behind the backend seams

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::window::{browser_window, js_error};
use crate::backend::{CredentialProvider, HttpClient, HttpResponse};
use crate::error::{Result, VersioningError};

pub struct FetchClient {
    window: web_sys::Window,
}

impl FetchClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            window: browser_window()?,
        })
    }
}

impl HttpClient for FetchClient {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        let transport = |e: JsValue| VersioningError::Transport {
            url: url.to_string(),
            message: format!("{:?}", e),
        };

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);
        let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
        for (name, value) in headers {
            request.headers().set(name, value).map_err(transport)?;
        }

        let value = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let response: Response = value.dyn_into().map_err(transport)?;

        let body = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .map_err(transport)?
                .as_string()
                .unwrap_or_default(),
            Err(_) => String::new(),
        };

        Ok(HttpResponse {
            status: response.status(),
            status_text: response.status_text(),
            body,
        })
    }
}

/// Calls a JS function returning the bearer token (or a promise of it)
pub struct JsCredentials {
    get_token: js_sys::Function,
}

impl JsCredentials {
    pub fn new(get_token: js_sys::Function) -> Self {
        Self { get_token }
    }
}

impl CredentialProvider for JsCredentials {
    async fn bearer_token(&self) -> Result<String> {
        let value = self
            .get_token
            .call0(&JsValue::NULL)
            .map_err(|e| js_error("credentials callback", e))?;
        let token = JsFuture::from(js_sys::Promise::resolve(&value))
            .await
            .map_err(|e| VersioningError::Credentials(format!("{:?}", e)))?;
        token
            .as_string()
            .ok_or_else(|| VersioningError::Credentials("token is not a string".into()))
    }
}
