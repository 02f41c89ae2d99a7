//! Browser seams, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use techdocs_versioning::*;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn session_storage_round_trips_selection() {
    let store = VersionStore::new(SessionStorage::new().unwrap(), "techdocs".to_string());
    store.set("uid-web-1", "v2.0").unwrap();
    assert_eq!(store.get("uid-web-1"), Some("v2.0".to_string()));
    assert_eq!(store.get("uid-web-unknown"), None);

    store.set("uid-web-1", "latest").unwrap();
    assert_eq!(store.get("uid-web-1"), Some("latest".to_string()));
}

#[wasm_bindgen_test]
fn browser_location_matches_window() {
    let location = BrowserLocation::new().unwrap().current().unwrap();
    let window = web_sys::window().unwrap();
    assert_eq!(location.href, window.location().href().unwrap());
    assert!(location.href.starts_with(&location.origin));
    assert!(location.pathname.starts_with('/'));
}

#[wasm_bindgen_test]
async fn timeout_delay_resolves() {
    TimeoutDelay::new().unwrap().sleep(5).await;
}

#[wasm_bindgen_test]
fn config_from_js_object() {
    let value = js_sys::JSON::parse(r#"{"backendBaseUrl":"https://backstage.example.com/"}"#).unwrap();
    let config = VersioningConfig::from_js(value).unwrap();
    assert_eq!(config.backend_base_url, "https://backstage.example.com/");
    assert_eq!(config.storage_prefix, DEFAULT_STORAGE_PREFIX);

    let config = VersioningConfig::from_js(JsValue::UNDEFINED).unwrap();
    assert_eq!(config, VersioningConfig::default());
}

#[wasm_bindgen_test]
fn notifier_without_callback_logs() {
    JsNotifier::new(None).warn(RELEASE_EDIT_MESSAGE);
}

#[wasm_bindgen_test]
fn notifier_forwards_alert_object() {
    let sink = js_sys::Array::new();
    let callback = js_sys::Function::new_with_args("alert", "this.push(alert)");
    let bound = callback.bind(&sink);
    JsNotifier::new(Some(bound)).warn(RELEASE_EDIT_MESSAGE);

    assert_eq!(sink.length(), 1);
    let alert = sink.get(0);
    let message = js_sys::Reflect::get(&alert, &JsValue::from_str("message")).unwrap();
    let severity = js_sys::Reflect::get(&alert, &JsValue::from_str("severity")).unwrap();
    assert_eq!(message.as_string().as_deref(), Some(RELEASE_EDIT_MESSAGE));
    assert_eq!(severity.as_string().as_deref(), Some("warning"));
}

#[wasm_bindgen_test]
fn click_subscription_attaches_and_detaches() {
    let observer = DocumentClickObserver::new().unwrap();
    let subscription = observer.observe(Box::new(|_, _| {})).unwrap();
    drop(subscription);
}
