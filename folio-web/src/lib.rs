//! Folio Web - binds the portfolio page behaviour to the browser
//!
//! Both background animations draw through Canvas 2D surfaces driven by
//! `requestAnimationFrame`; the rest of the page glue (cursor, menu, scroll
//! reveal, chat, analytics, resume export) is wired to the DOM on start.

use folio_core::chat::normalize_input;
use folio_core::FolioConfig;
use wasm_bindgen::prelude::*;

pub mod analytics;
pub mod animation;
pub mod canvas;
pub mod chat;
pub mod dom;
pub mod resume;
pub mod reveal;
pub mod storage;
pub mod web;

pub use canvas::{WebCanvas, WebScene};
pub use storage::LocalStore;

/// Optional global holding a JSON string of animation overrides
const CONFIG_GLOBAL: &str = "folioConfig";

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let config = load_config();

    guard("cursor", dom::init_cursor());
    guard("menu", dom::init_menu());
    guard("3D background", animation::start_backdrop(&config.backdrop));
    guard("node graph", animation::start_network(&config.network));
    guard("scroll reveal", reveal::init_scroll_reveal());
    guard("hero", reveal::init_hero());

    let analytics = analytics::init().unwrap_or_else(|err| {
        log::warn!("analytics failed to start: {:?}", err);
        None
    });
    guard("resume", resume::init(analytics));
    guard("chat", chat::init());

    Ok(())
}

/// Entry point for the inline suggestion chips
#[wasm_bindgen(js_name = sendSuggestion)]
pub fn send_suggestion(text: &str) -> Result<(), JsValue> {
    match normalize_input(text) {
        Some(text) => chat::handle_user_message(text),
        None => Ok(()),
    }
}

fn load_config() -> FolioConfig {
    let raw = web::window()
        .and_then(|window| js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)))
        .ok()
        .and_then(|value| value.as_string());

    match raw {
        Some(json) => FolioConfig::from_json(&json).unwrap_or_else(|err| {
            log::warn!("ignoring {}: {}", CONFIG_GLOBAL, err);
            FolioConfig::default()
        }),
        None => FolioConfig::default(),
    }
}

/// Log a feature that failed to start and carry on with the others
fn guard(feature: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        log::error!("{} failed to start: {:?}", feature, err);
    }
}
