//! Small helpers over `web-sys` shared by the page bindings

use std::fmt::Display;
use std::time::Duration;

use folio_core::Viewport;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlCanvasElement, HtmlElement, NodeList, Window};

/// Get the window object
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window` exists"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("should have a document on window"))
}

/// Current inner size of the window in CSS pixels
pub fn viewport() -> Result<Viewport, JsValue> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width as f32, height as f32))
}

/// Get a canvas element by ID, or `None` when the page has no such canvas
pub fn get_canvas(id: &str) -> Result<Option<HtmlCanvasElement>, JsValue> {
    element_by_id(id)
}

pub fn element_by_id<T: JsCast>(id: &str) -> Result<Option<T>, JsValue> {
    match document()?.get_element_by_id(id) {
        Some(element) => Ok(Some(element.dyn_into::<T>()?)),
        None => Ok(None),
    }
}

pub fn query_one<T: JsCast>(selector: &str) -> Result<Option<T>, JsValue> {
    match document()?.query_selector(selector)? {
        Some(element) => Ok(Some(element.dyn_into::<T>()?)),
        None => Ok(None),
    }
}

pub fn query_all(selector: &str) -> Result<Vec<Element>, JsValue> {
    Ok(elements(document()?.query_selector_all(selector)?))
}

/// Elements of a node list, skipping anything that is not an element
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Rendered text of an element
pub fn inner_text(element: &Element) -> String {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html.inner_text(),
        None => element.text_content().unwrap_or_default(),
    }
}

pub fn matches_media(query: &str) -> Result<bool, JsValue> {
    Ok(window()?
        .match_media(query)?
        .map(|list| list.matches())
        .unwrap_or(false))
}

/// Attach a listener that lives as long as the page
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `callback` once after `delay`
pub fn set_timeout(callback: impl FnOnce() + 'static, delay: Duration) -> Result<(), JsValue> {
    let callback = Closure::once_into_js(callback);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay.as_millis() as i32,
    )?;
    Ok(())
}

pub fn add_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().add_1(class) {
        log::warn!("could not add class {}: {:?}", class, err);
    }
}

pub fn remove_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().remove_1(class) {
        log::warn!("could not remove class {}: {:?}", class, err);
    }
}

pub fn toggle_class(element: &Element, class: &str) {
    if let Err(err) = element.class_list().toggle(class) {
        log::warn!("could not toggle class {}: {:?}", class, err);
    }
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        log::warn!("could not set {}: {:?}", property, err);
    }
}

/// Convert a Rust error into the value thrown across the wasm boundary
pub fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
