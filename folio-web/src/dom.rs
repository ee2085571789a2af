//! Custom cursor and mobile navigation

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, MouseEvent};

use crate::web::{
    element_by_id, listen, matches_media, query_all, query_one, remove_class, set_style,
    toggle_class, window,
};

const FINE_POINTER_QUERY: &str = "(pointer: fine)";
const OUTLINE_TRANSITION: &str =
    "left 500ms ease-out, top 500ms ease-out, transform 200ms, background-color 200ms";
const HOVER_TARGETS: &str = "a, button, .magnetic";
const OUTLINE_HOVER_TRANSFORM: &str = "translate(-50%, -50%) scale(1.5)";
const OUTLINE_HOVER_BACKGROUND: &str = "rgba(255, 255, 255, 0.1)";
const OUTLINE_REST_TRANSFORM: &str = "translate(-50%, -50%) scale(1)";

/// Dot and trailing outline that replace the system cursor on mouse-driven
/// devices. Touch devices keep the native cursor.
pub fn init_cursor() -> Result<(), JsValue> {
    if !matches_media(FINE_POINTER_QUERY)? {
        return Ok(());
    }
    let dot = query_one::<HtmlElement>("[data-cursor-dot]")?;
    let outline = query_one::<HtmlElement>("[data-cursor-outline]")?;
    let (Some(dot), Some(outline)) = (dot, outline) else {
        return Ok(());
    };

    set_style(&outline, "transition", OUTLINE_TRANSITION);

    let follower = outline.clone();
    listen(window()?.as_ref(), "mousemove", move |event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let left = format!("{}px", event.client_x());
        let top = format!("{}px", event.client_y());
        set_style(&dot, "left", &left);
        set_style(&dot, "top", &top);
        set_style(&follower, "left", &left);
        set_style(&follower, "top", &top);
    })?;

    for target in query_all(HOVER_TARGETS)? {
        let grow = outline.clone();
        listen(&target, "mouseenter", move |_| {
            set_style(&grow, "transform", OUTLINE_HOVER_TRANSFORM);
            set_style(&grow, "background-color", OUTLINE_HOVER_BACKGROUND);
        })?;

        let shrink = outline.clone();
        listen(&target, "mouseleave", move |_| {
            set_style(&shrink, "transform", OUTLINE_REST_TRANSFORM);
            set_style(&shrink, "background-color", "transparent");
        })?;
    }
    Ok(())
}

/// Hamburger toggle for `.nav-menu`; following any nav link closes it
pub fn init_menu() -> Result<(), JsValue> {
    let toggle = element_by_id::<Element>("mobile-menu")?;
    let menu = query_one::<Element>(".nav-menu")?;
    let (Some(toggle), Some(menu)) = (toggle, menu) else {
        return Ok(());
    };

    {
        let button = toggle.clone();
        let menu = menu.clone();
        listen(&toggle, "click", move |_| {
            toggle_class(&menu, "active");
            toggle_class(&button, "active");
        })?;
    }

    for link in query_all(".nav-link")? {
        let button = toggle.clone();
        let menu = menu.clone();
        listen(&link, "click", move |_| {
            remove_class(&menu, "active");
            remove_class(&button, "active");
        })?;
    }
    Ok(())
}
