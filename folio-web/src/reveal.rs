//! Scroll reveal and the loader / hero entrance

use folio_core::reveal::{
    hero_schedule, hidden_style, should_reveal, shown_style, HERO_SELECTORS, LOADER_MIN_DURATION,
    REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD,
};
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::web::{
    add_class, document, element_by_id, listen, matches_media, query_all, query_one, set_style,
    set_timeout, viewport, window,
};

const REVEAL_SELECTOR: &str = "[data-aos]";
const REVEALED_CLASS: &str = "aos-animate";
const LOADER_ID: &str = "loader";
const LOADER_DONE_CLASS: &str = "loaded";
const HERO_HIDDEN_CLASS: &str = "hero-animate";
const HERO_VISIBLE_CLASS: &str = "hero-visible";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Hide every `data-aos` element and reveal each one the first time it
/// scrolls into view
pub fn init_scroll_reveal() -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(|entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry = entry.unchecked_into::<IntersectionObserverEntry>();
            if entry.is_intersecting() {
                let target = entry.target();
                add_class(&target, REVEALED_CLASS);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for element in query_all(REVEAL_SELECTOR)? {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            for (property, value) in hidden_style() {
                set_style(html, property, &value);
            }
        }
        observer.observe(&element);
    }

    listen(document()?.as_ref(), "scroll", |_| {
        if let Err(err) = reveal_on_scroll() {
            log::warn!("scroll reveal failed: {:?}", err);
        }
    })
}

fn reveal_on_scroll() -> Result<(), JsValue> {
    for element in query_all(&format!(".{}", REVEALED_CLASS))? {
        show(&element);
    }

    // Catch anything already on screen that the observer has not reported
    let height = viewport()?.height as f64;
    for element in query_all(REVEAL_SELECTOR)? {
        if should_reveal(element.get_bounding_client_rect().top(), height) {
            show(&element);
        }
    }
    Ok(())
}

fn show(element: &Element) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        for (property, value) in shown_style() {
            set_style(html, property, value);
        }
    }
}

/// Hide the hero elements now and bring them in once the page has loaded
pub fn init_hero() -> Result<(), JsValue> {
    let heroes = HERO_SELECTORS
        .iter()
        .map(|selector| query_one::<HtmlElement>(selector))
        .collect::<Result<Vec<_>, _>>()?;
    for hero in heroes.iter().flatten() {
        add_class(hero, HERO_HIDDEN_CLASS);
    }

    if document()?.ready_state() == "complete" {
        return schedule_entrance(heroes);
    }

    let mut pending = Some(heroes);
    listen(window()?.as_ref(), "load", move |_| {
        if let Some(heroes) = pending.take() {
            if let Err(err) = schedule_entrance(heroes) {
                log::warn!("hero entrance failed: {:?}", err);
            }
        }
    })
}

fn schedule_entrance(heroes: Vec<Option<HtmlElement>>) -> Result<(), JsValue> {
    let reduced_motion = matches_media(REDUCED_MOTION_QUERY)?;

    set_timeout(
        move || {
            match element_by_id::<Element>(LOADER_ID) {
                Ok(Some(loader)) => add_class(&loader, LOADER_DONE_CLASS),
                Ok(None) => {}
                Err(err) => log::warn!("loader lookup failed: {:?}", err),
            }

            for step in hero_schedule(heroes.len(), reduced_motion) {
                let Some(hero) = heroes[step.index].clone() else {
                    continue;
                };
                if !step.animate {
                    add_class(&hero, HERO_VISIBLE_CLASS);
                    set_style(&hero, "transition", "none");
                    continue;
                }
                let shown = set_timeout(
                    move || add_class(&hero, HERO_VISIBLE_CLASS),
                    step.delay,
                );
                if let Err(err) = shown {
                    log::warn!("could not schedule hero element {}: {:?}", step.index, err);
                }
            }
        },
        LOADER_MIN_DURATION,
    )
}
