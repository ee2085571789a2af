//! Visitor, download and section-view counters plus the dashboard overlay

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::analytics::{
    Analytics, KeyValueStore, SectionBar, SECTION_VIEW_THRESHOLD, SESSION_VISITED_KEY,
};
use folio_core::resume::escape_html;
use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};

use crate::storage::LocalStore;
use crate::web::{add_class, element_by_id, js_error, listen, query_all, remove_class};

pub type SharedAnalytics = Rc<RefCell<Analytics<LocalStore>>>;

const DASHBOARD_ID: &str = "analytics-dashboard";
const TRIGGER_ID: &str = "admin-trigger";
const CLOSE_ID: &str = "close-dashboard";
const VISITORS_ID: &str = "total-visitors";
const DOWNLOADS_ID: &str = "total-downloads";
const CHART_ID: &str = "views-chart";

/// Count this visit and start tracking sections.
/// Returns `None` when storage is unavailable; the page works without it.
pub fn init() -> Result<Option<SharedAnalytics>, JsValue> {
    let store = match LocalStore::local() {
        Ok(store) => store,
        Err(err) => {
            log::warn!("analytics disabled: {}", err);
            return Ok(None);
        }
    };

    let mut analytics = Analytics::new(store);
    match count_visit(&mut analytics) {
        Ok(visitors) => log::info!("visitor count: {}", visitors),
        Err(err) => log::warn!("could not record visit: {}", err),
    }

    let analytics = Rc::new(RefCell::new(analytics));
    track_sections(&analytics)?;
    init_dashboard(&analytics)?;
    Ok(Some(analytics))
}

fn count_visit(analytics: &mut Analytics<LocalStore>) -> folio_core::Result<u64> {
    analytics.ensure_initialized()?;

    let mut session = LocalStore::session()?;
    let first_in_session = session.get(SESSION_VISITED_KEY)?.is_none();
    let visitors = analytics.record_visit(first_in_session)?;
    if first_in_session {
        session.set(SESSION_VISITED_KEY, "true")?;
    }
    Ok(visitors)
}

fn track_sections(analytics: &SharedAnalytics) -> Result<(), JsValue> {
    let analytics = analytics.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry = entry.unchecked_into::<IntersectionObserverEntry>();
            if !entry.is_intersecting() {
                continue;
            }
            let id = entry.target().id();
            if let Err(err) = analytics.borrow_mut().record_section_view(&id) {
                log::warn!("could not record view of {}: {}", id, err);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(SECTION_VIEW_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for section in query_all("section")? {
        observer.observe(&section);
    }
    Ok(())
}

fn init_dashboard(analytics: &SharedAnalytics) -> Result<(), JsValue> {
    let Some(dashboard) = element_by_id::<Element>(DASHBOARD_ID)? else {
        return Ok(());
    };

    if let Some(trigger) = element_by_id::<Element>(TRIGGER_ID)? {
        let analytics = analytics.clone();
        let dashboard = dashboard.clone();
        listen(&trigger, "click", move |_| {
            if let Err(err) = update_dashboard(&analytics) {
                log::warn!("dashboard refresh failed: {:?}", err);
            }
            add_class(&dashboard, "active");
        })?;
    }

    if let Some(close) = element_by_id::<Element>(CLOSE_ID)? {
        listen(&close, "click", move |_| remove_class(&dashboard, "active"))?;
    }
    Ok(())
}

fn update_dashboard(analytics: &SharedAnalytics) -> Result<(), JsValue> {
    let snapshot = analytics.borrow().dashboard().map_err(js_error)?;

    if let Some(visitors) = element_by_id::<HtmlElement>(VISITORS_ID)? {
        visitors.set_inner_text(&snapshot.visitors.to_string());
    }
    if let Some(downloads) = element_by_id::<HtmlElement>(DOWNLOADS_ID)? {
        downloads.set_inner_text(&snapshot.downloads.to_string());
    }
    if let Some(chart) = element_by_id::<Element>(CHART_ID)? {
        chart.set_inner_html(&chart_html(&snapshot.bars));
    }
    Ok(())
}

/// Markup for the section-views bar chart
pub fn chart_html(bars: &[SectionBar]) -> String {
    bars.iter()
        .map(|bar| {
            format!(
                concat!(
                    r#"<div class="bar-container">"#,
                    r#"<div class="bar-label"><span>{}</span><span>{}</span></div>"#,
                    r#"<div class="bar-bg"><div class="bar-fill" style="width: {}%"></div></div>"#,
                    "</div>"
                ),
                escape_html(&bar.label),
                bar.count,
                bar.percent
            )
        })
        .collect()
}
