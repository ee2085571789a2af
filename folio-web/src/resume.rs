//! Resume export: scrape the page, fill the print template, hand it to `html2pdf`

use folio_core::resume::{Achievement, PdfOptions, ProjectEntry, ResumeDocument, SkillCategory};
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::analytics::SharedAnalytics;
use crate::web::{
    element_by_id, elements, inner_text, js_error, listen, query_all, set_style, window,
};

const BUTTON_ID: &str = "download-resume";
const PRINT_ID: &str = "resume-print-content";

/// Wire the download button; each click also bumps the download counter
pub fn init(analytics: Option<SharedAnalytics>) -> Result<(), JsValue> {
    let Some(button) = element_by_id::<Element>(BUTTON_ID)? else {
        return Ok(());
    };

    listen(&button, "click", move |_| {
        if let Err(err) = generate() {
            log::error!("resume export failed: {:?}", err);
        }
        if let Some(analytics) = &analytics {
            match analytics.borrow_mut().record_download() {
                Ok(downloads) => log::info!("download count: {}", downloads),
                Err(err) => log::warn!("could not record download: {}", err),
            }
        }
    })
}

/// Read the resume content back out of the rendered page
pub fn scrape() -> Result<ResumeDocument, JsValue> {
    let paragraphs: Vec<String> = query_all(".about-content p")?
        .iter()
        .map(inner_text)
        .collect();

    let skills = query_all(".skill-category")?
        .iter()
        .map(|category| -> Result<SkillCategory, JsValue> {
            Ok(SkillCategory {
                category: child_text(category, "h3")?,
                tags: texts(category, ".skill-tag")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let projects = query_all(".project-card")?
        .iter()
        .map(|card| -> Result<ProjectEntry, JsValue> {
            Ok(ProjectEntry {
                title: child_text(card, ".project-title")?,
                tech: texts(card, ".tech-tag")?,
                description: child_text(card, ".project-desc")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let achievements = query_all(".achievement-card")?
        .iter()
        .map(|card| -> Result<Achievement, JsValue> {
            Ok(Achievement {
                title: child_text(card, ".achievement-info h3")?,
                description: child_text(card, ".achievement-info p")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResumeDocument {
        summary: ResumeDocument::summary_from(&paragraphs),
        skills,
        projects,
        achievements,
    })
}

fn child_text(scope: &Element, selector: &str) -> Result<String, JsValue> {
    Ok(scope
        .query_selector(selector)?
        .map(|element| inner_text(&element))
        .unwrap_or_default())
}

fn texts(scope: &Element, selector: &str) -> Result<Vec<String>, JsValue> {
    Ok(elements(scope.query_selector_all(selector)?)
        .iter()
        .map(inner_text)
        .collect())
}

fn generate() -> Result<(), JsValue> {
    let Some(print) = element_by_id::<HtmlElement>(PRINT_ID)? else {
        return Ok(());
    };

    let resume = scrape()?;
    if let Some(summary) = element_by_id::<HtmlElement>("print-summary")? {
        summary.set_inner_text(&resume.summary);
    }
    fill("print-skills", &resume.skills_html())?;
    fill("print-projects", &resume.projects_html())?;
    fill("print-achievements", &resume.achievements_html())?;

    // Visible only while the exporter renders it
    set_style(&print, "display", "block");

    let options = serde_json::to_string(&PdfOptions::default()).map_err(js_error)?;
    let options = js_sys::JSON::parse(&options)?;
    let saved = export_pdf(&print, &options)?;

    let hide = Closure::once(move |_: JsValue| set_style(&print, "display", "none"));
    let _ = saved.then(&hide);
    hide.forget();
    Ok(())
}

fn fill(id: &str, html: &str) -> Result<(), JsValue> {
    if let Some(container) = element_by_id::<Element>(id)? {
        container.set_inner_html(html);
    }
    Ok(())
}

/// `html2pdf().from(element).set(options).save()`
fn export_pdf(element: &HtmlElement, options: &JsValue) -> Result<Promise, JsValue> {
    let html2pdf = Reflect::get(window()?.as_ref(), &JsValue::from_str("html2pdf"))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str("html2pdf is not loaded"))?;

    let worker = html2pdf.call0(&JsValue::NULL)?;
    let worker = call_method(&worker, "from", element)?;
    let worker = call_method(&worker, "set", options)?;
    let saved = Reflect::get(&worker, &JsValue::from_str("save"))?
        .dyn_into::<Function>()?
        .call0(&worker)?;

    // The exporter returns a thenable worker rather than a real Promise
    Ok(Promise::resolve(&saved))
}

fn call_method(target: &JsValue, name: &str, arg: &JsValue) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<Function>()?
        .call1(target, arg)
}
