//! `requestAnimationFrame` drivers for the backdrop and node graph

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Animation, BackdropConfig, BackdropScene, NetworkConfig, NodeGraphCanvas};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use crate::canvas::{WebCanvas, WebScene};
use crate::web::{get_canvas, listen, viewport, window};

pub const BACKDROP_CANVAS_ID: &str = "bg-canvas";
pub const NETWORK_CANVAS_ID: &str = "neural-canvas";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Drive `animation` once per display refresh until the page goes away
pub fn start_loop<A: Animation + 'static>(animation: Rc<RefCell<A>>) -> Result<(), JsValue> {
    // `f` holds the frame closure so it can re-request itself
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        animation.borrow_mut().frame();
        if let Err(err) = request_frame(&f) {
            log::error!("requestAnimationFrame failed: {:?}", err);
        }
    }) as Box<dyn FnMut()>));

    request_frame(&g)
}

fn request_frame(callback: &FrameCallback) -> Result<(), JsValue> {
    if let Some(closure) = callback.borrow().as_ref() {
        window()?.request_animation_frame(closure.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Start the 3D wireframe backdrop on `#bg-canvas`.
/// Does nothing without the canvas or on phone-sized viewports.
pub fn start_backdrop(config: &BackdropConfig) -> Result<(), JsValue> {
    let backend = match get_canvas(BACKDROP_CANVAS_ID)? {
        Some(canvas) => Some(WebScene::new(canvas)?),
        None => None,
    };

    let mut rng = StdRng::from_entropy();
    let Some(scene) = BackdropScene::init(backend, viewport()?, config.clone(), &mut rng) else {
        return Ok(());
    };
    let scene = Rc::new(RefCell::new(scene));

    let pointer = scene.clone();
    listen(window()?.as_ref(), "mousemove", move |event| {
        if let Some(event) = event.dyn_ref::<MouseEvent>() {
            pointer
                .borrow_mut()
                .on_pointer_move(event.client_x() as f32, event.client_y() as f32);
        }
    })?;

    let resized = scene.clone();
    listen(window()?.as_ref(), "resize", move |_| match viewport() {
        Ok(viewport) => resized.borrow_mut().on_resize(viewport),
        Err(err) => log::warn!("could not read viewport: {:?}", err),
    })?;

    start_loop(scene)
}

/// Start the node graph on `#neural-canvas`
pub fn start_network(config: &NetworkConfig) -> Result<(), JsValue> {
    let surface = match get_canvas(NETWORK_CANVAS_ID)? {
        Some(canvas) => Some(WebCanvas::new(canvas)?),
        None => None,
    };

    let Some(graph) = NodeGraphCanvas::init(
        surface,
        viewport()?,
        config.clone(),
        StdRng::from_entropy(),
    ) else {
        return Ok(());
    };
    let graph = Rc::new(RefCell::new(graph));

    let resized = graph.clone();
    listen(window()?.as_ref(), "resize", move |_| match viewport() {
        Ok(viewport) => resized.borrow_mut().on_resize(viewport),
        Err(err) => log::warn!("could not read viewport: {:?}", err),
    })?;

    start_loop(graph)
}
