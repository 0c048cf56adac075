#![cfg(target_arch = "wasm32")]
use anyhow::anyhow;
use landing_core::{start_loop, FrameLoop, InputState, InstantClock, Scene, ViewConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod dom;
mod events;
mod frame;
mod render;

const CANVAS_SELECTOR: &str = "canvas.webgl";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("landing-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;
    let canvas = dom::find_canvas(&document, CANVAS_SELECTOR)?;
    let paths = dom::asset_paths(&canvas);

    let viewport = dom::current_viewport(&window);
    dom::sync_canvas_backing_size(&canvas, &viewport);
    let input = InputState::new(viewport, dom::scroll_offset(&window));
    let scene = Scene::assemble(&viewport, &mut StdRng::from_entropy());

    let gpu = frame::init_gpu(&canvas, &scene)
        .await
        .ok_or_else(|| anyhow!("renderer unavailable"))?;
    let frame_loop: frame::SharedLoop = Rc::new(RefCell::new(FrameLoop::new(
        InstantClock::start(),
        gpu,
        scene,
        input,
        ViewConfig::default(),
    )));

    events::wire_input_handlers(&window, &frame_loop);
    assets::spawn_gradient_load(frame_loop.clone(), paths.gradient_url);
    assets::spawn_model_load(frame_loop.clone(), paths.model_url);

    start_loop(frame_loop, Rc::new(frame::RafScheduler));
    Ok(())
}
