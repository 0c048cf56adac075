use crate::render::GpuState;
use landing_core::{FrameLoop, FrameScheduler, InstantClock, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedLoop = Rc<RefCell<FrameLoop<InstantClock, GpuState>>>;

/// Runs each frame callback on the next `requestAnimationFrame`.
pub struct RafScheduler;

impl FrameScheduler for RafScheduler {
    fn request_frame(&self, frame: Rc<dyn Fn()>) {
        let callback = Closure::once_into_js(move || frame());
        match web::window() {
            Some(w) => {
                if let Err(e) = w.request_animation_frame(callback.unchecked_ref()) {
                    log::error!("requestAnimationFrame failed: {:?}", e);
                }
            }
            None => log::error!("no window; frame dropped"),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, scene: &Scene) -> Option<GpuState> {
    match GpuState::new(canvas, scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}
