use anyhow::anyhow;
use landing_core::{AssetPaths, Viewport};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub fn find_canvas(
    document: &web::Document,
    selector: &str,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .query_selector(selector)
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("missing {}", selector))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("{} is not a canvas: {:?}", selector, e))
}

/// Current window size in CSS pixels and the device pixel ratio.
pub fn current_viewport(window: &web::Window) -> Viewport {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    Viewport::new(
        width as u32,
        height as u32,
        window.device_pixel_ratio() as f32,
    )
}

#[inline]
pub fn scroll_offset(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

/// Backing store follows the viewport in physical pixels; the CSS box stays
/// at the logical size.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w_px, h_px) = viewport.physical_size();
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
}

/// Asset locations, honouring `data-model-url` / `data-gradient-url` on the
/// canvas.
pub fn asset_paths(canvas: &web::HtmlCanvasElement) -> AssetPaths {
    AssetPaths::default().with_overrides(
        canvas.get_attribute("data-model-url"),
        canvas.get_attribute("data-gradient-url"),
    )
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow!("fetch {}: {:?}", url, e))?;
    if !resp.ok() {
        return Err(anyhow!("{} {}", resp.status(), url));
    }
    let buffer = JsFuture::from(resp.array_buffer().map_err(|e| anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow!("read {}: {:?}", url, e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
