use crate::dom;
use crate::frame::SharedLoop;
use landing_core::model::{self, BufferSource};
use landing_core::{GradientMap, LoadEvent, ModelAsset, GRADIENT_STEPS};
use wasm_bindgen_futures::spawn_local;

/// Fetch and decode the model in the background, reporting to the frame
/// loop between frames.
pub fn spawn_model_load(frame_loop: SharedLoop, url: String) {
    spawn_local(async move {
        let emit = |event: LoadEvent| frame_loop.borrow_mut().apply_load_event(event);
        match fetch_model(&url, &emit).await {
            Ok(asset) => emit(LoadEvent::Loaded(asset)),
            Err(e) => emit(LoadEvent::Failed(format!("{}: {:#}", url, e))),
        }
    });
}

async fn fetch_model(url: &str, emit: &impl Fn(LoadEvent)) -> anyhow::Result<ModelAsset> {
    let bytes = dom::fetch_bytes(url).await?;
    let gltf = model::parse_document(&bytes)?;
    let sources = model::buffer_sources(&gltf)?;

    // the document itself plus every buffer still to fetch
    let total = 1 + sources
        .iter()
        .filter(|s| matches!(s, BufferSource::External(_)))
        .count();
    let mut loaded = 1;
    emit(LoadEvent::Progress { loaded, total });

    let mut buffers = Vec::with_capacity(sources.len());
    for source in sources {
        match source {
            BufferSource::Embedded(data) => buffers.push(data),
            BufferSource::External(uri) => {
                buffers.push(dom::fetch_bytes(&model::resolve_uri(url, &uri)).await?);
                loaded += 1;
                emit(LoadEvent::Progress { loaded, total });
            }
        }
    }
    Ok(model::build_model(&gltf, &buffers)?)
}

/// Swap the procedural ramp for the gradient asset once it arrives; on
/// failure the ramp stays.
pub fn spawn_gradient_load(frame_loop: SharedLoop, url: String) {
    spawn_local(async move {
        let decoded = match dom::fetch_bytes(&url).await {
            Ok(bytes) => GradientMap::decode(&bytes).map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        match decoded {
            Ok(map) => {
                log::info!("[gradient] {} texels from {}", map.width(), url);
                frame_loop.borrow_mut().renderer_mut().set_gradient(&map);
            }
            Err(e) => log::warn!(
                "[gradient] {} unavailable, keeping {}-step ramp: {:#}",
                url,
                GRADIENT_STEPS,
                e
            ),
        }
    });
}
