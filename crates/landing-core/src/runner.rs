//! Frame loop ownership and scheduling.
//!
//! `FrameLoop` owns every piece of mutable per-frame state: the input
//! signals, the scene, the view update and the renderer. Host callbacks go
//! through [`FrameLoop::handle_event`] and [`FrameLoop::apply_load_event`];
//! the display cadence drives [`FrameLoop::tick`] through a
//! [`FrameScheduler`], which is requestAnimationFrame in the browser and a
//! hand-stepped queue in tests.

use crate::clock::Clock;
use crate::input::{InputEvent, InputState, Viewport};
use crate::model::{progress_percent, LoadEvent};
use crate::scene::Scene;
use crate::view::{ViewConfig, ViewLoop};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Drawing capability handed to the frame loop.
pub trait SceneRenderer {
    fn resize(&mut self, viewport: &Viewport);
    fn render(&mut self, scene: &Scene) -> anyhow::Result<RenderStatus>;
}

/// Outcome of a render call that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    Presented,
    /// No frame was available this time (surface lost, outdated or timed
    /// out); the next tick tries again.
    Skipped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Shared stop flag; once set, the next tick ends the loop.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Rc<Cell<bool>>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

pub struct FrameLoop<C, R> {
    clock: C,
    renderer: R,
    view: ViewLoop,
    scene: Scene,
    input: InputState,
    stop: StopHandle,
    frames: u64,
    skipped: u64,
}

impl<C: Clock, R: SceneRenderer> FrameLoop<C, R> {
    pub fn new(
        clock: C,
        mut renderer: R,
        scene: Scene,
        input: InputState,
        config: ViewConfig,
    ) -> Self {
        renderer.resize(&input.viewport);
        Self {
            clock,
            renderer,
            view: ViewLoop::new(config),
            scene,
            input,
            stop: StopHandle::default(),
            frames: 0,
            skipped: 0,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        self.input.apply(event);
        if let InputEvent::Resize { .. } = event {
            let viewport = self.input.viewport;
            self.scene.rig.camera.set_aspect(viewport.aspect());
            self.renderer.resize(&viewport);
            log::debug!(
                "[resize] {}x{} @{}x",
                viewport.width,
                viewport.height,
                viewport.pixel_ratio
            );
        }
    }

    /// Progress and failures are logged only; a failed load leaves the scene
    /// without a model.
    pub fn apply_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Progress { loaded, total } => {
                log::info!("{:.0}% loaded - model", progress_percent(loaded, total));
            }
            LoadEvent::Loaded(asset) => {
                let triangles = asset.triangle_count();
                match self.scene.attach_model(asset) {
                    Ok(()) => log::info!("[model] attached, {} triangles", triangles),
                    Err(e) => log::warn!("[model] {}", e),
                }
            }
            LoadEvent::Failed(reason) => {
                log::error!("error loading the model: {}", reason);
            }
        }
    }

    /// One frame: update camera and meshes from the current input, then draw.
    pub fn tick(&mut self) -> LoopControl {
        if self.stop.is_stopped() {
            return LoopControl::Stop;
        }
        let elapsed = self.clock.elapsed_secs();
        let update = self.view.update(elapsed, &self.input, &mut self.scene);
        log::trace!(
            "[frame {}] dt={:.4} cam_y={:.3} target=({:.3},{:.3})",
            self.frames,
            update.delta,
            update.camera_offset,
            update.parallax_target.x,
            update.parallax_target.y
        );
        match self.renderer.render(&self.scene) {
            Ok(RenderStatus::Presented) => {}
            Ok(RenderStatus::Skipped) => {
                self.skipped += 1;
                log::debug!("[frame {}] skipped", self.frames);
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
        self.frames += 1;
        LoopControl::Continue
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames the renderer had to skip.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

/// Host primitive that runs a callback once on the next display refresh.
pub trait FrameScheduler {
    fn request_frame(&self, frame: Rc<dyn Fn()>);
}

/// Schedule the first frame. Each frame ticks once and asks for the next
/// one; a stopped loop releases its callback instead.
pub fn start_loop<C, R, S>(frame_loop: Rc<RefCell<FrameLoop<C, R>>>, scheduler: Rc<S>)
where
    C: Clock + 'static,
    R: SceneRenderer + 'static,
    S: FrameScheduler + ?Sized + 'static,
{
    let slot: Rc<RefCell<Option<Rc<dyn Fn()>>>> = Rc::new(RefCell::new(None));
    let slot_tick = slot.clone();
    let scheduler_tick = scheduler.clone();
    let frame: Rc<dyn Fn()> = Rc::new(move || {
        let control = frame_loop.borrow_mut().tick();
        match control {
            LoopControl::Continue => {
                let next = slot_tick.borrow().clone();
                if let Some(next) = next {
                    scheduler_tick.request_frame(next);
                }
            }
            LoopControl::Stop => {
                slot_tick.borrow_mut().take();
                log::info!("[loop] stopped");
            }
        }
    });
    *slot.borrow_mut() = Some(frame.clone());
    scheduler.request_frame(frame);
}

/// Queue-backed scheduler stepped by hand.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<Rc<dyn Fn()>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run the next scheduled frame; false when nothing was scheduled.
    pub fn step(&self) -> bool {
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(frame) => {
                frame();
                true
            }
            None => false,
        }
    }

    /// Step up to `frames` times and return how many frames actually ran.
    pub fn run(&self, frames: usize) -> usize {
        (0..frames).take_while(|_| self.step()).count()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, frame: Rc<dyn Fn()>) {
        self.queue.borrow_mut().push_back(frame);
    }
}
