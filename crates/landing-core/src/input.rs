//! Live input signals read by the view loop.
//!
//! Host callbacks (resize, scroll, pointer) never touch the scene directly.
//! They translate browser events into [`InputEvent`] values and apply them to
//! an [`InputState`], which the frame loop hands to the view update each
//! frame.

use crate::constants::MAX_PIXEL_RATIO;
use glam::Vec2;

/// Drawing surface size in CSS pixels plus the device pixel ratio in use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    /// Width and height are clamped to at least 1 so that the scroll mapping
    /// and the camera aspect never divide by zero.
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: clamp_pixel_ratio(pixel_ratio),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing store size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let w = (self.width as f32 * self.pixel_ratio).round() as u32;
        let h = (self.height as f32 * self.pixel_ratio).round() as u32;
        (w.max(1), h.max(1))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1, 1, 1.0)
    }
}

#[inline]
pub fn clamp_pixel_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// One raw host signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Resize {
        width: u32,
        height: u32,
        pixel_ratio: f32,
    },
    Scroll {
        offset_y: f32,
    },
    PointerMove {
        client_x: f32,
        client_y: f32,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub viewport: Viewport,
    /// Vertical page offset in CSS pixels. Not clamped.
    pub scroll_y: f32,
    /// Pointer position relative to the viewport centre, roughly in [-0.5, 0.5].
    pub cursor: Vec2,
}

impl InputState {
    pub fn new(viewport: Viewport, scroll_y: f32) -> Self {
        Self {
            viewport,
            scroll_y,
            cursor: Vec2::ZERO,
        }
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize {
                width,
                height,
                pixel_ratio,
            } => {
                self.viewport = Viewport::new(width, height, pixel_ratio);
            }
            InputEvent::Scroll { offset_y } => {
                self.scroll_y = offset_y;
            }
            InputEvent::PointerMove { client_x, client_y } => {
                self.cursor = normalize_cursor(client_x, client_y, &self.viewport);
            }
        }
    }
}

/// Map client pixel coordinates to a cursor offset from the viewport centre.
#[inline]
pub fn normalize_cursor(client_x: f32, client_y: f32, viewport: &Viewport) -> Vec2 {
    Vec2::new(
        client_x / viewport.width as f32 - 0.5,
        client_y / viewport.height as f32 - 0.5,
    )
}
