use crate::dom;
use crate::frame::SharedLoop;
use landing_core::InputEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Forward window resize, page scroll and pointer motion into the frame
/// loop's input state. The renderer resizes the canvas itself.
pub fn wire_input_handlers(window: &web::Window, frame_loop: &SharedLoop) {
    wire_resize(window, frame_loop);
    wire_scroll(window, frame_loop);
    wire_pointermove(window, frame_loop);
}

fn wire_resize(window: &web::Window, frame_loop: &SharedLoop) {
    let frame_loop = frame_loop.clone();
    let closure = Closure::wrap(Box::new(move || {
        let Some(w) = web::window() else {
            return;
        };
        let viewport = dom::current_viewport(&w);
        frame_loop.borrow_mut().handle_event(InputEvent::Resize {
            width: viewport.width,
            height: viewport.height,
            pixel_ratio: viewport.pixel_ratio,
        });
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_scroll(window: &web::Window, frame_loop: &SharedLoop) {
    let frame_loop = frame_loop.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(w) = web::window() {
            frame_loop.borrow_mut().handle_event(InputEvent::Scroll {
                offset_y: dom::scroll_offset(&w),
            });
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(window: &web::Window, frame_loop: &SharedLoop) {
    let frame_loop = frame_loop.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        frame_loop.borrow_mut().handle_event(InputEvent::PointerMove {
            client_x: ev.client_x() as f32,
            client_y: ev.client_y() as f32,
        });
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}
