//! Full-viewport confetti canvas driven by `requestAnimationFrame`.

use crate::config::CONFETTI_Z_INDEX;
use crate::hooks::viewport_size;
use birthday_countdown::confetti::defaults::POOL_SIZE;
use birthday_countdown::{Particle, ParticleField};
use gloo_events::EventListener;
use log::{debug, error, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running animation; dropping it cancels the pending frame.
struct Animation {
    frame: FrameCallback,
    request: Rc<Cell<Option<i32>>>,
    _resize: EventListener,
}

impl Drop for Animation {
    fn drop(&mut self) {
        if let Some(id) = self.request.take() {
            let _ = gloo_utils::window().cancel_animation_frame(id);
        }
        self.frame.borrow_mut().take();
    }
}

#[function_component(ConfettiCanvas)]
pub fn confetti_canvas() -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            match start(&canvas_ref) {
                Ok(animation) => Box::new(move || drop(animation)),
                Err(e) => {
                    error!("Confetti effect unavailable: {:?}", e);
                    Box::new(|| ())
                }
            }
        });
    }

    let style = format!(
        "position: fixed; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none; z-index: {};",
        CONFETTI_Z_INDEX
    );
    html! { <canvas ref={canvas_ref} class="confetti" {style} /> }
}

fn start(canvas_ref: &NodeRef) -> Result<Animation, JsValue> {
    let canvas = canvas_ref
        .cast::<HtmlCanvasElement>()
        .ok_or_else(|| JsValue::from_str("confetti canvas is not mounted"))?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let (width, height) = viewport_size();
    fit(&canvas, width, height);
    let rng = StdRng::try_from_os_rng()
        .unwrap_or_else(|_| StdRng::seed_from_u64(js_sys::Date::now() as u64));
    let field = Rc::new(RefCell::new(ParticleField::new(POOL_SIZE, width, height, rng)));
    debug!("Confetti started with {} particles on {}x{}", POOL_SIZE, width, height);

    let resize = {
        let canvas = canvas.clone();
        let field = field.clone();
        EventListener::new(&gloo_utils::window(), "resize", move |_| {
            let (width, height) = viewport_size();
            fit(&canvas, width, height);
            field.borrow_mut().resize(width, height);
        })
    };

    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let request = Rc::new(Cell::new(None));
    {
        let next_frame = frame.clone();
        let request = request.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let mut field = field.borrow_mut();
            field.step();
            if let Err(e) = draw(&ctx, &*field) {
                warn!("Confetti frame failed: {:?}", e);
            }
            request.set(schedule(&next_frame));
        }) as Box<dyn FnMut()>));
    }
    request.set(schedule(&frame));

    Ok(Animation { frame, request, _resize: resize })
}

fn schedule(frame: &FrameCallback) -> Option<i32> {
    let frame = frame.borrow();
    let callback = frame.as_ref()?;
    gloo_utils::window()
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

fn fit(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

fn draw<R: Rng>(ctx: &CanvasRenderingContext2d, field: &ParticleField<R>) -> Result<(), JsValue> {
    ctx.clear_rect(0.0, 0.0, field.width(), field.height());
    for particle in field.particles() {
        ctx.save();
        let drawn = draw_particle(ctx, particle);
        ctx.restore();
        drawn?;
    }
    Ok(())
}

/// Filled square centred on the particle, rotated about its centre.
fn draw_particle(ctx: &CanvasRenderingContext2d, p: &Particle) -> Result<(), JsValue> {
    ctx.translate(p.x, p.y)?;
    ctx.rotate(p.rotation)?;
    ctx.set_fill_style_str(p.color);
    let half = p.size / 2.0;
    ctx.fill_rect(-half, -half, p.size, p.size);
    Ok(())
}
