use crate::config::TICK_MS;
use birthday_countdown::{CelebrationLatch, Countdown, CountdownPhase, SystemClock, TargetInstant};
use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Current viewport size in CSS pixels.
pub fn viewport_size() -> (f64, f64) {
    let window = gloo_utils::window();
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    (read(window.inner_width()), read(window.inner_height()))
}

/// Counts down to `target`, re-evaluating every second.
///
/// At mount the startup check fires `latch` if the target has already
/// passed. Expiry seen by a later tick goes through the same latch, so
/// `celebrate` is emitted at most once. The interval is dropped on expiry
/// and never restarts.
#[hook]
pub fn use_countdown(
    target: TargetInstant,
    latch: Rc<RefCell<CelebrationLatch>>,
    celebrate: Callback<()>,
) -> CountdownPhase {
    let phase = use_state(|| Countdown::new(target, SystemClock).tick());

    {
        let phase = phase.clone();
        let latch = latch.clone();
        let celebrate = celebrate.clone();
        use_effect_with((), move |_| {
            let countdown = Countdown::new(target, SystemClock);
            phase.set(countdown.check_startup(&mut latch.borrow_mut(), || celebrate.emit(())));
        });
    }

    {
        let phase = phase.clone();
        use_effect_with(phase.is_expired(), move |&expired| -> Box<dyn FnOnce()> {
            if expired {
                latch.borrow_mut().fire(|| celebrate.emit(()));
                return Box::new(|| ());
            }
            let countdown = Countdown::new(target, SystemClock);
            let interval = Interval::new(TICK_MS, move || phase.set(countdown.tick()));
            Box::new(move || drop(interval))
        });
    }

    *phase
}

/// Viewport size, updated on window resize.
#[hook]
pub fn use_viewport_size() -> (f64, f64) {
    let size = use_state(viewport_size);

    {
        let size = size.clone();
        use_effect_with((), move |_| {
            let listener =
                EventListener::new(&gloo_utils::window(), "resize", move |_| size.set(viewport_size()));
            move || drop(listener)
        });
    }

    *size
}
