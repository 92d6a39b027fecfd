//! Page-wide fault handling: broken images and uncaught errors.

use birthday_countdown::fault::{replacement_for, ImageContext, ALBUM_COVER_CLASS};
use birthday_countdown::Notice;
use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, error, warn};
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, Event, HtmlImageElement};

/// Listen for `error` on the window in the capture phase, which sees both
/// resource failures (they do not bubble) and uncaught runtime errors.
pub fn install() {
    EventListener::new_with_options(
        &gloo_utils::window(),
        "error",
        EventListenerOptions::run_in_capture_phase(),
        on_error,
    )
    .forget();
}

fn on_error(event: &Event) {
    if let Some(image) = event.target().and_then(|t| t.dyn_into::<HtmlImageElement>().ok()) {
        substitute_placeholder(&image);
        return;
    }
    if let Some(err) = event.dyn_ref::<ErrorEvent>() {
        error!(
            "Uncaught error: {} at {}:{}:{}",
            err.message(),
            err.filename(),
            err.lineno(),
            err.colno()
        );
        notify(&Notice::UnexpectedError);
    }
}

fn substitute_placeholder(image: &HtmlImageElement) {
    let in_album_cover = image
        .parent_element()
        .is_some_and(|parent| parent.class_list().contains(ALBUM_COVER_CLASS));
    let src = image.src();
    match replacement_for(&src, ImageContext::from_album_cover(in_album_cover)) {
        Some(placeholder) => {
            debug!("Image {} failed, showing {}", src, placeholder);
            image.set_src(placeholder);
        }
        None => warn!("Placeholder image {} failed to load", src),
    }
}

/// Show a notice to the user.
pub fn notify(notice: &Notice) {
    if let Err(e) = gloo_utils::window().alert_with_message(&notice.to_string()) {
        warn!("Could not show notice {:?}: {:?}", notice, e);
    }
}
