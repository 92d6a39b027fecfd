//! `MediaHost` over real `<audio>` elements.

use crate::config::{BACKGROUND_VOLUME, TRACK_PRELOAD, TRACK_VOLUME};
use birthday_countdown::{MediaEvent, MediaHost, TrackHandle};
use gloo_events::EventListener;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{EventTarget, HtmlAudioElement};
use yew::Callback;

/// The gallery instance currently owned by the host.
struct ActiveTrack {
    handle: TrackHandle,
    element: HtmlAudioElement,
    listeners: Vec<EventListener>,
}

impl ActiveTrack {
    /// Detach listeners first so the pause below reports nothing.
    fn halt(self) {
        drop(self.listeners);
        if let Err(e) = self.element.pause() {
            warn!("Failed to pause track {}: {}", self.handle.index, describe(&e));
        }
    }
}

pub struct WebMediaHost {
    background: HtmlAudioElement,
    active: Option<ActiveTrack>,
    events: Callback<MediaEvent>,
}

impl WebMediaHost {
    pub fn new(background: HtmlAudioElement, events: Callback<MediaEvent>) -> Self {
        background.set_volume(BACKGROUND_VOLUME);
        background.set_loop(true);
        WebMediaHost { background, active: None, events }
    }

    fn open(&self, handle: TrackHandle, src: &str) -> Result<ActiveTrack, JsValue> {
        let element = HtmlAudioElement::new_with_src(src)?;
        element.set_preload(TRACK_PRELOAD);
        element.set_volume(TRACK_VOLUME);

        let target: &EventTarget = element.as_ref();
        let listeners: Vec<EventListener> = [
            ("play", MediaEvent::Started(handle)),
            ("pause", MediaEvent::Paused(handle)),
            ("ended", MediaEvent::Ended(handle)),
            ("error", MediaEvent::LoadFailed(handle)),
        ]
        .into_iter()
        .map(|(name, event)| {
            let events = self.events.clone();
            EventListener::new(target, name, move |_| events.emit(event.clone()))
        })
        .collect();

        Ok(ActiveTrack { handle, element, listeners })
    }

    /// Report an outcome after the current handler has returned.
    fn report_later(&self, event: MediaEvent) {
        let events = self.events.clone();
        spawn_local(async move { events.emit(event) });
    }
}

impl MediaHost for WebMediaHost {
    fn background_paused(&self) -> bool {
        self.background.paused()
    }

    fn play_background(&mut self) {
        match self.background.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    warn!("Background music was blocked: {}", describe(&e));
                }
            }),
            Err(e) => warn!("Background music could not start: {}", describe(&e)),
        }
    }

    fn pause_background(&mut self) {
        if let Err(e) = self.background.pause() {
            warn!("Failed to pause background music: {}", describe(&e));
        }
    }

    fn start_track(&mut self, handle: TrackHandle, src: &str) {
        if let Some(previous) = self.active.take() {
            previous.halt();
        }

        let track = match self.open(handle, src) {
            Ok(track) => track,
            Err(e) => {
                error!("Could not create audio for {}: {}", src, describe(&e));
                self.report_later(MediaEvent::LoadFailed(handle));
                return;
            }
        };

        match track.element.play() {
            Ok(promise) => {
                let events = self.events.clone();
                spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        events.emit(MediaEvent::PlayRejected(handle, describe(&e)));
                    }
                });
            }
            Err(e) => self.report_later(MediaEvent::PlayRejected(handle, describe(&e))),
        }
        self.active = Some(track);
    }

    fn pause_track(&mut self, handle: TrackHandle) {
        if let Some(track) = self.active.as_ref().filter(|t| t.handle == handle) {
            if let Err(e) = track.element.pause() {
                warn!("Failed to pause track {}: {}", handle.index, describe(&e));
            }
        }
    }

    fn stop_track(&mut self, handle: TrackHandle) {
        if self.active.as_ref().is_some_and(|t| t.handle == handle) {
            if let Some(track) = self.active.take() {
                track.halt();
            }
        }
    }
}

/// Human-readable text for a rejected promise or thrown value.
pub fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        let name: String = err.name().into();
        let message: String = err.message().into();
        return format!("{}: {}", name, message);
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
