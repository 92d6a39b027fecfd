//! Main module for the birthday countdown page using Yew.
//! Wires the countdown, celebration and audio gallery to the DOM.

use birthday_countdown::{
    logging,
    tracks::{parse_tracks, BUNDLED_TRACKS},
    AudioController, CelebrationLatch, MediaEvent,
};
use log::{error, info, warn};
use web_sys::HtmlAudioElement;
use yew::prelude::*;

mod canvas;
mod components;
mod config;
mod guard;
mod hooks;
mod media;

use canvas::ConfettiCanvas;
use components::{BackgroundToggle, CelebrationOverlay, CountdownDisplay, TrackCard};
use config::*;
use hooks::use_countdown;
use media::WebMediaHost;

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let tracks = use_memo((), |_| {
        parse_tracks(BUNDLED_TRACKS).unwrap_or_else(|e| {
            error!("{}", e);
            Vec::new()
        })
    });

    // Celebration
    let celebrating = use_state(|| false);
    let latch = use_mut_ref(CelebrationLatch::new);

    let celebrate = {
        let celebrating = celebrating.clone();
        Callback::from(move |()| {
            info!("Target reached, starting celebration");
            if let Some(body) = gloo_utils::document().body() {
                if let Err(e) = body.class_list().add_1(BODY_CELEBRATION_CLASS) {
                    warn!("Could not mark the page as celebrating: {}", media::describe(&e));
                }
            }
            celebrating.set(true);
        })
    };
    let phase = use_countdown(TARGET, latch, celebrate);

    // Audio
    let audio = {
        let tracks = tracks.clone();
        use_mut_ref(move || AudioController::new(tracks.iter().map(|t| t.audio.clone())))
    };
    // Created on mount, once the background element exists.
    let host = use_mut_ref(|| None::<WebMediaHost>);
    let refresh = use_force_update();
    let bg_ref = use_node_ref();

    let on_media_event = {
        let audio = audio.clone();
        let host = host.clone();
        let refresh = refresh.clone();
        Callback::from(move |event: MediaEvent| {
            let notice = {
                let mut host = host.borrow_mut();
                let Some(host) = host.as_mut() else {
                    return;
                };
                audio.borrow_mut().handle_event(event, host)
            };
            refresh.force_update();
            if let Some(notice) = notice {
                guard::notify(&notice);
            }
        })
    };

    {
        let audio = audio.clone();
        let host = host.clone();
        let bg_ref = bg_ref.clone();
        let on_media_event = on_media_event.clone();
        use_effect_with((), move |_| match bg_ref.cast::<HtmlAudioElement>() {
            Some(background) => {
                let web = WebMediaHost::new(background, on_media_event);
                audio.borrow_mut().refresh_background(&web);
                *host.borrow_mut() = Some(web);
            }
            None => error!("Background audio element is missing"),
        });
    }

    let on_toggle_background = {
        let audio = audio.clone();
        let host = host.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(host) = host.borrow_mut().as_mut() {
                audio.borrow_mut().toggle_background(host);
            }
            refresh.force_update();
        })
    };

    let on_select_track = {
        let audio = audio.clone();
        let host = host.clone();
        let refresh = refresh.clone();
        Callback::from(move |index: usize| {
            if let Some(host) = host.borrow_mut().as_mut() {
                audio.borrow_mut().play_track(index, host);
            }
            refresh.force_update();
        })
    };

    let on_background_changed = {
        let on_media_event = on_media_event.clone();
        Callback::from(move |_: Event| on_media_event.emit(MediaEvent::BackgroundChanged))
    };

    let audio_view = audio.borrow();

    html! {
        <div class="birthday-page">
            <header class="page-header">
                <h1>{ "生日倒计时" }</h1>
            </header>

            <CountdownDisplay {phase} />

            <section class="background-music">
                <audio
                    ref={bg_ref}
                    id="bgMusic"
                    src={BACKGROUND_SRC}
                    preload="auto"
                    onplay={on_background_changed.clone()}
                    onpause={on_background_changed}
                />
                <BackgroundToggle
                    icon_class={audio_view.background_icon_class()}
                    onclick={on_toggle_background}
                />
            </section>

            <section class="music-gallery">
                { for tracks.iter().enumerate().map(|(index, track)| html! {
                    <TrackCard
                        key={index.to_string()}
                        {index}
                        track={track.clone()}
                        state={audio_view.track_state(index)}
                        on_select={on_select_track.clone()}
                    />
                }) }
            </section>

            if *celebrating {
                <>
                    <ConfettiCanvas />
                    <CelebrationOverlay />
                </>
            }
        </div>
    }
}

/// Entry point: installs diagnostics and fault handlers, then renders the app.
fn main() {
    console_error_panic_hook::set_once();
    logging::init(LOG_LEVEL);
    guard::install();
    yew::Renderer::<App>::new().render();
}
