//! Pure Yew view components for the birthday page.
//!
//! These render from props only; state lives in `main.rs`.

use crate::hooks::use_viewport_size;
use birthday_countdown::fault::ALBUM_PLACEHOLDER;
use birthday_countdown::{overlay, CountdownPhase, Track, TrackState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CountdownDisplayProps {
    pub phase: CountdownPhase,
}

/// Day/hour/minute/second boxes. Shows zeros once the target has passed.
#[function_component(CountdownDisplay)]
pub fn countdown_display(props: &CountdownDisplayProps) -> Html {
    let [days, hours, minutes, seconds] = match props.phase {
        CountdownPhase::Running(fields) => [
            fields.days_text(),
            fields.hours_text(),
            fields.minutes_text(),
            fields.seconds_text(),
        ],
        CountdownPhase::Expired => ["00".to_string(), "00".to_string(), "00".to_string(), "00".to_string()],
    };

    let unit = |id: &'static str, value: String, label: &'static str| {
        html! {
            <div class="time-unit">
                <span class="time-value" {id}>{ value }</span>
                <span class="time-label">{ label }</span>
            </div>
        }
    };

    html! {
        <div class="countdown">
            { unit("days", days, "天") }
            { unit("hours", hours, "时") }
            { unit("minutes", minutes, "分") }
            { unit("seconds", seconds, "秒") }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BackgroundToggleProps {
    pub icon_class: &'static str,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(BackgroundToggle)]
pub fn background_toggle(props: &BackgroundToggleProps) -> Html {
    html! {
        <button id="bgMusicToggle" class="music-toggle" onclick={props.onclick.clone()}>
            <i class={props.icon_class}></i>
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct TrackCardProps {
    pub index: usize,
    pub track: Track,
    pub state: TrackState,
    pub on_select: Callback<usize>,
}

/// One gallery card with cover, title and play control.
#[function_component(TrackCard)]
pub fn track_card(props: &TrackCardProps) -> Html {
    let track = &props.track;
    let onclick = {
        let on_select = props.on_select.clone();
        let index = props.index;
        Callback::from(move |_: MouseEvent| on_select.emit(index))
    };
    let cover = track.cover.clone().unwrap_or_else(|| ALBUM_PLACEHOLDER.to_string());

    html! {
        <div class={classes!("music-card", props.state.card_class())}>
            <div class="album-cover">
                <img src={cover} alt={track.title.clone()} loading="lazy" />
            </div>
            <div class="track-info">
                <h3 class="track-title">{ track.title.clone() }</h3>
                <p class="track-artist">{ track.artist.clone() }</p>
            </div>
            <button class="play-icon" data-audio={track.audio.clone()} {onclick}>
                <i class={props.state.icon_class()}></i>
            </button>
        </div>
    }
}

/// Centered pop-in greeting, sized to the viewport.
#[function_component(CelebrationOverlay)]
pub fn celebration_overlay() -> Html {
    let (width, _) = use_viewport_size();
    let stylesheet = use_memo((), |_| overlay::stylesheet());

    html! {
        <>
            <style>{ (*stylesheet).clone() }</style>
            <div id={overlay::ELEMENT_ID} style={overlay::font_size_style(width)}>
                { overlay::MESSAGE }
            </div>
        </>
    }
}
