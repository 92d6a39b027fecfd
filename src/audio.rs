//! Playback coordination between the background track and the gallery.
//!
//! At most one source is audible at any time: starting the background track
//! stops every gallery track, and starting a gallery track stops the previous
//! one and the background track. The browser side lives behind [`MediaHost`];
//! its media events come back through [`AudioController::handle_event`].

use crate::fault::Notice;
use log::{debug, error, info, warn};

/// Visual state of one gallery card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    #[default]
    Idle,
    Loading,
    Playing,
}

impl TrackState {
    /// Font Awesome classes for the card's play control.
    pub fn icon_class(self) -> &'static str {
        match self {
            TrackState::Idle => "fas fa-play",
            TrackState::Loading => "fas fa-spinner fa-spin",
            TrackState::Playing => "fas fa-pause",
        }
    }

    /// Extra class on the card element, if any.
    pub fn card_class(self) -> Option<&'static str> {
        match self {
            TrackState::Idle => None,
            TrackState::Loading => Some("loading"),
            TrackState::Playing => Some("playing"),
        }
    }
}

/// Identifies one playable instance of a gallery track.
///
/// Every selection creates a new instance with a fresh generation, so events
/// from an instance that was already replaced can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackHandle {
    pub index: usize,
    pub generation: u64,
}

/// Media lifecycle events reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    Started(TrackHandle),
    Paused(TrackHandle),
    Ended(TrackHandle),
    LoadFailed(TrackHandle),
    PlayRejected(TrackHandle, String),
    /// The background element played or paused.
    BackgroundChanged,
}

/// Host audio elements driven by the controller.
///
/// Playback start is asynchronous: `start_track` only requests it, and the
/// outcome arrives later as a [`MediaEvent`].
pub trait MediaHost {
    fn background_paused(&self) -> bool;
    fn play_background(&mut self);
    fn pause_background(&mut self);
    /// Create a fresh playable instance for `src` and request playback.
    fn start_track(&mut self, handle: TrackHandle, src: &str);
    fn pause_track(&mut self, handle: TrackHandle);
    /// Pause the instance and detach it; it reports no further events.
    fn stop_track(&mut self, handle: TrackHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Session {
    handle: TrackHandle,
    state: TrackState,
}

/// Owns the audio session: which gallery instance is current and what the
/// background toggle shows.
#[derive(Debug, Default)]
pub struct AudioController {
    sources: Vec<String>,
    session: Option<Session>,
    generation: u64,
    background_playing: bool,
}

impl AudioController {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AudioController {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn track_count(&self) -> usize {
        self.sources.len()
    }

    pub fn track_state(&self, index: usize) -> TrackState {
        match self.session {
            Some(session) if session.handle.index == index => session.state,
            _ => TrackState::Idle,
        }
    }

    /// The gallery instance that is currently playing.
    pub fn current_track(&self) -> Option<TrackHandle> {
        self.session
            .filter(|s| s.state == TrackState::Playing)
            .map(|s| s.handle)
    }

    pub fn background_playing(&self) -> bool {
        self.background_playing
    }

    pub fn background_icon_class(&self) -> &'static str {
        if self.background_playing {
            TrackState::Playing.icon_class()
        } else {
            TrackState::Idle.icon_class()
        }
    }

    /// Re-read the background element rather than trusting the last request.
    pub fn refresh_background<H: MediaHost>(&mut self, host: &H) {
        self.background_playing = !host.background_paused();
    }

    pub fn toggle_background<H: MediaHost>(&mut self, host: &mut H) {
        if host.background_paused() {
            self.stop_all_tracks(host);
            host.play_background();
        } else {
            host.pause_background();
        }
        self.refresh_background(host);
    }

    /// Select a gallery track. Selecting the playing track pauses it.
    pub fn play_track<H: MediaHost>(&mut self, index: usize, host: &mut H) {
        let Some(src) = self.sources.get(index).cloned() else {
            warn!("Ignoring selection of unknown track {}", index);
            return;
        };

        if let Some(session) = self.session {
            if session.handle.index == index && session.state == TrackState::Playing {
                host.pause_track(session.handle);
                return;
            }
        }

        self.stop_all_tracks(host);
        if !host.background_paused() {
            host.pause_background();
        }
        self.refresh_background(host);

        self.generation += 1;
        let handle = TrackHandle { index, generation: self.generation };
        self.session = Some(Session { handle, state: TrackState::Loading });
        debug!("Loading track {} from {}", index, src);
        host.start_track(handle, &src);
    }

    /// Stop and detach the current gallery instance, if any.
    pub fn stop_all_tracks<H: MediaHost>(&mut self, host: &mut H) {
        if let Some(session) = self.session.take() {
            host.stop_track(session.handle);
        }
    }

    /// Apply a media event. Returns a notice when the user must be told.
    pub fn handle_event<H: MediaHost>(&mut self, event: MediaEvent, host: &mut H) -> Option<Notice> {
        match event {
            MediaEvent::BackgroundChanged => {
                self.refresh_background(host);
                None
            }
            MediaEvent::Started(handle) => {
                let session = self.current_session(handle)?;
                session.state = TrackState::Playing;
                info!("Playing track {}", handle.index);
                if !host.background_paused() {
                    host.pause_background();
                }
                self.refresh_background(host);
                None
            }
            MediaEvent::Paused(handle) => {
                let session = self.current_session(handle)?;
                session.state = TrackState::Idle;
                None
            }
            MediaEvent::Ended(handle) => {
                self.current_session(handle)?;
                self.session = None;
                host.stop_track(handle);
                None
            }
            MediaEvent::PlayRejected(handle, reason) => {
                let session = self.current_session(handle)?;
                session.state = TrackState::Idle;
                warn!("Playback of track {} was blocked: {}", handle.index, reason);
                None
            }
            MediaEvent::LoadFailed(handle) => {
                self.current_session(handle)?;
                self.session = None;
                host.stop_track(handle);
                let src = self.sources.get(handle.index).map(String::as_str).unwrap_or_default();
                error!("Failed to load audio {}", src);
                Some(Notice::track_unavailable(src))
            }
        }
    }

    fn current_session(&mut self, handle: TrackHandle) -> Option<&mut Session> {
        match self.session.as_mut() {
            Some(session) if session.handle == handle => Some(session),
            _ => {
                debug!("Ignoring event from replaced track instance {:?}", handle);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        PlayBackground,
        PauseBackground,
        Start(TrackHandle, String),
        Pause(TrackHandle),
        Stop(TrackHandle),
    }

    /// Scripted host: an instance counts as audible from the moment it is
    /// started until it is paused or stopped.
    #[derive(Default)]
    struct FakeHost {
        background_paused: bool,
        audible: HashSet<TrackHandle>,
        calls: Vec<Call>,
    }

    impl FakeHost {
        fn new() -> Self {
            FakeHost { background_paused: true, ..Default::default() }
        }

        fn audible_sources(&self) -> usize {
            self.audible.len() + usize::from(!self.background_paused)
        }

        fn last_start(&self) -> TrackHandle {
            self.calls
                .iter()
                .rev()
                .find_map(|c| match c {
                    Call::Start(h, _) => Some(*h),
                    _ => None,
                })
                .expect("no track was started")
        }
    }

    impl MediaHost for FakeHost {
        fn background_paused(&self) -> bool {
            self.background_paused
        }

        fn play_background(&mut self) {
            self.background_paused = false;
            self.calls.push(Call::PlayBackground);
        }

        fn pause_background(&mut self) {
            self.background_paused = true;
            self.calls.push(Call::PauseBackground);
        }

        fn start_track(&mut self, handle: TrackHandle, src: &str) {
            self.audible.insert(handle);
            self.calls.push(Call::Start(handle, src.to_string()));
        }

        fn pause_track(&mut self, handle: TrackHandle) {
            self.audible.remove(&handle);
            self.calls.push(Call::Pause(handle));
        }

        fn stop_track(&mut self, handle: TrackHandle) {
            self.audible.remove(&handle);
            self.calls.push(Call::Stop(handle));
        }
    }

    fn controller() -> AudioController {
        AudioController::new(["music/a.mp3", "music/b.mp3", "music/c.mp3"])
    }

    fn start_and_confirm(ctl: &mut AudioController, host: &mut FakeHost, index: usize) -> TrackHandle {
        ctl.play_track(index, host);
        let handle = host.last_start();
        assert_eq!(ctl.track_state(index), TrackState::Loading);
        assert_eq!(ctl.handle_event(MediaEvent::Started(handle), host), None);
        handle
    }

    #[test]
    fn track_goes_loading_then_playing() {
        let mut ctl = controller();
        let mut host = FakeHost::new();

        ctl.play_track(1, &mut host);
        let handle = host.last_start();
        assert_eq!(host.calls, vec![Call::Start(handle, "music/b.mp3".into())]);
        assert_eq!(ctl.track_state(1), TrackState::Loading);
        assert_eq!(ctl.current_track(), None);

        ctl.handle_event(MediaEvent::Started(handle), &mut host);
        assert_eq!(ctl.track_state(1), TrackState::Playing);
        assert_eq!(ctl.current_track(), Some(handle));
        assert_eq!(ctl.track_state(0), TrackState::Idle);
    }

    #[test]
    fn selecting_playing_track_pauses_it() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        let handle = start_and_confirm(&mut ctl, &mut host, 0);
        let starts_before = host.calls.iter().filter(|c| matches!(c, Call::Start(..))).count();

        ctl.play_track(0, &mut host);
        assert_eq!(host.calls.last(), Some(&Call::Pause(handle)));
        let starts_after = host.calls.iter().filter(|c| matches!(c, Call::Start(..))).count();
        assert_eq!(starts_before, starts_after);

        ctl.handle_event(MediaEvent::Paused(handle), &mut host);
        assert_eq!(ctl.track_state(0), TrackState::Idle);
        assert_eq!(host.audible_sources(), 0);
    }

    #[test]
    fn reselecting_paused_track_starts_fresh_instance() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        let first = start_and_confirm(&mut ctl, &mut host, 0);
        ctl.play_track(0, &mut host);
        ctl.handle_event(MediaEvent::Paused(first), &mut host);

        ctl.play_track(0, &mut host);
        let second = host.last_start();
        assert_ne!(first, second);
        assert!(host.calls.contains(&Call::Stop(first)));
        assert_eq!(ctl.track_state(0), TrackState::Loading);
    }

    #[test]
    fn switching_tracks_stops_previous() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        let first = start_and_confirm(&mut ctl, &mut host, 0);

        ctl.play_track(2, &mut host);
        assert!(host.calls.contains(&Call::Stop(first)));
        assert_eq!(ctl.track_state(0), TrackState::Idle);
        assert_eq!(ctl.track_state(2), TrackState::Loading);
    }

    #[test]
    fn stale_events_are_ignored() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        ctl.play_track(0, &mut host);
        let stale = host.last_start();
        ctl.play_track(1, &mut host);
        let fresh = host.last_start();

        ctl.handle_event(MediaEvent::Started(stale), &mut host);
        assert_eq!(ctl.track_state(0), TrackState::Idle);
        assert_eq!(ctl.track_state(1), TrackState::Loading);

        assert_eq!(ctl.handle_event(MediaEvent::LoadFailed(stale), &mut host), None);
        ctl.handle_event(MediaEvent::Started(fresh), &mut host);
        assert_eq!(ctl.current_track(), Some(fresh));
    }

    #[test]
    fn background_toggle_stops_tracks() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        let handle = start_and_confirm(&mut ctl, &mut host, 0);

        ctl.toggle_background(&mut host);
        assert!(host.calls.contains(&Call::Stop(handle)));
        assert!(ctl.background_playing());
        assert_eq!(ctl.background_icon_class(), "fas fa-pause");
        assert_eq!(ctl.track_state(0), TrackState::Idle);
        assert_eq!(host.audible_sources(), 1);

        ctl.toggle_background(&mut host);
        assert!(!ctl.background_playing());
        assert_eq!(ctl.background_icon_class(), "fas fa-play");
    }

    #[test]
    fn background_icon_reads_host_state() {
        struct StubbornHost(FakeHost);
        impl MediaHost for StubbornHost {
            fn background_paused(&self) -> bool {
                true
            }
            fn play_background(&mut self) {}
            fn pause_background(&mut self) {}
            fn start_track(&mut self, h: TrackHandle, src: &str) {
                self.0.start_track(h, src)
            }
            fn pause_track(&mut self, h: TrackHandle) {
                self.0.pause_track(h)
            }
            fn stop_track(&mut self, h: TrackHandle) {
                self.0.stop_track(h)
            }
        }

        let mut ctl = controller();
        let mut host = StubbornHost(FakeHost::new());
        ctl.toggle_background(&mut host);
        assert!(!ctl.background_playing());
    }

    #[test]
    fn track_start_pauses_background() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        ctl.toggle_background(&mut host);
        assert!(ctl.background_playing());

        ctl.play_track(1, &mut host);
        assert!(host.background_paused);
        assert!(!ctl.background_playing());

        // Background resumed externally while the track was loading.
        host.background_paused = false;
        ctl.handle_event(MediaEvent::Started(host.last_start()), &mut host);
        assert!(host.background_paused);
        assert!(!ctl.background_playing());
    }

    #[test]
    fn natural_end_clears_current_track() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        let handle = start_and_confirm(&mut ctl, &mut host, 2);

        ctl.handle_event(MediaEvent::Ended(handle), &mut host);
        assert_eq!(ctl.current_track(), None);
        assert_eq!(ctl.track_state(2), TrackState::Idle);
        assert_eq!(host.calls.last(), Some(&Call::Stop(handle)));
    }

    #[test]
    fn load_failure_names_resource() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        ctl.play_track(1, &mut host);
        let handle = host.last_start();

        let notice = ctl.handle_event(MediaEvent::LoadFailed(handle), &mut host);
        assert_eq!(notice, Some(Notice::TrackUnavailable { file: "b.mp3".into() }));
        assert_eq!(ctl.track_state(1), TrackState::Idle);
    }

    #[test]
    fn rejected_playback_resets_silently() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        ctl.play_track(0, &mut host);
        let handle = host.last_start();

        let notice = ctl.handle_event(MediaEvent::PlayRejected(handle, "NotAllowedError".into()), &mut host);
        assert_eq!(notice, None);
        assert_eq!(ctl.track_state(0), TrackState::Idle);

        // A load error reported after the rejection still reaches the user.
        let notice = ctl.handle_event(MediaEvent::LoadFailed(handle), &mut host);
        assert!(notice.is_some());
    }

    #[test]
    fn unknown_index_is_ignored() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        ctl.play_track(9, &mut host);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn at_most_one_source_audible() {
        let mut ctl = controller();
        let mut host = FakeHost::new();
        let script: [Option<usize>; 10] =
            [Some(0), None, Some(1), Some(1), Some(2), None, None, Some(0), Some(2), None];

        for step in script {
            match step {
                Some(index) => {
                    ctl.play_track(index, &mut host);
                    if ctl.track_state(index) == TrackState::Loading {
                        let handle = host.last_start();
                        ctl.handle_event(MediaEvent::Started(handle), &mut host);
                    }
                }
                None => ctl.toggle_background(&mut host),
            }
            assert!(host.audible_sources() <= 1, "after {:?}: {:?}", step, host.calls);
            let busy = (0..ctl.track_count())
                .filter(|&i| ctl.track_state(i) != TrackState::Idle)
                .count();
            assert!(busy <= 1);
        }
    }
}
