//! Media playback controller with per-file resume positions.
//!
//! # Design
//! - One lesson is active at a time; its element is bound as a tagged
//!   [`ActiveMedia`] variant so video and audio are never driven together.
//! - The DOM is reached only through [`MediaElement`]; `services::media` implements
//!   it for `HtmlMediaElement`, tests implement it with plain cells.
//! - Resume positions are keyed by file path, not lesson id, so a rescan that
//!   regenerates ids keeps progress.
//! - Volume and rate are controller settings: they survive lesson changes and are
//!   re-applied to every newly bound element.

use crate::core::storage::{KeyValueStore, resume_key};
use lectern_api_models::{LessonNode, MediaKind};

/// Playback rates offered by the rate selector.
pub const PLAYBACK_RATES: [f64; 7] = [0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

/// Capabilities shared by video and audio elements.
pub trait MediaElement {
    /// Whether the element is paused.
    fn is_paused(&self) -> bool;
    /// Start or resume playback.
    fn request_play(&self);
    /// Pause playback.
    fn request_pause(&self);
    /// Current position in seconds.
    fn position(&self) -> f64;
    /// Whether metadata has already loaded, so `loadedmetadata` will not fire again.
    fn is_ready(&self) -> bool;
    /// Move to `seconds`; clamping is left to the element.
    fn seek_to(&self, seconds: f64);
    /// Media duration in seconds; may be `NaN` before metadata loads.
    fn total_duration(&self) -> f64;
    /// Set the output volume in `[0, 1]`.
    fn apply_volume(&self, volume: f64);
    /// Set the playback rate.
    fn apply_playback_rate(&self, rate: f64);
}

/// The bound element, tagged by the kind of media it plays.
#[derive(Clone, Debug, PartialEq)]
pub enum ActiveMedia<E> {
    /// A `<video>` element.
    Video(E),
    /// An `<audio>` element.
    Audio(E),
}

impl<E> ActiveMedia<E> {
    /// Borrow the element regardless of kind.
    pub const fn element(&self) -> &E {
        match self {
            Self::Video(element) | Self::Audio(element) => element,
        }
    }

    /// Media kind of the binding.
    pub const fn kind(&self) -> MediaKind {
        match self {
            Self::Video(_) => MediaKind::Video,
            Self::Audio(_) => MediaKind::Audio,
        }
    }
}

/// Lifecycle of the active lesson.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// No lesson selected.
    NoMedia,
    /// Lesson selected, element not ready yet.
    Loading,
    /// Element ready, not started.
    Ready,
    /// Playing.
    Playing,
    /// Paused after having been ready.
    Paused,
}

/// Output settings retained across lesson changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSettings {
    /// Output volume in `[0, 1]`.
    pub volume: f64,
    /// Playback rate multiplier.
    pub rate: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            rate: 1.0,
        }
    }
}

/// Render-friendly copy of the controller state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSnapshot {
    /// Current phase.
    pub phase: PlaybackPhase,
    /// Last reported position in seconds.
    pub current_time: f64,
    /// Known duration in seconds, `0.0` when unknown.
    pub duration: f64,
    /// Retained settings.
    pub settings: PlaybackSettings,
}

impl PlaybackSnapshot {
    /// Whether the play/pause control should show "pause".
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }
}

/// Persisted resume positions, one entry per file path.
#[derive(Debug, Clone)]
pub struct ResumeStore<S> {
    storage: S,
}

impl<S: KeyValueStore> ResumeStore<S> {
    /// Wrap `storage`.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Saved position for `file_path`, or `0.0` when missing or unparsable.
    #[must_use]
    pub fn load(&self, file_path: &str) -> f64 {
        self.storage
            .get(&resume_key(file_path))
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
            .unwrap_or(0.0)
    }

    /// Overwrite the saved position for `file_path`.
    pub fn save(&self, file_path: &str, seconds: f64) {
        if seconds.is_finite() && seconds >= 0.0 {
            self.storage.set(&resume_key(file_path), &seconds.to_string());
        }
    }
}

/// Drives a single active media element.
#[derive(Debug)]
pub struct PlaybackController<E, S> {
    resume: ResumeStore<S>,
    lesson: Option<LessonNode>,
    media: Option<ActiveMedia<E>>,
    phase: PlaybackPhase,
    settings: PlaybackSettings,
    current_time: f64,
    duration: f64,
    pending_seek: Option<f64>,
}

impl<E: MediaElement, S: KeyValueStore> PlaybackController<E, S> {
    /// Controller with nothing selected and default settings.
    pub const fn new(resume: ResumeStore<S>) -> Self {
        Self {
            resume,
            lesson: None,
            media: None,
            phase: PlaybackPhase::NoMedia,
            settings: PlaybackSettings {
                volume: 1.0,
                rate: 1.0,
            },
            current_time: 0.0,
            duration: 0.0,
            pending_seek: None,
        }
    }

    /// Make `lesson` the active one and queue its resume position.
    ///
    /// Any previous binding is dropped; the caller binds the new element once it
    /// is mounted.
    pub fn select_lesson(&mut self, lesson: LessonNode) {
        let saved = self.resume.load(&lesson.file_path);
        self.pending_seek = (saved > 0.0).then_some(saved);
        self.media = None;
        self.current_time = 0.0;
        self.duration = lesson.duration.map_or(0.0, |seconds| seconds as f64);
        self.phase = PlaybackPhase::Loading;
        self.lesson = Some(lesson);
    }

    /// Bind `element` as the player for the active lesson and apply the settings.
    ///
    /// An element whose metadata is already loaded is treated as ready at once.
    /// Returns `false` when no lesson is active or the lesson is not playable.
    pub fn bind(&mut self, element: E) -> bool {
        let Some(lesson) = &self.lesson else {
            return false;
        };
        let media = match lesson.media_kind() {
            MediaKind::Video => ActiveMedia::Video(element),
            MediaKind::Audio => ActiveMedia::Audio(element),
            MediaKind::Document | MediaKind::Other => return false,
        };
        let element = media.element();
        element.apply_playback_rate(self.settings.rate);
        element.apply_volume(self.settings.volume);
        let loaded = element.is_ready();
        self.media = Some(media);
        if loaded {
            self.on_ready();
        }
        true
    }

    /// The element reported its metadata: apply the pending resume seek once.
    pub fn on_ready(&mut self) {
        let Some(media) = &self.media else {
            return;
        };
        let element = media.element();
        let duration = element.total_duration();
        if duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }
        if let Some(seconds) = self.pending_seek.take() {
            element.seek_to(seconds);
            self.current_time = seconds;
        }
        if self.phase == PlaybackPhase::Loading {
            self.phase = if element.is_paused() {
                PlaybackPhase::Ready
            } else {
                PlaybackPhase::Playing
            };
        }
    }

    /// A time tick from the element; persisted once the element is ready.
    pub fn on_time_update(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.current_time = seconds;
        if matches!(self.phase, PlaybackPhase::NoMedia | PlaybackPhase::Loading) {
            return;
        }
        if let Some(lesson) = &self.lesson {
            self.resume.save(&lesson.file_path, seconds);
        }
    }

    /// Record the bound element's current position, as on a `timeupdate` event.
    pub fn sync_position(&mut self) {
        let Some(media) = &self.media else {
            return;
        };
        let seconds = media.element().position();
        self.on_time_update(seconds);
    }

    /// The element reported a new duration.
    pub fn on_duration_change(&mut self, seconds: f64) {
        if seconds.is_finite() && seconds > 0.0 {
            self.duration = seconds;
        }
    }

    /// The element reached its end.
    pub fn on_ended(&mut self) {
        if self.media.is_some() {
            self.phase = PlaybackPhase::Paused;
        }
    }

    /// Play when paused, pause when playing; the element's paused flag decides.
    pub fn toggle_play(&mut self) {
        let Some(media) = &self.media else {
            return;
        };
        let element = media.element();
        if element.is_paused() {
            element.request_play();
            self.phase = PlaybackPhase::Playing;
        } else {
            element.request_pause();
            self.phase = PlaybackPhase::Paused;
        }
    }

    /// Jump to `seconds`; bounds are the element's concern.
    pub fn seek(&mut self, seconds: f64) {
        let Some(media) = &self.media else {
            return;
        };
        media.element().seek_to(seconds);
        self.current_time = seconds;
    }

    /// Set the volume, clamped to `[0, 1]`; retained across lessons.
    pub fn set_volume(&mut self, volume: f64) {
        if volume.is_nan() {
            return;
        }
        self.settings.volume = volume.clamp(0.0, 1.0);
        if let Some(media) = &self.media {
            media.element().apply_volume(self.settings.volume);
        }
    }

    /// Set the playback rate; ignored unless finite and positive. Retained across lessons.
    pub fn set_playback_rate(&mut self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            return;
        }
        self.settings.rate = rate;
        if let Some(media) = &self.media {
            media.element().apply_playback_rate(rate);
        }
    }

    /// Active lesson.
    pub const fn lesson(&self) -> Option<&LessonNode> {
        self.lesson.as_ref()
    }

    /// Bound element.
    pub const fn media(&self) -> Option<&ActiveMedia<E>> {
        self.media.as_ref()
    }

    /// Current phase.
    pub const fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    /// Retained settings.
    pub const fn settings(&self) -> PlaybackSettings {
        self.settings
    }

    /// Copy of the state for rendering.
    pub const fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            phase: self.phase,
            current_time: self.current_time,
            duration: self.duration,
            settings: self.settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeElement {
        paused: Cell<bool>,
        loaded: Cell<bool>,
        time: Cell<f64>,
        duration: Cell<f64>,
        volume: Cell<f64>,
        rate: Cell<f64>,
        log: RefCell<Vec<&'static str>>,
    }

    impl FakeElement {
        fn pending(duration: f64) -> Rc<Self> {
            let element = Self::default();
            element.paused.set(true);
            element.duration.set(duration);
            Rc::new(element)
        }
    }

    impl MediaElement for Rc<FakeElement> {
        fn is_paused(&self) -> bool {
            self.paused.get()
        }
        fn request_play(&self) {
            self.paused.set(false);
            self.log.borrow_mut().push("play");
        }
        fn request_pause(&self) {
            self.paused.set(true);
            self.log.borrow_mut().push("pause");
        }
        fn position(&self) -> f64 {
            self.time.get()
        }
        fn is_ready(&self) -> bool {
            self.loaded.get()
        }
        fn seek_to(&self, seconds: f64) {
            self.time.set(seconds);
            self.log.borrow_mut().push("seek");
        }
        fn total_duration(&self) -> f64 {
            self.duration.get()
        }
        fn apply_volume(&self, volume: f64) {
            self.volume.set(volume);
        }
        fn apply_playback_rate(&self, rate: f64) {
            self.rate.set(rate);
        }
    }

    fn lesson(id: i64, file_type: &str, path: &str) -> LessonNode {
        LessonNode {
            id,
            title: format!("lesson {id}"),
            file_type: file_type.to_string(),
            file_path: path.to_string(),
            order: 0,
            duration: None,
        }
    }

    type Controller = PlaybackController<Rc<FakeElement>, Rc<MemoryStore>>;

    fn controller() -> (Controller, Rc<MemoryStore>) {
        let storage = Rc::new(MemoryStore::new());
        (
            PlaybackController::new(ResumeStore::new(Rc::clone(&storage))),
            storage,
        )
    }

    #[test]
    fn resume_round_trip_and_unseen_path() {
        let resume = ResumeStore::new(MemoryStore::new());
        resume.save("/a.mp4", 42.5);
        assert!((resume.load("/a.mp4") - 42.5).abs() < f64::EPSILON);
        assert!(resume.load("/never.mp4").abs() < f64::EPSILON);
        resume.save("/a.mp4", 7.0);
        assert!((resume.load("/a.mp4") - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unparsable_resume_value_starts_at_zero() {
        let storage = MemoryStore::new();
        storage.set(&resume_key("/a.mp4"), "NaN-ish");
        let resume = ResumeStore::new(storage);
        assert!(resume.load("/a.mp4").abs() < f64::EPSILON);
    }

    #[test]
    fn selected_lesson_resumes_once_ready() {
        let (mut controller, storage) = controller();
        storage.set(&resume_key("/v.mp4"), "93.25");
        controller.select_lesson(lesson(1, "video", "/v.mp4"));
        assert_eq!(controller.phase(), PlaybackPhase::Loading);

        let element = FakeElement::pending(600.0);
        assert!(controller.bind(Rc::clone(&element)));
        assert_eq!(controller.media().map(ActiveMedia::kind), Some(MediaKind::Video));
        controller.on_ready();
        assert!((element.time.get() - 93.25).abs() < f64::EPSILON);
        assert_eq!(controller.phase(), PlaybackPhase::Ready);
        assert!((controller.snapshot().duration - 600.0).abs() < f64::EPSILON);

        controller.on_ready();
        assert_eq!(
            element.log.borrow().iter().filter(|entry| **entry == "seek").count(),
            1
        );
    }

    #[test]
    fn time_updates_persist_after_ready_only() {
        let (mut controller, storage) = controller();
        storage.set(&resume_key("/a.mp3"), "30");
        controller.select_lesson(lesson(2, "audio", "/a.mp3"));
        let element = FakeElement::pending(100.0);
        controller.bind(Rc::clone(&element));
        controller.on_time_update(0.0);
        assert_eq!(storage.get(&resume_key("/a.mp3")).as_deref(), Some("30"));

        controller.on_ready();
        controller.on_time_update(31.5);
        assert_eq!(storage.get(&resume_key("/a.mp3")).as_deref(), Some("31.5"));
        controller.on_time_update(32.0);
        assert_eq!(storage.get(&resume_key("/a.mp3")).as_deref(), Some("32"));
    }

    #[test]
    fn toggle_follows_element_paused_flag() {
        let (mut controller, _) = controller();
        controller.select_lesson(lesson(1, "video", "/v.mp4"));
        let element = FakeElement::pending(10.0);
        controller.bind(Rc::clone(&element));
        controller.on_ready();
        controller.toggle_play();
        assert_eq!(controller.phase(), PlaybackPhase::Playing);
        assert!(!element.paused.get());
        controller.toggle_play();
        assert_eq!(controller.phase(), PlaybackPhase::Paused);
        assert_eq!(*element.log.borrow(), vec!["play", "pause"]);
    }

    #[test]
    fn settings_survive_lesson_changes() {
        let (mut controller, _) = controller();
        controller.set_volume(0.4);
        controller.set_playback_rate(1.5);
        controller.select_lesson(lesson(1, "video", "/v.mp4"));
        let first = FakeElement::pending(10.0);
        controller.bind(Rc::clone(&first));
        assert!((first.rate.get() - 1.5).abs() < f64::EPSILON);
        assert!((first.volume.get() - 0.4).abs() < f64::EPSILON);

        controller.set_playback_rate(2.0);
        assert!((first.rate.get() - 2.0).abs() < f64::EPSILON);

        controller.select_lesson(lesson(2, "audio", "/a.mp3"));
        let second = FakeElement::pending(10.0);
        controller.bind(Rc::clone(&second));
        assert_eq!(controller.media().map(ActiveMedia::kind), Some(MediaKind::Audio));
        assert!((second.rate.get() - 2.0).abs() < f64::EPSILON);
        assert!((second.volume.get() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn volume_is_clamped_and_bad_rates_ignored() {
        let (mut controller, _) = controller();
        controller.set_volume(3.0);
        assert!((controller.settings().volume - 1.0).abs() < f64::EPSILON);
        controller.set_volume(-1.0);
        assert!(controller.settings().volume.abs() < f64::EPSILON);
        controller.set_playback_rate(0.0);
        controller.set_playback_rate(f64::NAN);
        assert!((controller.settings().rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn seek_is_passed_through_unvalidated() {
        let (mut controller, _) = controller();
        controller.select_lesson(lesson(1, "video", "/v.mp4"));
        let element = FakeElement::pending(10.0);
        controller.bind(Rc::clone(&element));
        controller.seek(9_999.0);
        assert!((element.time.get() - 9_999.0).abs() < f64::EPSILON);
    }

    #[test]
    fn documents_are_never_bound() {
        let (mut controller, _) = controller();
        assert!(!controller.bind(FakeElement::pending(1.0)));
        controller.select_lesson(lesson(3, "pdf", "/notes.pdf"));
        assert!(!controller.bind(FakeElement::pending(1.0)));
        assert!(controller.media().is_none());
        controller.toggle_play();
        assert_eq!(controller.phase(), PlaybackPhase::Loading);
    }

    #[test]
    fn position_sync_reads_the_bound_element() {
        let (mut controller, storage) = controller();
        controller.sync_position();
        controller.select_lesson(lesson(5, "audio", "/s.mp3"));
        let element = FakeElement::pending(50.0);
        controller.bind(Rc::clone(&element));
        element.loaded.set(true);
        controller.on_ready();
        element.time.set(12.5);
        controller.sync_position();
        assert!((controller.snapshot().current_time - 12.5).abs() < f64::EPSILON);
        assert_eq!(storage.get(&resume_key("/s.mp3")).as_deref(), Some("12.5"));

        element.time.set(f64::NAN);
        controller.sync_position();
        assert_eq!(storage.get(&resume_key("/s.mp3")).as_deref(), Some("12.5"));
    }

    #[test]
    fn rebinding_a_loaded_element_keeps_saving_progress() {
        let (mut controller, storage) = controller();
        let original = lesson(4, "video", "/r.mp4");
        controller.select_lesson(original.clone());
        let element = FakeElement::pending(300.0);
        controller.bind(Rc::clone(&element));
        element.loaded.set(true);
        controller.on_ready();
        controller.toggle_play();
        element.time.set(10.0);
        controller.sync_position();
        assert_eq!(storage.get(&resume_key("/r.mp4")).as_deref(), Some("10"));

        // Same file after a rescan renumbered it; the element keeps its metadata.
        controller.select_lesson(LessonNode {
            order: 7,
            ..original
        });
        assert!(controller.bind(Rc::clone(&element)));
        assert_eq!(controller.phase(), PlaybackPhase::Playing);
        assert!((element.time.get() - 10.0).abs() < f64::EPSILON);

        element.time.set(42.0);
        controller.sync_position();
        assert_eq!(storage.get(&resume_key("/r.mp4")).as_deref(), Some("42"));
    }
}
