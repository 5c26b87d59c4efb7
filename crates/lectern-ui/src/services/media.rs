//! `HtmlMediaElement` binding for the playback controller.

use crate::core::playback::{MediaElement, PlaybackController};
use crate::services::storage::BrowserStore;
use gloo::console;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlMediaElement;

/// Controller type used by the player component.
pub(crate) type BrowserPlayback = PlaybackController<HtmlMediaElement, BrowserStore>;

impl MediaElement for HtmlMediaElement {
    fn is_paused(&self) -> bool {
        self.paused()
    }

    fn request_play(&self) {
        match self.play() {
            // Autoplay policies reject the promise rather than the call.
            Ok(promise) => yew::platform::spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    console::warn!(format!("playback refused: {err:?}"));
                }
            }),
            Err(err) => console::error!(format!("play failed: {err:?}")),
        }
    }

    fn request_pause(&self) {
        if let Err(err) = self.pause() {
            console::error!(format!("pause failed: {err:?}"));
        }
    }

    fn position(&self) -> f64 {
        self.current_time()
    }

    fn is_ready(&self) -> bool {
        self.ready_state() >= Self::HAVE_METADATA
    }

    fn seek_to(&self, seconds: f64) {
        self.set_current_time(seconds);
    }

    fn total_duration(&self) -> f64 {
        self.duration()
    }

    fn apply_volume(&self, volume: f64) {
        self.set_volume(volume);
    }

    fn apply_playback_rate(&self, rate: f64) {
        self.set_playback_rate(rate);
    }
}
