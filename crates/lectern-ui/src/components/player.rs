//! Lesson player with custom controls.
//!
//! # Design
//! - The controller lives in a `use_mut_ref` so media events never re-create it;
//!   a snapshot in state drives re-rendering.
//! - The media element is keyed by lesson id. Selection is keyed by id and file
//!   path, so a refetched tree that only renumbers or retitles the lesson keeps
//!   the binding; a re-bind of an already loaded element resumes at once.

use crate::core::format::progress_label;
use crate::core::playback::{PLAYBACK_RATES, PlaybackSnapshot, ResumeStore};
use crate::services::media::BrowserPlayback;
use crate::app::SessionCtx;
use crate::services::storage::BrowserStore;
use lectern_api_models::{LessonNode, MediaKind};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlInputElement, HtmlMediaElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct LessonPlayerProps {
    pub lesson: LessonNode,
    pub source: String,
    pub can_previous: bool,
    pub can_next: bool,
    pub on_previous: Callback<()>,
    pub on_next: Callback<()>,
}

type SharedPlayback = Rc<RefCell<BrowserPlayback>>;

#[function_component(LessonPlayer)]
pub(crate) fn lesson_player(props: &LessonPlayerProps) -> Html {
    let session_ctx = use_context::<SessionCtx>();
    let controller: SharedPlayback = use_mut_ref(|| {
        let storage = session_ctx.map_or_else(BrowserStore::open, |ctx| ctx.storage);
        BrowserPlayback::new(ResumeStore::new(storage))
    });
    let snapshot = use_state_eq(|| controller.borrow().snapshot());
    let media_ref = use_node_ref();

    {
        let controller = controller.clone();
        let snapshot = snapshot.clone();
        let media_ref = media_ref.clone();
        let lesson = props.lesson.clone();
        use_effect_with_deps(
            move |_| {
                let mut playback = controller.borrow_mut();
                playback.select_lesson(lesson);
                if let Some(element) = media_ref.cast::<HtmlMediaElement>() {
                    playback.bind(element);
                }
                snapshot.set(playback.snapshot());
                || ()
            },
            (props.lesson.id, props.lesson.file_path.clone()),
        );
    }

    let on_event = |apply: fn(&mut BrowserPlayback, &HtmlMediaElement)| {
        media_callback::<Event>(&controller, &snapshot, &media_ref, apply)
    };
    let on_loaded = on_event(|playback, _| playback.on_ready());
    let on_time = on_event(|playback, _| playback.sync_position());
    let on_duration = on_event(|playback, element| playback.on_duration_change(element.duration()));
    let on_ended = on_event(|playback, _| playback.on_ended());

    let toggle = {
        let controller = controller.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |_: MouseEvent| {
            let mut playback = controller.borrow_mut();
            playback.toggle_play();
            snapshot.set(playback.snapshot());
        })
    };
    let on_seek = input_callback(&controller, &snapshot, |playback, value| {
        playback.seek(value);
    });
    let on_volume = input_callback(&controller, &snapshot, |playback, value| {
        playback.set_volume(value);
    });
    let on_rate = {
        let controller = controller.clone();
        let snapshot = snapshot.clone();
        Callback::from(move |event: Event| {
            let Some(select) = event.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            if let Ok(rate) = select.value().parse::<f64>() {
                let mut playback = controller.borrow_mut();
                playback.set_playback_rate(rate);
                snapshot.set(playback.snapshot());
            }
        })
    };

    let lesson = &props.lesson;
    let state = *snapshot;
    let key = lesson.id.to_string();
    let body = match lesson.media_kind() {
        MediaKind::Video => html! {
            <video key={key} ref={media_ref.clone()} class="media" src={props.source.clone()} preload="metadata"
                onloadedmetadata={on_loaded} ontimeupdate={on_time} ondurationchange={on_duration} onended={on_ended} />
        },
        MediaKind::Audio => html! {
            <audio key={key} ref={media_ref.clone()} class="media" src={props.source.clone()} preload="metadata"
                onloadedmetadata={on_loaded} ontimeupdate={on_time} ondurationchange={on_duration} onended={on_ended} />
        },
        MediaKind::Document => html! {
            <iframe key={key} class="document-viewer" src={props.source.clone()} title={lesson.title.clone()} />
        },
        MediaKind::Other => html! {
            <a class="download" href={props.source.clone()} download="">{"Download file"}</a>
        },
    };
    let controls = if lesson.media_kind().is_playable() {
        playback_controls(state, toggle, on_seek, on_volume, on_rate)
    } else {
        html! {}
    };

    let previous = props.on_previous.reform(|_: MouseEvent| ());
    let next = props.on_next.reform(|_: MouseEvent| ());

    html! {
        <section class="player">
            <h2>{lesson.title.clone()}</h2>
            {body}
            {controls}
            <div class="lesson-nav">
                <button class="ghost" disabled={!props.can_previous} onclick={previous}>{"Previous"}</button>
                <button class="ghost" disabled={!props.can_next} onclick={next}>{"Next"}</button>
            </div>
        </section>
    }
}

fn playback_controls(
    state: PlaybackSnapshot,
    toggle: Callback<MouseEvent>,
    on_seek: Callback<InputEvent>,
    on_volume: Callback<InputEvent>,
    on_rate: Callback<Event>,
) -> Html {
    let rate = state.settings.rate;
    html! {
        <div class="controls">
            <button class="solid" onclick={toggle}>{if state.is_playing() { "Pause" } else { "Play" }}</button>
            <input type="range" class="seek" min="0" step="1"
                max={state.duration.to_string()} value={state.current_time.to_string()} oninput={on_seek} />
            <span class="time">{progress_label(state.current_time, state.duration)}</span>
            <label class="volume">
                <span>{"Volume"}</span>
                <input type="range" min="0" max="1" step="0.05"
                    value={state.settings.volume.to_string()} oninput={on_volume} />
            </label>
            <select class="rate" onchange={on_rate}>
                {for PLAYBACK_RATES.iter().map(|option| html! {
                    <option value={option.to_string()} selected={(*option - rate).abs() < f64::EPSILON}>
                        {format!("{option}x")}
                    </option>
                })}
            </select>
        </div>
    }
}

fn media_callback<E: 'static>(
    controller: &SharedPlayback,
    snapshot: &UseStateHandle<PlaybackSnapshot>,
    media_ref: &NodeRef,
    apply: fn(&mut BrowserPlayback, &HtmlMediaElement),
) -> Callback<E> {
    let controller = controller.clone();
    let snapshot = snapshot.clone();
    let media_ref = media_ref.clone();
    Callback::from(move |_: E| {
        let Some(element) = media_ref.cast::<HtmlMediaElement>() else {
            return;
        };
        let mut playback = controller.borrow_mut();
        apply(&mut playback, &element);
        snapshot.set(playback.snapshot());
    })
}

fn input_callback(
    controller: &SharedPlayback,
    snapshot: &UseStateHandle<PlaybackSnapshot>,
    apply: fn(&mut BrowserPlayback, f64),
) -> Callback<InputEvent> {
    let controller = controller.clone();
    let snapshot = snapshot.clone();
    Callback::from(move |event: InputEvent| {
        let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
            return;
        };
        if let Ok(value) = input.value().parse::<f64>() {
            let mut playback = controller.borrow_mut();
            apply(&mut playback, value);
            snapshot.set(playback.snapshot());
        }
    })
}
