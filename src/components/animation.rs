//! Animation timeline state.
//!
//! An [`Animator`] keeps one entity's displayed animation tag in sync with
//! game time. Behavior systems say *what* to show through an
//! [`AnimationRequest`]; the [`animation`](crate::systems::animation::animation)
//! system calls [`Animator::play`] once per frame with that request and turns
//! the result into an [`AnimationFrame`](crate::events::animation::AnimationFrame)
//! message.
//!
//! # Timeline rules
//!
//! - Requesting the tag that is already playing never restarts it.
//! - Completion is checked before a tag change, against the previous tag's
//!   duration, looking one frame ahead (`elapsed + dt >= duration`) so that a
//!   duration falling between two frames is not missed.
//! - A duration of `0` (unknown tag) never completes.
//! - Non-looping playback freezes on `duration - 1` ms; playing exactly
//!   `duration` would show the first frame again.
//! - Elapsed time `0` is reported as `1`, since time zero renders the last
//!   frame of a tag.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::prelude::Component;

use crate::events::animation::RenderLayer;
use crate::resources::spritesheetstore::SpriteSheetStore;

/// Completion callback. Runs at most once per tag activation.
pub type FinishCallback = Arc<dyn Fn() + Send + Sync>;

/// Playback options captured when a tag starts.
#[derive(Clone, Default)]
pub struct AnimationConfig {
    /// `Some(false)` freezes on the last frame; `None` and `Some(true)` loop.
    pub looped: Option<bool>,
    pub on_finish: Option<FinishCallback>,
}

impl AnimationConfig {
    pub fn looping() -> Self {
        Self {
            looped: Some(true),
            on_finish: None,
        }
    }

    pub fn once() -> Self {
        Self {
            looped: Some(false),
            on_finish: None,
        }
    }

    pub fn on_finish(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_finish = Some(Arc::new(callback));
        self
    }

    fn freezes(&self) -> bool {
        self.looped == Some(false)
    }
}

impl fmt::Debug for AnimationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationConfig")
            .field("looped", &self.looped)
            .field("on_finish", &self.on_finish.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    /// Current tag; empty until the first `play`.
    pub tag: String,
    /// Game time in milliseconds at which `tag` started.
    pub start: f32,
    /// Duration of `tag` in milliseconds, `0` when unknown.
    pub duration: f32,
    pub finished: bool,
    pub config: AnimationConfig,
    pub direction: i8,
}

/// Game clock sample handed to [`Animator::play`], in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClock {
    pub now_ms: f32,
    pub delta_ms: f32,
}

/// Result of one [`Animator::play`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedFrame {
    pub tag: String,
    pub elapsed_ms: f32,
    pub direction: i8,
    /// Tag that completed during this call, if any.
    pub finished_tag: Option<String>,
}

/// Per-entity animation player bound to a sprite sheet.
#[derive(Component, Debug, Clone, Default)]
pub struct Animator {
    /// Key into [`SpriteSheetStore`]. `None` makes `play` a no-op.
    pub sheet: Option<String>,
    pub layer: RenderLayer,
    pub state: AnimationState,
}

impl Animator {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: Some(sheet.into()),
            ..Self::default()
        }
    }

    pub fn assign_sheet(&mut self, sheet: impl Into<String>) {
        self.sheet = Some(sheet.into());
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    /// Advance the timeline for this frame and compute the time to draw.
    ///
    /// Returns `None`, without touching any state, when no sprite sheet is
    /// bound or the bound sheet is not registered.
    pub fn play(
        &mut self,
        tag: &str,
        direction: i8,
        config: &AnimationConfig,
        clock: AnimationClock,
        sheets: &SpriteSheetStore,
    ) -> Option<PlayedFrame> {
        let sheet = sheets.get(self.sheet.as_deref()?)?;
        let state = &mut self.state;

        state.direction = direction;

        let mut finished_tag = None;
        if !state.finished && state.duration > 0.0 {
            let elapsed = clock.now_ms - state.start;
            if elapsed + clock.delta_ms >= state.duration {
                state.finished = true;
                finished_tag = Some(state.tag.clone());
                if let Some(callback) = &state.config.on_finish {
                    callback();
                }
            }
        }

        if state.tag != tag {
            state.tag = tag.to_string();
            state.start = clock.now_ms;
            state.finished = false;
            state.duration = sheet.duration(tag).unwrap_or(0.0);
            state.config = config.clone();
        }

        let mut elapsed = clock.now_ms - state.start;
        if config.freezes() {
            elapsed = elapsed.min(state.duration - 1.0);
        }
        if elapsed == 0.0 {
            elapsed += 1.0;
        }

        Some(PlayedFrame {
            tag: state.tag.clone(),
            elapsed_ms: elapsed,
            direction: state.direction,
            finished_tag,
        })
    }
}

/// The tag a behavior wants shown this frame.
#[derive(Component, Debug, Clone)]
pub struct AnimationRequest {
    pub tag: String,
    pub config: AnimationConfig,
}

impl AnimationRequest {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            config: AnimationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnimationConfig) -> Self {
        self.config = config;
        self
    }

    /// Change the requested tag; the config is kept.
    pub fn set_tag(&mut self, tag: &str) {
        if self.tag != tag {
            self.tag = tag.to_string();
        }
    }
}
