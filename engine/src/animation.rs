//! Animation playback
//!
//! The controller only starts, pauses and resumes one looping locomotion clip.
//! Keyframe data is the renderer's business; here a clip is a name and a length.

/// A named, looping animation clip.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Length in seconds
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// Playback state of a clip bound to a character.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipAction {
    clip: AnimationClip,
    time: f32,
    playing: bool,
    paused: bool,
}

impl ClipAction {
    /// Bind a clip. Not playing until [`ClipAction::play`] is called.
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            time: 0.0,
            playing: false,
            paused: false,
        }
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Start playback from the current time.
    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Playing and not paused.
    pub fn is_running(&self) -> bool {
        self.playing && !self.paused
    }

    /// Current playback time within `[0, duration)`.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance playback, looping at the clip end.
    pub fn update(&mut self, dt: f32) {
        if !self.is_running() || dt <= 0.0 {
            return;
        }
        self.time += dt;
        if self.clip.duration > 0.0 {
            self.time = self.time.rem_euclid(self.clip.duration);
        } else {
            self.time = 0.0;
        }
    }
}
