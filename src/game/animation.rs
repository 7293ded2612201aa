//! Sprite Animation
//!
//! Spritesheets are horizontal strips of fixed-size cells. A `Clip` names a
//! texture key plus a frame range and rate; the `AnimationPlayer` advances
//! the current clip by wall-clock delta, either looping (idle/walk) or
//! one-shot (attack/death). Clips are plain data so enemy definitions can
//! ship in the wave config file.

use macroquad::math::Rect;
use serde::{Deserialize, Serialize};

/// One animation: a frame range on a spritesheet strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Texture key in the asset store
    pub texture: String,
    /// Cell width in pixels
    pub frame_w: f32,
    /// Cell height in pixels
    pub frame_h: f32,
    /// First frame index (inclusive)
    pub start: u32,
    /// Last frame index (inclusive)
    pub end: u32,
    /// Frames per second
    pub fps: f32,
}

impl Clip {
    pub fn new(texture: &str, frame_w: f32, frame_h: f32, start: u32, end: u32, fps: f32) -> Self {
        Self {
            texture: texture.to_string(),
            frame_w,
            frame_h,
            start,
            end,
            fps,
        }
    }

    /// Number of frames in the clip
    pub fn frame_count(&self) -> u32 {
        self.end.saturating_sub(self.start) + 1
    }

    /// Wall-clock duration of one playthrough in seconds
    pub fn duration(&self) -> f32 {
        self.frame_count() as f32 / self.fps.max(1.0)
    }

    /// Source rect on the strip for a clip-relative frame index
    pub fn source_rect(&self, frame: u32) -> Rect {
        let absolute = self.start + frame.min(self.frame_count() - 1);
        Rect::new(absolute as f32 * self.frame_w, 0.0, self.frame_w, self.frame_h)
    }
}

/// Playback state over a `Clip`
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clip: Clip,
    looped: bool,
    /// Clip-relative frame cursor
    frame: u32,
    /// Time accumulated toward the next frame advance
    elapsed: f32,
    finished: bool,
}

impl AnimationPlayer {
    pub fn new(clip: Clip, looped: bool) -> Self {
        Self {
            clip,
            looped,
            frame: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Switch to a new clip, resetting the frame cursor to 0.
    ///
    /// Always resets, even for the same clip: state transitions must never
    /// show a stale frame (a one-frame flash of the previous pose).
    pub fn play(&mut self, clip: Clip, looped: bool) {
        self.clip = clip;
        self.looped = looped;
        self.frame = 0;
        self.elapsed = 0.0;
        self.finished = false;
    }

    /// Advance playback by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.finished {
            return;
        }
        self.elapsed += dt;
        let frame_time = 1.0 / self.clip.fps.max(1.0);
        while self.elapsed >= frame_time {
            self.elapsed -= frame_time;
            if self.frame + 1 < self.clip.frame_count() {
                self.frame += 1;
            } else if self.looped {
                self.frame = 0;
            } else {
                // Hold the last frame of one-shot clips (death pose stays)
                self.finished = true;
                break;
            }
        }
    }

    /// Has a one-shot clip played through? Looping clips never finish.
    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    /// Clip-relative frame currently shown
    pub fn current_frame(&self) -> u32 {
        self.frame
    }

    /// Source rect for the frame currently shown
    pub fn source_rect(&self) -> Rect {
        self.clip.source_rect(self.frame)
    }
}

/// The set of clips an actor switches between, one per action state.
///
/// Optional slots fall back: no run clip plays the walk clip, no cast or
/// block clip plays idle. Enemies only carry the four the wave configs
/// define.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipSet {
    pub idle: Clip,
    pub walk: Clip,
    pub run: Option<Clip>,
    pub attack: Clip,
    pub cast: Option<Clip>,
    pub block: Option<Clip>,
    pub dead: Clip,
}

impl ClipSet {
    pub fn run_or_walk(&self) -> Clip {
        self.run.clone().unwrap_or_else(|| self.walk.clone())
    }

    pub fn cast_or_idle(&self) -> Clip {
        self.cast.clone().unwrap_or_else(|| self.idle.clone())
    }

    pub fn block_or_idle(&self) -> Clip {
        self.block.clone().unwrap_or_else(|| self.idle.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(start: u32, end: u32, fps: f32) -> Clip {
        Clip::new("test_sheet", 128.0, 71.0, start, end, fps)
    }

    #[test]
    fn test_source_rect_offsets_by_start() {
        let c = clip(4, 9, 8.0);
        let src = c.source_rect(0);
        assert_eq!(src.x, 4.0 * 128.0);
        assert_eq!(src.w, 128.0);
        assert_eq!(src.h, 71.0);
    }

    #[test]
    fn test_looping_wraps() {
        let mut player = AnimationPlayer::new(clip(0, 2, 10.0), true);
        // 3 frames at 10 fps: after 0.35s we should have wrapped to frame 0
        player.update(0.35);
        assert_eq!(player.current_frame(), 0);
        assert!(!player.finished());
    }

    #[test]
    fn test_one_shot_holds_last_frame() {
        let mut player = AnimationPlayer::new(clip(0, 3, 10.0), false);
        player.update(1.0);
        assert!(player.finished());
        assert_eq!(player.current_frame(), 3);

        // Further updates keep the pose
        player.update(1.0);
        assert_eq!(player.current_frame(), 3);
    }

    #[test]
    fn test_play_resets_cursor() {
        let mut player = AnimationPlayer::new(clip(0, 5, 10.0), true);
        player.update(0.25);
        assert!(player.current_frame() > 0);

        player.play(clip(0, 5, 10.0), true);
        assert_eq!(player.current_frame(), 0);
    }

    #[test]
    fn test_duration() {
        let c = clip(0, 5, 12.0);
        assert!((c.duration() - 0.5).abs() < 1e-6);
    }
}
