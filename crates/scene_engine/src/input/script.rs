//! Recorded input for the headless window
//!
//! An [`InputScript`] is the complete input of a headless run: one entry per
//! frame. The run ends when the script is exhausted, the same way a desktop
//! run ends when the window is closed.
//!
//! ```ron
//! (
//!     frames: [
//!         (cursor: Some((412.0, 300.0))),
//!         (cursor: None, active: false),
//!         (cursor: Some((100.0, 120.0)), device_lost: true),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::config::Config;

const fn default_active() -> bool {
    true
}

/// Input state for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Cursor position in window pixels; `None` when outside the window
    #[serde(default)]
    pub cursor: Option<(f64, f64)>,

    /// Whether the window has focus and is not minimized
    #[serde(default = "default_active")]
    pub active: bool,

    /// Simulate losing the rendering device on this frame
    #[serde(default)]
    pub device_lost: bool,
}

impl InputFrame {
    /// Active frame with the cursor at `(x, y)`
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            cursor: Some((x, y)),
            active: true,
            device_lost: false,
        }
    }

    /// Active frame with the cursor outside the window
    pub fn no_cursor() -> Self {
        Self {
            cursor: None,
            active: true,
            device_lost: false,
        }
    }

    /// Frame during which the window is inactive
    pub fn inactive() -> Self {
        Self {
            cursor: None,
            active: false,
            device_lost: false,
        }
    }

    /// Same frame, with the device lost
    pub fn with_device_lost(mut self) -> Self {
        self.device_lost = true;
        self
    }
}

/// Ordered frames of scripted input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    /// Frames in playback order
    pub frames: Vec<InputFrame>,
}

impl Config for InputScript {}

impl InputScript {
    /// Script from explicit frames
    pub fn new(frames: Vec<InputFrame>) -> Self {
        Self { frames }
    }

    /// Append `count` copies of `frame`
    pub fn hold(mut self, frame: InputFrame, count: usize) -> Self {
        self.frames.extend(std::iter::repeat(frame).take(count));
        self
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when the script has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
