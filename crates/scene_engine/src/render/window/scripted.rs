//! Headless window driven by an input script
//!
//! Used for the null and software device types. Each call to `pump_events`
//! advances one frame of the [`InputScript`]; the window closes when the
//! script runs out.

use crate::input::{InputFrame, InputScript};
use crate::render::window::backend::{WindowBackend, WindowError, WindowResult};

/// Scripted, invisible window
#[derive(Debug)]
pub struct ScriptedWindow {
    frames: std::vec::IntoIter<InputFrame>,
    current: Option<InputFrame>,
    size: (u32, u32),
    presented_frames: u64,
    last_labels: Vec<String>,
}

impl ScriptedWindow {
    /// Create a window of the given size playing back `script`
    pub fn new(script: InputScript, width: u32, height: u32) -> Self {
        log::debug!("Scripted window {}x{} with {} frames", width, height, script.len());
        Self {
            frames: script.frames.into_iter(),
            current: None,
            size: (width, height),
            presented_frames: 0,
            last_labels: Vec::new(),
        }
    }

    /// Number of frames presented so far
    pub fn presented_frames(&self) -> u64 {
        self.presented_frames
    }

    /// Labels of the most recently presented frame
    pub fn last_labels(&self) -> &[String] {
        &self.last_labels
    }
}

impl WindowBackend for ScriptedWindow {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn pump_events(&mut self) -> bool {
        self.current = self.frames.next();
        self.current.is_some()
    }

    fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(|frame| frame.active)
    }

    fn cursor_position(&self) -> Option<(f64, f64)> {
        self.current.as_ref().and_then(|frame| frame.cursor)
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn begin_frame(&mut self) -> WindowResult<()> {
        match &self.current {
            Some(frame) if frame.device_lost => Err(WindowError::DeviceLost),
            _ => Ok(()),
        }
    }

    fn present(&mut self, labels: &[String]) -> WindowResult<()> {
        self.presented_frames += 1;
        if labels != self.last_labels.as_slice() {
            log::debug!("Frame {}: labels {:?}", self.presented_frames, labels);
            self.last_labels = labels.to_vec();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plays_frames_then_closes() {
        let script = InputScript::new(vec![InputFrame::at(10.0, 20.0), InputFrame::inactive()]);
        let mut window = ScriptedWindow::new(script, 800, 600);

        assert!(window.pump_events());
        assert!(window.is_active());
        assert_eq!(window.cursor_position(), Some((10.0, 20.0)));

        assert!(window.pump_events());
        assert!(!window.is_active());
        assert_eq!(window.cursor_position(), None);

        assert!(!window.pump_events());
    }

    #[test]
    fn test_device_loss_fails_begin_frame() {
        let script = InputScript::new(vec![InputFrame::at(1.0, 1.0).with_device_lost()]);
        let mut window = ScriptedWindow::new(script, 800, 600);
        window.pump_events();

        assert!(matches!(window.begin_frame(), Err(WindowError::DeviceLost)));
    }

    #[test]
    fn test_present_remembers_labels() {
        let mut window = ScriptedWindow::new(InputScript::default(), 800, 600);
        window.present(&["Reksio".to_string()]).unwrap();

        assert_eq!(window.presented_frames(), 1);
        assert_eq!(window.last_labels(), ["Reksio"]);
    }
}
