//! One run of the demo, from bootstrap to shutdown
//!
//! A [`Session`] owns the engine for the duration of the run. However the run
//! ends, dropping the session releases the camera, then the held selection,
//! then the engine (which releases its objects before itself).

use scene_engine::{Counters, Engine, EngineError};

use crate::app_config::{AppConfig, CameraConfig};
use crate::avatars;
use crate::error::{AppError, Context};
use crate::selection::SelectionTracker;

/// What a completed run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames drawn while the window was active
    pub rendered_frames: u64,
    /// Frames yielded while the window was inactive
    pub idle_frames: u64,
    /// Names of the objects selected during the run, in order of first
    /// selection
    pub selected: Vec<String>,
}

/// Engine plus the state that has to be released before it
pub struct Session {
    engine: Engine,
    tracker: SelectionTracker,
}

impl Session {
    /// Bootstrap the engine
    pub fn start(config: &AppConfig, counters: &Counters) -> Result<Self, AppError> {
        let input = config.input_script().context("could not prepare input")?;
        let engine = Engine::new(config.engine.clone(), input, counters.clone())
            .context("engine initialization failed")?;

        Ok(Self {
            engine,
            tracker: SelectionTracker::new(),
        })
    }

    /// The running engine
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Create and aim the camera
    pub fn setup_camera(&mut self, config: &CameraConfig) -> Result<(), AppError> {
        let camera = self.engine.create_camera().context("camera creation failed")?;
        camera.set_position(config.position());
        camera.set_target(config.target());
        self.engine.validate_camera().context("camera creation failed")?;
        log::info!("Camera at {:?} looking at {:?}", config.position, config.target);
        Ok(())
    }

    /// Place the avatars
    pub fn populate(&mut self) -> Result<(), AppError> {
        let ids = avatars::populate(&mut self.engine).context("scene population failed")?;
        log::info!("Scene populated with {} avatars", ids.len());
        Ok(())
    }

    /// Run frames until the window closes
    ///
    /// A failing frame ends the loop with an error.
    pub fn render_loop(&mut self) -> Result<RunSummary, AppError> {
        let mut frame = 0u64;
        while self.engine.run() {
            frame += 1;
            if self.engine.window_active() {
                self.render_frame().with_context(|| format!("frame {} failed", frame))?;
            } else {
                self.engine.yield_now();
            }
        }

        Ok(self.summary())
    }

    fn render_frame(&mut self) -> Result<(), EngineError> {
        self.engine.begin_scene()?;
        let selected = self.engine.selected_object();
        self.tracker.update(&mut self.engine, selected)?;
        self.engine.end_scene()
    }

    fn summary(&self) -> RunSummary {
        let selected = self
            .tracker
            .visited()
            .iter()
            .filter_map(|id| self.engine.object(*id))
            .map(|object| object.name().to_string())
            .collect();

        RunSummary {
            rendered_frames: self.engine.timer().rendered_frames(),
            idle_frames: self.engine.timer().idle_frames(),
            selected,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.engine.destroy_camera() {
            log::debug!("Camera released");
        }
        if self.tracker.release() {
            log::debug!("Selection released");
        }
        log::info!("Shutting down engine");
    }
}

/// Bootstrap, set up the scene and run the render loop
pub fn run(config: &AppConfig, counters: &Counters) -> Result<RunSummary, AppError> {
    let mut session = Session::start(config, counters)?;
    session.setup_camera(&config.camera)?;
    session.populate()?;
    session.render_loop()
}
