//! Application errors
//!
//! An [`AppError`] is one [`ErrorKind`] plus the context messages added on
//! the way up, outermost first. [`AppError::render`] prints them as an
//! indented chain.

use std::fmt;
use std::path::{Path, PathBuf};

use scene_engine::config::ConfigError;
use scene_engine::EngineError;
use thiserror::Error;

/// What went wrong, independent of where
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// An asset file is missing under the media root
    #[error("Invalid asset path: {}", path.display())]
    InvalidAssetPath {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Any other engine failure
    #[error(transparent)]
    Engine(EngineError),

    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(ConfigError),
}

impl From<EngineError> for ErrorKind {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidAssetPath { path } => Self::InvalidAssetPath { path },
            EngineError::Config(error) => Self::Config(error),
            other => Self::Engine(other),
        }
    }
}

impl From<ConfigError> for ErrorKind {
    fn from(error: ConfigError) -> Self {
        Self::Config(error)
    }
}

/// Error with its chain of context messages
#[derive(Error, Debug)]
#[error("{kind}")]
pub struct AppError {
    kind: ErrorKind,
    context: Vec<String>,
}

impl AppError {
    /// Error without context
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: Vec::new(),
        }
    }

    /// Root cause category
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Context messages, outermost first
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Add an outer context message
    #[must_use]
    pub fn wrap(mut self, message: impl Into<String>) -> Self {
        self.context.insert(0, message.into());
        self
    }

    /// True when the root cause is a missing asset file
    pub fn is_invalid_asset_path(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidAssetPath { .. })
    }

    /// Printable chain, one level per line, plus a hint for missing assets
    pub fn chain(&self) -> Chain<'_> {
        Chain(self)
    }

    /// [`chain`](Self::chain) as a string
    pub fn render(&self) -> String {
        self.chain().to_string()
    }

    /// Write the rendered chain to stderr
    pub fn report(&self) {
        eprint!("error: {}", self.chain());
    }
}

/// Indented rendering of an [`AppError`], see [`AppError::chain`]
#[derive(Debug, Clone, Copy)]
pub struct Chain<'a>(&'a AppError);

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error = self.0;
        for (depth, message) in error.context.iter().enumerate() {
            writeln!(f, "{:indent$}{}", "", message, indent = depth * 2)?;
        }

        let mut depth = error.context.len();
        writeln!(f, "{:indent$}{}", "", error.kind, indent = depth * 2)?;
        let mut source = std::error::Error::source(&error.kind);
        while let Some(cause) = source {
            depth += 1;
            writeln!(f, "{:indent$}{}", "", cause, indent = depth * 2)?;
            source = cause.source();
        }

        if let ErrorKind::InvalidAssetPath { path } = &error.kind {
            let media_root = path.parent().unwrap_or_else(|| Path::new("."));
            writeln!(
                f,
                "hint: check that the avatar asset files are installed under {}",
                media_root.display()
            )?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for AppError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<EngineError> for AppError {
    fn from(error: EngineError) -> Self {
        Self::new(error.into())
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::new(error.into())
    }
}

/// Attach context to a failing result
pub trait Context<T> {
    /// Wrap the error with a fixed message
    fn context(self, message: impl Into<String>) -> Result<T, AppError>;

    /// Wrap the error with a lazily built message
    fn with_context<F: FnOnce() -> String>(self, message: F) -> Result<T, AppError>;
}

impl<T, E: Into<AppError>> Context<T> for Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|error| error.into().wrap(message))
    }

    fn with_context<F: FnOnce() -> String>(self, message: F) -> Result<T, AppError> {
        self.map_err(|error| error.into().wrap(message()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_model() -> Result<(), EngineError> {
        Err(EngineError::InvalidAssetPath {
            path: PathBuf::from("media/ninja.b3d"),
        })
    }

    #[test]
    fn test_context_is_outermost_first() {
        let error = missing_model()
            .context("Jacek object creation failed")
            .context("scene population failed")
            .unwrap_err();

        assert_eq!(error.context(), ["scene population failed", "Jacek object creation failed"]);
        assert!(error.is_invalid_asset_path());
    }

    #[test]
    fn test_render_indents_by_depth_and_adds_hint() {
        let error = missing_model().context("Jacek object creation failed").unwrap_err();

        let rendered = error.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Jacek object creation failed");
        assert_eq!(lines[1], "  Invalid asset path: media/ninja.b3d");
        assert_eq!(lines[2], "hint: check that the avatar asset files are installed under media");
    }

    #[test]
    fn test_other_engine_errors_have_no_hint() {
        let error = AppError::from(EngineError::DeviceLost).wrap("render loop aborted");

        assert!(!error.is_invalid_asset_path());
        assert!(!error.render().contains("hint:"));
        assert!(matches!(error.kind(), ErrorKind::Engine(EngineError::DeviceLost)));
    }

    #[test]
    fn test_config_errors_keep_their_kind() {
        let error = AppError::from(EngineError::Config(ConfigError::Invalid("zero width".to_string())));
        assert!(matches!(error.kind(), ErrorKind::Config(ConfigError::Invalid(_))));
    }
}
