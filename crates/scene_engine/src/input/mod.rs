//! Pointer input and scripted input playback

pub mod picking;
pub mod script;

pub use picking::{Laser, MouseState};
pub use script::{InputFrame, InputScript};
