//! # Avatar Picker
//!
//! Four named avatars, a fixed camera and a render loop that highlights and
//! labels whichever avatar is under the mouse pointer. At exit the resource
//! counters are validated and printed.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod app_config;
pub mod avatars;
pub mod error;
pub mod selection;
pub mod session;

pub use app_config::{AppConfig, CameraConfig, InputSource};
pub use error::{AppError, Chain, Context, ErrorKind};
pub use session::{run, RunSummary, Session};

use scene_engine::Counters;

/// Report the outcome and the counters; returns the process exit status
///
/// The counter table is verbose when the run failed or the counters do not
/// balance.
pub fn finish(outcome: &Result<RunSummary, AppError>, counters: &Counters) -> u8 {
    let failed = match outcome {
        Ok(summary) => {
            log::info!(
                "Completed: {} frames rendered, {} idle, selected {:?}",
                summary.rendered_frames,
                summary.idle_frames,
                summary.selected
            );
            false
        }
        Err(error) => {
            log::error!("Run failed: {}", error);
            error.report();
            true
        }
    };

    let balanced = counters.validate();
    if !balanced {
        log::error!("Resource counters do not balance");
    }
    counters.print(failed || !balanced);

    if failed || !balanced {
        1
    } else {
        0
    }
}
