//! The four avatars and how they are placed

use scene_engine::prelude::*;
use scene_engine::input::MouseState;

use crate::app_config::CameraConfig;
use crate::error::{AppError, Context};

/// One row of the scene table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avatar {
    /// Model kind
    pub kind: AvatarKind,
    /// Display name, shown as the label when selected
    pub name: &'static str,
    /// World position
    pub position: [f32; 3],
    /// Euler rotation in degrees, if any
    pub rotation: Option<[f32; 3]>,
}

/// Scene contents, in creation order
pub const AVATARS: [Avatar; 4] = [
    Avatar {
        kind: AvatarKind::Faerie,
        name: "Maja",
        position: [-90.0, -15.0, -140.0],
        rotation: None,
    },
    Avatar {
        kind: AvatarKind::Ninja,
        name: "Jacek",
        position: [-75.0, -66.0, -80.0],
        rotation: Some([0.0, 90.0, 0.0]),
    },
    Avatar {
        kind: AvatarKind::Dwarf,
        name: "Placek",
        position: [-70.0, -66.0, -30.0],
        rotation: Some([0.0, -90.0, 0.0]),
    },
    Avatar {
        kind: AvatarKind::Yodan,
        name: "Reksio",
        position: [-90.0, -25.0, 20.0],
        rotation: None,
    },
];

/// Create every avatar, stopping at the first failure
///
/// Objects created before the failure stay in the engine.
pub fn populate(engine: &mut Engine) -> Result<Vec<ObjectId>, AppError> {
    AVATARS
        .iter()
        .map(|avatar| place(engine, avatar).with_context(|| format!("{} object creation failed", avatar.name)))
        .collect()
}

fn place(engine: &mut Engine, avatar: &Avatar) -> Result<ObjectId, EngineError> {
    let mut handle = ObjectHandle::create(engine, avatar.kind, avatar.name)?;
    Selector::new(&handle).register(&mut handle)?;

    let [x, y, z] = avatar.position;
    handle.set_position(x, y, z);
    if let Some([rx, ry, rz]) = avatar.rotation {
        handle.set_rotation(rx, ry, rz);
    }

    log::debug!("Placed {} '{}'", avatar.kind, avatar.name);
    Ok(handle.id())
}

/// Input that points at each avatar in turn
///
/// Each avatar is hovered for a few frames, with the cursor leaving the
/// window in between and one inactive stretch in the middle.
pub fn sweep_script(camera_config: &CameraConfig, window: &WindowConfig) -> InputScript {
    const HOVER_FRAMES: usize = 4;

    let mut camera = Camera::for_viewport(window.width, window.height);
    camera.set_position(camera_config.position());
    camera.set_target(camera_config.target());
    let mouse = MouseState::new(window.width, window.height);
    if !camera.has_valid_view() {
        log::warn!("Camera does not define a view; the sweep has no hover frames");
        return InputScript::default().hold(InputFrame::no_cursor(), 1);
    }

    let mut script = InputScript::default().hold(InputFrame::no_cursor(), 2);
    for (index, avatar) in AVATARS.iter().enumerate() {
        let [x, y, z] = avatar.position;
        let Some((ndc_x, ndc_y)) = camera.world_to_ndc(Vec3::new(x, y, z)) else {
            log::warn!("'{}' is behind the camera; not part of the sweep", avatar.name);
            continue;
        };
        let (screen_x, screen_y) = mouse.ndc_to_screen(ndc_x, ndc_y);
        script = script
            .hold(InputFrame::at(screen_x, screen_y), HOVER_FRAMES)
            .hold(InputFrame::no_cursor(), 1);
        if index == AVATARS.len() / 2 - 1 {
            script = script.hold(InputFrame::inactive(), 2);
        }
    }
    script
}
