//! Whole runs against a temporary media directory and scripted input

use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use picker_app::avatars::{self, AVATARS};
use picker_app::{AppConfig, ErrorKind, InputSource, Session};
use scene_engine::config::Config;
use scene_engine::diagnostics::{Counters, ResourceKind};
use scene_engine::foundation::math::Vec3;
use scene_engine::input::{InputFrame, InputScript};
use scene_engine::{DeviceType, EngineError};
use tempfile::TempDir;

/// Media directory with the font and all four models, deleted on drop
fn media_dir() -> TempDir {
    let media = tempfile::tempdir().unwrap();
    image::RgbaImage::new(64, 64).save(media.path().join("fontlucida.png")).unwrap();
    for avatar in AVATARS {
        std::fs::write(media.path().join(avatar.kind.model_file()), b"model").unwrap();
    }
    media
}

fn headless(media: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.engine.media_path = media.to_path_buf();
    config.engine.device = DeviceType::Null;
    config.engine.idle_sleep_ms = 0;
    config
}

fn releases(counters: &Counters) -> Vec<(ResourceKind, String)> {
    counters.releases().into_iter().map(|record| (record.kind, record.label)).collect()
}

/// Object releases for `names` created in this order, newest first
fn objects(names: &[&str]) -> Vec<(ResourceKind, String)> {
    names.iter().rev().map(|name| (ResourceKind::Object, name.to_string())).collect()
}

/// Script that keeps the cursor over the first swept avatar
fn hover_first_avatar(media: &Path, config: &mut AppConfig, frames: usize) {
    let sweep = avatars::sweep_script(&config.camera, &config.engine.window);
    let over_maja = sweep.frames.iter().find(|frame| frame.cursor.is_some()).cloned().unwrap();
    let script = InputScript::default().hold(over_maja, frames).hold(InputFrame::no_cursor(), 1);
    let script_path = media.join("hover.ron");
    script.save_to_file(&script_path).unwrap();
    config.input = InputSource::Script(script_path);
}

#[test]
fn test_sweep_selects_every_avatar_in_order() {
    let counters = Counters::new();
    let media = media_dir();
    let config = headless(media.path());

    let outcome = picker_app::run(&config, &counters);

    let summary = outcome.unwrap();
    assert_eq!(summary.selected, ["Maja", "Jacek", "Placek", "Reksio"]);
    assert_eq!(summary.idle_frames, 2);
    assert!(summary.rendered_frames > 0);
    assert!(counters.validate());
    assert_eq!(picker_app::finish(&Ok(summary), &counters), 0);

    let mut expected = vec![(ResourceKind::Camera, "camera".to_string())];
    expected.extend(objects(&["Maja", "Jacek", "Placek", "Reksio"]));
    expected.push((ResourceKind::Engine, "engine".to_string()));
    assert_eq!(releases(&counters), expected);
}

#[test]
fn test_avatars_are_placed_as_listed() {
    let counters = Counters::new();
    let media = media_dir();
    let config = headless(media.path());

    let mut session = Session::start(&config, &counters).unwrap();
    session.setup_camera(&config.camera).unwrap();
    session.populate().unwrap();

    let scene = session.engine().scene();
    assert_eq!(scene.len(), 4);
    for avatar in AVATARS {
        let id = scene.find_by_name(avatar.name).unwrap();
        let object = scene.get(id).unwrap();
        assert_eq!(object.kind(), avatar.kind);
        assert!(object.is_pickable());
        assert_relative_eq!(object.position(), Vec3::from(avatar.position));
        match avatar.rotation {
            Some(rotation) => assert_relative_eq!(object.rotation().unwrap(), Vec3::from(rotation)),
            None => assert!(object.rotation().is_none()),
        }
    }

    let jacek = scene.get(scene.find_by_name("Jacek").unwrap()).unwrap();
    assert_eq!(jacek.rotation(), Some(Vec3::new(0.0, 90.0, 0.0)));
    let placek = scene.get(scene.find_by_name("Placek").unwrap()).unwrap();
    assert_eq!(placek.rotation(), Some(Vec3::new(0.0, -90.0, 0.0)));

    let camera = session.engine().camera().unwrap();
    assert_relative_eq!(camera.position, Vec3::new(50.0, 50.0, -60.0));
    assert_relative_eq!(camera.target, Vec3::new(-70.0, 30.0, -60.0));

    drop(session);
    assert!(counters.validate());
}

#[test]
fn test_engine_failure_skips_everything_and_exits_with_one() {
    let counters = Counters::new();
    let media = media_dir();
    let config = headless(&media.path().join("missing"));

    let outcome = picker_app::run(&config, &counters);

    let error = outcome.as_ref().unwrap_err();
    assert!(error.is_invalid_asset_path());
    assert_eq!(error.context(), ["engine initialization failed"]);
    assert!(error.render().contains("check that the avatar asset files are installed"));
    assert!(counters.releases().is_empty());
    assert!(counters.validate());
    assert_eq!(picker_app::finish(&outcome, &counters), 1);
}

#[test]
fn test_camera_failure_releases_camera_then_engine() {
    let counters = Counters::new();
    let media = media_dir();
    let mut config = headless(media.path());
    config.camera.target = config.camera.position;

    let error = picker_app::run(&config, &counters).unwrap_err();

    assert!(matches!(error.kind(), ErrorKind::Engine(EngineError::DegenerateCamera { .. })));
    assert_eq!(
        releases(&counters),
        vec![
            (ResourceKind::Camera, "camera".to_string()),
            (ResourceKind::Engine, "engine".to_string()),
        ]
    );
    assert!(counters.validate());
}

#[test]
fn test_object_failure_at_each_position() {
    for failing in 0..AVATARS.len() {
        let counters = Counters::new();
        let media = media_dir();
        std::fs::remove_file(media.path().join(AVATARS[failing].kind.model_file())).unwrap();

        let error = picker_app::run(&headless(media.path()), &counters).unwrap_err();

        assert!(error.is_invalid_asset_path(), "avatar #{}", failing + 1);
        assert_eq!(
            error.context(),
            [
                "scene population failed".to_string(),
                format!("{} object creation failed", AVATARS[failing].name),
            ]
        );

        let created: Vec<&str> = AVATARS[..failing].iter().map(|avatar| avatar.name).collect();
        let mut expected = vec![(ResourceKind::Camera, "camera".to_string())];
        expected.extend(objects(&created));
        expected.push((ResourceKind::Engine, "engine".to_string()));
        assert_eq!(releases(&counters), expected, "avatar #{}", failing + 1);
        assert_eq!(counters.tally(ResourceKind::Selector).acquired, failing as u64);
        assert!(counters.validate());
    }
}

#[test]
fn test_device_loss_mid_loop_releases_held_selection() {
    let counters = Counters::new();
    let media = media_dir();
    let mut config = headless(media.path());

    let sweep = avatars::sweep_script(&config.camera, &config.engine.window);
    let over_maja = sweep.frames.iter().find(|frame| frame.cursor.is_some()).cloned().unwrap();
    let script = InputScript::default()
        .hold(over_maja.clone(), 3)
        .hold(over_maja.with_device_lost(), 1)
        .hold(InputFrame::no_cursor(), 5);
    let script_path = media.path().join("device_lost.ron");
    script.save_to_file(&script_path).unwrap();
    config.input = InputSource::Script(script_path);

    let error = picker_app::run(&config, &counters).unwrap_err();

    assert!(matches!(error.kind(), ErrorKind::Engine(EngineError::DeviceLost)));
    assert_eq!(error.context(), ["frame 4 failed"]);

    let mut expected = vec![(ResourceKind::Camera, "camera".to_string())];
    expected.extend(objects(&["Maja", "Jacek", "Placek", "Reksio"]));
    expected.push((ResourceKind::Engine, "engine".to_string()));
    assert_eq!(releases(&counters), expected);

    // camera, held selection, four objects, engine: consecutive releases
    let camera = counters.tally(ResourceKind::Camera).last_release;
    assert_eq!(counters.tally(ResourceKind::Selection).last_release, camera + 1);
    assert_eq!(counters.tally(ResourceKind::Object).last_release, camera + 5);
    assert_eq!(counters.tally(ResourceKind::Engine).last_release, camera + 6);
    assert!(counters.validate());
}

#[test]
fn test_hovering_does_not_grow_the_release_journal() {
    let mut journal_lengths = Vec::new();
    let mut report_lengths = Vec::new();
    for frames in [10, 500] {
        let counters = Counters::new();
        let media = media_dir();
        let mut config = headless(media.path());
        hover_first_avatar(media.path(), &mut config, frames);

        let summary = picker_app::run(&config, &counters).unwrap();

        assert_eq!(summary.selected, ["Maja"]);
        assert_eq!(counters.tally(ResourceKind::Selection).released, frames as u64);
        assert!(counters.validate());
        journal_lengths.push(counters.releases().len());
        report_lengths.push(counters.report(true).to_string().lines().count());
    }

    assert_eq!(journal_lengths, [6, 6]);
    assert_eq!(report_lengths[0], report_lengths[1]);
}

#[test]
fn test_missing_script_is_a_config_error() {
    let counters = Counters::new();
    let media = media_dir();
    let mut config = headless(media.path());
    config.input = InputSource::Script(PathBuf::from("/nonexistent/input.ron"));

    let error = picker_app::run(&config, &counters).unwrap_err();

    assert!(matches!(error.kind(), ErrorKind::Config(_)));
    assert!(counters.releases().is_empty());
}

#[test]
fn test_at_most_one_avatar_is_highlighted() {
    let counters = Counters::new();
    let media = media_dir();
    let mut config = headless(media.path());

    let sweep = avatars::sweep_script(&config.camera, &config.engine.window);
    let hovers: Vec<InputFrame> = sweep.frames.into_iter().filter(|frame| frame.cursor.is_some()).collect();
    let over_jacek = hovers[4].clone();
    let over_reksio = hovers[12].clone();
    let script = InputScript::default().hold(over_jacek, 2).hold(over_reksio, 2);
    let script_path = media.path().join("highlight.ron");
    script.save_to_file(&script_path).unwrap();
    config.input = InputSource::Script(script_path);

    let mut session = Session::start(&config, &counters).unwrap();
    session.setup_camera(&config.camera).unwrap();
    session.populate().unwrap();
    let summary = session.render_loop().unwrap();

    assert_eq!(summary.selected, ["Jacek", "Reksio"]);
    let scene = session.engine().scene();
    assert_eq!(scene.highlighted_count(), 1);
    let reksio = scene.get(scene.find_by_name("Reksio").unwrap()).unwrap();
    assert!(reksio.is_highlighted());

    drop(session);
    assert!(counters.validate());
}
