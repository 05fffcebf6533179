    use std::f32::consts::FRAC_PI_2;

    use glam::Vec3;
    use map_engine::{
        Canvas, DrawCall, InputAction, InputSnapshot, RecordingRenderer, Renderer, Scene, Texture,
        Vec2, Viewport,
    };
    use serde_json::json;

    use super::avatar::{sprite_corners, wedge_points};
    use super::layout::{CampusLayout, Structure};
    use super::movement::{
        step_avatar, step_camera, AvatarState, CameraState, Facing, MoveKeys, SCENE_BOUNDS,
    };
    use super::{TopDownScene, WalkthroughScene};

    fn keys(forward: bool, back: bool, left: bool, right: bool) -> MoveKeys {
        MoveKeys {
            forward,
            back,
            left,
            right,
        }
    }

    fn snapshot_from_actions(actions: &[InputAction]) -> InputSnapshot {
        let mut snapshot = InputSnapshot::empty();
        for action in actions {
            snapshot = snapshot.with_action_down(*action, true);
        }
        snapshot
    }

    fn viewport() -> Viewport {
        Viewport {
            width: 800,
            height: 600,
        }
    }

    fn record(scene: &dyn Scene) -> Vec<DrawCall> {
        let mut recorder = RecordingRenderer::new(viewport());
        scene.render(&mut recorder);
        recorder.take_calls()
    }

    fn render_digest(scene: &dyn Scene) -> String {
        let mut canvas = Canvas::new(800, 600);
        canvas.clear([0, 0, 0, 255]);
        scene.render(&mut canvas);
        canvas.frame_digest()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn test_texture() -> Texture {
        Texture::from_rgba(
            2,
            2,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 255, 255,
            ],
        )
        .expect("texture")
    }

    #[test]
    fn forward_for_ten_ticks_moves_forty_pixels_up() {
        let mut avatar = AvatarState::spawn();
        assert_eq!(avatar.position, Vec2::new(400.0, 300.0));

        for _ in 0..10 {
            avatar = step_avatar(avatar, keys(true, false, false, false), SCENE_BOUNDS);
        }

        assert_eq!(avatar.position, Vec2::new(400.0, 260.0));
        assert_eq!(avatar.facing, Facing::Up);
        assert_eq!(avatar.facing.degrees(), 0);
    }

    #[test]
    fn left_at_left_bound_stays_clamped_and_turns_left() {
        let avatar = AvatarState::at(Vec2::new(24.0, 300.0), Facing::Up);
        let next = step_avatar(avatar, keys(false, false, true, false), SCENE_BOUNDS);

        assert_eq!(next.position, Vec2::new(24.0, 300.0));
        assert_eq!(next.facing.degrees(), 270);
    }

    #[test]
    fn opposite_keys_cancel_but_later_key_sets_facing() {
        let start = AvatarState::spawn();

        let vertical = step_avatar(start, keys(true, true, false, false), SCENE_BOUNDS);
        assert_eq!(vertical.position, start.position);
        assert_eq!(vertical.facing, Facing::Down);

        let horizontal = step_avatar(start, keys(false, false, true, true), SCENE_BOUNDS);
        assert_eq!(horizontal.position, start.position);
        assert_eq!(horizontal.facing, Facing::Right);
    }

    #[test]
    fn releasing_all_keys_keeps_position_and_facing() {
        let mut avatar = AvatarState::spawn();
        avatar = step_avatar(avatar, keys(false, true, false, false), SCENE_BOUNDS);
        let held = avatar;

        for _ in 0..5 {
            avatar = step_avatar(avatar, MoveKeys::default(), SCENE_BOUNDS);
        }

        assert_eq!(avatar, held);
        assert_eq!(avatar.facing.degrees(), 180);
    }

    #[test]
    fn diagonal_keys_combine_additively() {
        let avatar = step_avatar(
            AvatarState::spawn(),
            keys(true, false, false, true),
            SCENE_BOUNDS,
        );
        assert_eq!(avatar.position, Vec2::new(404.0, 296.0));
        assert_eq!(avatar.facing, Facing::Right);
    }

    #[test]
    fn holding_against_each_wall_stops_at_half_size() {
        let mut avatar = AvatarState::spawn();
        for _ in 0..200 {
            avatar = step_avatar(avatar, keys(false, true, false, true), SCENE_BOUNDS);
        }
        assert_eq!(avatar.position, Vec2::new(776.0, 576.0));

        for _ in 0..300 {
            avatar = step_avatar(avatar, keys(true, false, true, false), SCENE_BOUNDS);
        }
        assert_eq!(avatar.position, Vec2::new(24.0, 24.0));
    }

    #[test]
    fn position_stays_in_bounds_for_arbitrary_key_sequences() {
        let mut avatar = AvatarState::spawn();
        let mut seed: u32 = 0x1234_5678;

        for _ in 0..5_000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let bits = seed >> 28;
            avatar = step_avatar(
                avatar,
                keys(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0),
                SCENE_BOUNDS,
            );

            let half = avatar.half_size;
            assert!(avatar.position.x >= half && avatar.position.x <= SCENE_BOUNDS.x - half);
            assert!(avatar.position.y >= half && avatar.position.y <= SCENE_BOUNDS.y - half);
        }
    }

    #[test]
    fn move_keys_read_movement_actions_only() {
        let snapshot =
            snapshot_from_actions(&[InputAction::MoveBack]).with_dump_state_pressed(true);
        assert_eq!(
            MoveKeys::from_input(&snapshot),
            keys(false, true, false, false)
        );
    }

    #[test]
    fn top_down_scene_applies_held_input_each_tick() {
        let mut scene = TopDownScene::with_wedge();
        let forward = snapshot_from_actions(&[InputAction::MoveForward]);

        for _ in 0..10 {
            scene.update(&forward);
        }

        assert_eq!(scene.avatar().position, Vec2::new(400.0, 260.0));
        assert_eq!(
            scene.debug_lines(),
            vec!["POS: 400.0,260.0".to_string(), "FACING: 0".to_string()]
        );
    }

    #[test]
    fn facing_serializes_as_degrees() {
        assert_eq!(serde_json::to_value(Facing::Left).expect("json"), json!(270));
    }

    #[test]
    fn top_down_state_dump_is_tagged_json() {
        let scene = TopDownScene::with_wedge();
        let state = scene.debug_state().expect("state");

        assert_eq!(
            state,
            json!({
                "mode": "top_down",
                "position": { "x": 400.0, "y": 300.0 },
                "facing": 0,
                "speed": 4.0,
                "half_size": 24.0
            })
        );
    }

    #[test]
    fn camera_right_vector_is_unit_x() {
        let camera = CameraState::spawn();
        let right = camera.right();
        assert!(approx(right.length(), 1.0));
        assert!(approx(right.x, 1.0) && approx(right.y, 0.0) && approx(right.z, 0.0));
    }

    #[test]
    fn camera_forward_moves_along_negative_z() {
        let mut camera = CameraState::spawn();
        for _ in 0..5 {
            camera = step_camera(camera, keys(true, false, false, false));
        }

        assert!(approx(camera.position.x, 0.0));
        assert!(approx(camera.position.y, 1.0));
        assert!(approx(camera.position.z, 9.0));
    }

    #[test]
    fn camera_strafes_along_right_axis_and_ignores_bounds() {
        let mut camera = CameraState::spawn();
        for _ in 0..1_000 {
            camera = step_camera(camera, keys(false, false, false, true));
        }
        assert!((camera.position.x - 200.0).abs() < 0.05);
        assert!(approx(camera.position.z, 10.0));

        let cancelled = step_camera(camera, keys(true, true, true, true));
        assert!((cancelled.position - camera.position).length() < 1e-4);
    }

    #[test]
    fn walkthrough_scene_dumps_camera_state() {
        let mut scene = WalkthroughScene::new();
        scene.update(&snapshot_from_actions(&[InputAction::MoveLeft]));

        let p = scene.camera().position;
        assert!(approx(p.x, -0.2));
        assert_eq!(scene.camera().forward, Vec3::NEG_Z);

        let state = scene.debug_state().expect("state");
        assert_eq!(state["mode"], "walkthrough");
        assert_eq!(state["forward"], json!([0.0, 0.0, -1.0]));
        assert_eq!(state["up"], json!([0.0, 1.0, 0.0]));
    }

    #[test]
    fn campus_layout_is_identical_every_time() {
        assert_eq!(
            CampusLayout::campus(SCENE_BOUNDS),
            CampusLayout::campus(SCENE_BOUNDS)
        );
    }

    #[test]
    fn campus_has_expected_structures() {
        let layout = CampusLayout::campus(SCENE_BOUNDS);
        let structures = layout.structures();

        assert!(matches!(structures[0], Structure::Ground { .. }));
        assert!(matches!(structures[1], Structure::Wall { .. }));
        let trees = structures
            .iter()
            .filter(|s| matches!(s, Structure::Tree { .. }))
            .count();
        assert_eq!(trees, 6);
        let labels: Vec<&str> = structures
            .iter()
            .filter_map(Structure::label)
            .map(|(text, _)| text)
            .collect();
        assert_eq!(labels, ["BLOCK A", "BLOCK B", "CANTEEN", "CAR PARK"]);
    }

    #[test]
    fn teaching_blocks_are_mirror_images() {
        let layout = CampusLayout::campus(SCENE_BOUNDS);
        let blocks: Vec<_> = layout
            .structures()
            .iter()
            .filter_map(|s| match s {
                Structure::Building(b) if b.sign.is_none() => Some(b),
                _ => None,
            })
            .collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].body.x, SCENE_BOUNDS.x - blocks[1].body.right());
        assert_eq!(blocks[0].body.y, blocks[1].body.y);
        assert_eq!(blocks[0].windows, blocks[1].windows);

        let windows = blocks[0].windows.rects(blocks[0].body);
        assert_eq!(windows.len(), 12);
        let left_margin = windows[0].x - blocks[0].body.x;
        let right_margin = blocks[0].body.right() - windows[3].right();
        assert_eq!(left_margin, right_margin);

        let door = blocks[0].door.rect(blocks[0].body);
        assert_eq!(door.center().x, blocks[0].body.center().x);
        assert_eq!(door.bottom(), blocks[0].body.bottom());
    }

    #[test]
    fn car_park_dividers_are_evenly_spaced_inside() {
        let layout = CampusLayout::campus(SCENE_BOUNDS);
        let car_park = layout
            .structures()
            .iter()
            .find_map(|s| match s {
                Structure::CarPark(c) => Some(c),
                _ => None,
            })
            .expect("car park");

        let xs: Vec<f32> = car_park
            .divider_segments()
            .iter()
            .map(|(from, _)| from.x)
            .collect();
        assert_eq!(xs.len(), 5);
        for pair in xs.windows(2) {
            assert!(approx(pair[1] - pair[0], car_park.body.width / 6.0));
        }
        assert!(xs[0] > car_park.body.x && xs[4] < car_park.body.right());
    }

    #[test]
    fn wedge_scene_draws_map_then_labels_then_avatar() {
        let calls = record(&TopDownScene::with_wedge());

        assert_eq!(
            calls[0],
            DrawCall::FillRect {
                rect: map_engine::Rect::new(0.0, 0.0, 800.0, 600.0),
                color: match &CampusLayout::campus(SCENE_BOUNDS).structures()[0] {
                    Structure::Ground { color, .. } => *color,
                    other => panic!("unexpected first structure {other:?}"),
                },
            }
        );
        assert!(matches!(calls[1], DrawCall::OutlineRect { thickness, .. } if thickness == 4.0));
        assert_eq!(
            calls
                .iter()
                .filter(|c| matches!(c, DrawCall::FillCircle { .. }))
                .count(),
            6
        );

        let n = calls.len();
        assert!(matches!(calls[n - 2], DrawCall::FillPolygon { .. }));
        assert!(matches!(calls[n - 1], DrawCall::OutlinePolygon { .. }));
        let labels: Vec<&str> = calls[n - 6..n - 2]
            .iter()
            .map(|c| match c {
                DrawCall::Text { text, .. } => text.as_str(),
                other => panic!("expected label, got {other:?}"),
            })
            .collect();
        assert_eq!(labels, ["BLOCK A", "BLOCK B", "CANTEEN", "CAR PARK"]);

        let plate = calls
            .iter()
            .position(|c| *c == canteen_sign_plate())
            .expect("sign plate is drawn");
        assert!(matches!(&calls[plate + 1], DrawCall::Text { text, .. } if text == "CANTEEN"));
        assert_eq!(texts(&calls).len(), 5);
    }

    fn texts(calls: &[DrawCall]) -> Vec<&str> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn canteen_sign_plate() -> DrawCall {
        let layout = CampusLayout::campus(SCENE_BOUNDS);
        layout
            .structures()
            .iter()
            .find_map(|s| match s {
                Structure::Building(b) => b.sign.as_ref().map(|sign| DrawCall::FillRect {
                    rect: sign.rect(b.body),
                    color: sign.color,
                }),
                _ => None,
            })
            .expect("canteen has a sign")
    }

    #[test]
    fn sprite_scene_has_no_text_and_draws_a_textured_quad_last() {
        let calls = record(&TopDownScene::with_sprite(test_texture()));

        assert!(texts(&calls).is_empty());
        assert!(calls.contains(&canteen_sign_plate()), "sign plate is still drawn");

        assert_eq!(
            calls.last(),
            Some(&DrawCall::TexturedQuad {
                texture_size: (2, 2),
                corners: [
                    Vec2::new(376.0, 276.0),
                    Vec2::new(424.0, 276.0),
                    Vec2::new(424.0, 324.0),
                    Vec2::new(376.0, 324.0),
                ],
            })
        );
    }

    #[test]
    fn static_scene_calls_do_not_change_across_ticks() {
        let mut scene = TopDownScene::with_wedge();
        let before = record(&scene);
        for _ in 0..30 {
            scene.update(&InputSnapshot::empty());
        }
        assert_eq!(record(&scene), before);

        scene.update(&snapshot_from_actions(&[InputAction::MoveRight]));
        let after = record(&scene);
        let n = after.len();
        assert_eq!(after[..n - 2], before[..n - 2]);
        assert_ne!(after[n - 2..], before[n - 2..]);
    }

    #[test]
    fn frames_with_same_avatar_position_are_pixel_identical() {
        let mut first = TopDownScene::with_wedge();
        let mut second = TopDownScene::with_wedge();
        let right = snapshot_from_actions(&[InputAction::MoveRight]);
        for _ in 0..3 {
            first.update(&right);
            second.update(&right);
        }
        assert_eq!(render_digest(&first), render_digest(&second));

        second.update(&right);
        assert_ne!(render_digest(&first), render_digest(&second));
    }

    #[test]
    fn rendered_frame_shows_trees_and_avatar() {
        let scene = TopDownScene::with_wedge();
        let mut canvas = Canvas::new(800, 600);
        scene.render(&mut canvas);

        let layout = CampusLayout::campus(SCENE_BOUNDS);
        let tree_color = layout
            .structures()
            .iter()
            .find_map(|s| match s {
                Structure::Tree { color, .. } => Some(*color),
                _ => None,
            })
            .expect("tree");
        assert_eq!(canvas.pixel(320, 90), Some(tree_color));
        assert_ne!(canvas.pixel(400, 300), canvas.pixel(400, 200));
    }

    #[test]
    fn sprite_corners_rotate_about_center() {
        let center = Vec2::new(100.0, 100.0);
        let corners = sprite_corners(center, 24.0, FRAC_PI_2);

        // A quarter turn clockwise puts the image's top-left at the top-right.
        assert!(approx(corners[0].x, 124.0) && approx(corners[0].y, 76.0));
        assert!(approx(corners[2].x, 76.0) && approx(corners[2].y, 124.0));
    }

    #[test]
    fn wedge_tip_follows_facing() {
        let center = Vec2::new(400.0, 300.0);

        let up = wedge_points(center, Facing::Up.radians());
        assert_eq!(up[0], Vec2::new(400.0, 276.0));

        let right = wedge_points(center, Facing::Right.radians());
        assert!(approx(right[0].x, 424.0) && approx(right[0].y, 300.0));

        let centroid = right.iter().fold(Vec2::ZERO, |acc, p| acc + *p) * (1.0 / 3.0);
        assert!(approx(centroid.x, 400.0) && approx(centroid.y, 300.0));
    }

    #[test]
    fn walkthrough_clears_then_fills_ground_then_draws_edges() {
        let calls = record(&WalkthroughScene::new());

        assert_eq!(
            calls[0],
            DrawCall::Clear {
                color: [0, 0, 0, 255]
            }
        );
        assert!(matches!(
            &calls[1],
            DrawCall::FillPolygon { color, .. } if *color == [153, 204, 153, 255]
        ));
        let lines = calls[2..]
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count();
        assert_eq!(lines, calls.len() - 2);
        assert!(lines > 0 && lines <= 48);
    }

    #[test]
    fn walkthrough_frame_has_ground_below_horizon_and_sky_above() {
        let scene = WalkthroughScene::new();
        let mut canvas = Canvas::new(800, 600);
        scene.render(&mut canvas);

        assert_eq!(canvas.pixel(400, 590), Some([153, 204, 153, 255]));
        assert_eq!(canvas.pixel(400, 5), Some([0, 0, 0, 255]));
    }
