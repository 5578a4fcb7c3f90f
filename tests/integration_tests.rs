use mapview::{
    input::{MouseButton, PointerSource},
    Envelope, Feature, InputEvent, KeyCode, MemoryLayer, Point, ResolutionLadder, ViewController,
    ViewEvent, ViewOptions,
};
use std::{sync::Arc, time::Duration};

/// Integration tests driving the view controller the way a host would:
/// raw input events in, ticks for time, notifications out.
#[cfg(test)]
mod integration_tests {
    use super::*;

    const EPS: f64 = 1e-6;

    /// 100x100 surface over a 400x400 world centered at the origin
    /// (resolution 4), with a point layer at the origin and one to the east
    fn create_test_view() -> ViewController {
        let options = ViewOptions {
            resolutions: ResolutionLadder::new(vec![1.0, 2.0, 4.0, 8.0, 16.0]).unwrap(),
            ..ViewOptions::default()
        };
        let mut view = ViewController::new(options);
        view.add_layer(Arc::new(MemoryLayer::with_features(
            "poi",
            vec![
                Feature::point("origin", 0.0, 0.0),
                Feature::point("east", 100.0, 0.0),
            ],
        )))
        .unwrap();
        view.set_envelope(Some(Envelope::from_coords(-200.0, -200.0, 200.0, 200.0)));
        view.resize(100.0, 100.0);
        view.process_events();
        view
    }

    fn mouse_down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
            source: PointerSource::Mouse,
        }
    }

    fn mouse_move(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove {
            position: Point::new(x, y),
            source: PointerSource::Mouse,
        }
    }

    fn mouse_up(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerUp {
            position: Point::new(x, y),
            button: MouseButton::Left,
            source: PointerSource::Mouse,
        }
    }

    #[test]
    fn test_initial_state() {
        let view = create_test_view();
        assert!(view.is_initialized());
        assert_eq!(view.viewport().resolution(), 4.0);
        assert_eq!(view.viewport().center, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_wheel_zoom_keeps_pointer_world_position() {
        let mut view = create_test_view();
        let pointer = Point::new(30.0, 70.0);
        let world_before = view.viewport().screen_to_world(pointer);
        assert_eq!(world_before, Point::new(-80.0, -80.0));

        view.handle_input(InputEvent::Wheel {
            delta: 120.0,
            position: pointer,
        });
        assert_eq!(view.zoom_target(), Some(2.0));

        for _ in 0..10 {
            view.tick(Duration::from_millis(50));
            let world = view.viewport().screen_to_world(pointer);
            assert!(world.distance_to(&world_before) < EPS);
        }
        view.tick(Duration::from_millis(1000));

        assert!((view.viewport().resolution() - 2.0).abs() < EPS);
        assert!(view.viewport().screen_to_world(pointer).distance_to(&world_before) < EPS);
        assert_eq!(view.zoom_target(), None);
    }

    #[test]
    fn test_zoom_animation_is_monotonic() {
        let mut view = create_test_view();
        // Two quick steps: the second replaces the first and heads for 1.0
        view.zoom_in();
        view.zoom_in();
        assert_eq!(view.zoom_target(), Some(1.0));

        let mut previous = view.viewport().resolution();
        assert_eq!(previous, 4.0);
        for step in 0..20 {
            view.tick(Duration::from_millis(50));
            let resolution = view.viewport().resolution();
            if step < 19 {
                assert!(resolution < previous, "step {step}: {resolution} >= {previous}");
            }
            previous = resolution;
        }
        assert_eq!(view.viewport().resolution(), 1.0);
        assert!(!view.is_animating());
    }

    #[test]
    fn test_drag_pans_and_reports_release() {
        let mut view = create_test_view();
        view.handle_input(mouse_down(50.0, 50.0));
        view.handle_input(mouse_move(60.0, 50.0));
        view.handle_input(mouse_up(60.0, 50.0));

        assert!(view.viewport().center.distance_to(&Point::new(-40.0, 0.0)) < EPS);

        let events = view.process_events();
        assert!(matches!(
            events[0],
            ViewEvent::ViewChanged {
                user_action: true,
                ..
            }
        ));
        match &events[1] {
            ViewEvent::MouseInfoUp { result: Some(hit) } => {
                assert_eq!(hit.layer_name, "poi");
                assert_eq!(hit.feature.id, "origin");
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(matches!(
            events[2],
            ViewEvent::ViewChanged {
                user_action: true,
                ..
            }
        ));
    }

    #[test]
    fn test_pan_round_trip_restores_center() {
        let mut view = create_test_view();
        view.set_rotation(30.0);
        let center = view.viewport().center;
        view.pan(Point::new(13.0, -7.5));
        view.pan(Point::new(-13.0, 7.5));
        assert!(view.viewport().center.distance_to(&center) < EPS);
    }

    #[test]
    fn test_ctrl_drag_zooms_to_box() {
        let mut view = create_test_view();
        view.handle_input(InputEvent::KeyDown {
            key: KeyCode::LeftCtrl,
        });
        view.handle_input(mouse_down(0.0, 0.0));
        view.handle_input(mouse_move(50.0, 25.0));
        assert_eq!(
            view.box_selection(),
            Some(Envelope::from_coords(0.0, 0.0, 50.0, 25.0))
        );
        // Box selection does not pan
        assert_eq!(view.viewport().center, Point::new(0.0, 0.0));

        view.handle_input(mouse_up(50.0, 25.0));
        assert_eq!(view.viewport().resolution(), 2.0);
        assert!(view.viewport().center.distance_to(&Point::new(-100.0, 150.0)) < EPS);
        assert!(view.box_selection().is_none());

        let events = view.process_events();
        assert!(events
            .iter()
            .all(|e| !matches!(e, ViewEvent::MouseInfoUp { .. })));
    }

    #[test]
    fn test_zero_width_box_leaves_state_untouched() {
        let mut view = create_test_view();
        view.set_zoom_to_box_mode(true);
        let before = *view.viewport();

        view.handle_input(mouse_down(10.0, 0.0));
        view.handle_input(mouse_move(10.0, 50.0));
        view.handle_input(mouse_up(10.0, 50.0));

        assert_eq!(*view.viewport(), before);
        assert!(!view.is_box_zoom_mode());
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let mut view = create_test_view();

        view.handle_input(mouse_move(50.0, 50.0));
        view.handle_input(mouse_move(52.0, 50.0));
        view.handle_input(mouse_move(0.0, 0.0));
        view.handle_input(mouse_move(1.0, 1.0));
        view.handle_input(InputEvent::PointerLeave);

        let kinds: Vec<_> = view.process_events().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec!["mouseinfoover", "mouseinfoover", "mouseinfoleave"]
        );
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut view = create_test_view();
        view.handle_input(mouse_down(50.0, 50.0));
        view.handle_input(mouse_move(55.0, 50.0));
        view.handle_input(InputEvent::PointerLeave);
        let center = view.viewport().center;

        view.handle_input(mouse_move(90.0, 90.0));
        assert_eq!(view.viewport().center, center);
    }

    #[test]
    fn test_pinch_zoom_is_anchored_at_origin() {
        let mut view = create_test_view();
        let origin = Point::new(20.0, 30.0);
        let world = view.viewport().screen_to_world(origin);

        view.handle_input(InputEvent::Manipulation {
            origin,
            translation: Point::new(0.0, 0.0),
            scale: Point::new(2.0, 2.0),
        });
        assert!((view.viewport().resolution() - 2.0).abs() < EPS);
        assert!(view.viewport().screen_to_world(origin).distance_to(&world) < EPS);

        view.set_zoom_locked(true);
        view.handle_input(InputEvent::Manipulation {
            origin,
            translation: Point::new(0.0, 0.0),
            scale: Point::new(2.0, 2.0),
        });
        assert!((view.viewport().resolution() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_wheel_ignored_when_zoom_locked() {
        let mut view = create_test_view();
        view.set_zoom_locked(true);
        view.handle_input(InputEvent::Wheel {
            delta: -120.0,
            position: Point::new(50.0, 50.0),
        });
        view.tick(Duration::from_millis(1000));
        assert_eq!(view.viewport().resolution(), 4.0);
    }

    #[test]
    fn test_resize_input_updates_size() {
        let mut view = create_test_view();
        view.handle_input(InputEvent::Resize {
            width: 300.0,
            height: 200.0,
        });
        assert_eq!(view.viewport().width, 300.0);
        assert_eq!(view.viewport().height, 200.0);
        assert!(view
            .process_events()
            .iter()
            .any(|e| matches!(e, ViewEvent::ViewChanged { .. })));
    }

    #[test]
    fn test_listeners_are_called() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let mut view = create_test_view();
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = changes.clone();
        view.on("viewchanged", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        view.pan(Point::new(1.0, 1.0));
        view.pan(Point::new(1.0, 1.0));
        view.process_events();
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_layer_outside_hover_set_never_hovers() {
        let mut view = create_test_view();
        view.set_hover_layers(Some(vec!["labels".to_string()]));

        view.handle_input(mouse_move(50.0, 50.0));
        view.handle_input(mouse_move(52.0, 50.0));
        assert!(view
            .process_events()
            .iter()
            .all(|e| !matches!(e, ViewEvent::MouseInfoOver { .. })));

        // The click set still reaches the layer
        view.handle_input(mouse_down(50.0, 50.0));
        view.handle_input(mouse_up(50.0, 50.0));
        assert!(view.process_events().iter().any(|e| matches!(
            e,
            ViewEvent::MouseInfoUp { result: Some(hit) } if hit.feature.id == "origin"
        )));
    }

    #[test]
    fn test_no_hover_while_box_modifier_held() {
        let mut view = create_test_view();
        view.handle_input(InputEvent::KeyDown {
            key: KeyCode::LeftCtrl,
        });
        view.handle_input(mouse_move(50.0, 50.0));
        assert!(view.process_events().is_empty());
    }

    #[test]
    fn test_negative_pinch_scale_keeps_translation() {
        let mut view = create_test_view();
        view.handle_input(InputEvent::Manipulation {
            origin: Point::new(50.0, 50.0),
            translation: Point::new(10.0, 0.0),
            scale: Point::new(-1.0, -1.0),
        });
        assert_eq!(view.viewport().resolution(), 4.0);
        assert!(view.viewport().center.distance_to(&Point::new(-40.0, 0.0)) < EPS);
    }
}
