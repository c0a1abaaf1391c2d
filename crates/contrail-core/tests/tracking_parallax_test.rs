//! Pointer/vector tracking and parallax properties.

use std::cell::Cell;
use std::rc::Rc;

use contrail_core::parallax::follow_strength;
use contrail_core::{
    ParallaxConfig, ParallaxRegistry, PointerEvent, PointerTracker, Vec2, VectorTracker,
};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f32> {
    -4_000.0f32..4_000.0
}

fn point() -> impl Strategy<Value = Vec2> {
    (coordinate(), coordinate()).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn tracker_reports_latest_event(points in prop::collection::vec(point(), 1..64)) {
        let mut tracker = PointerTracker::new();
        for point in &points {
            tracker.handle(&PointerEvent::moved(point.x, point.y));
            prop_assert_eq!(tracker.position(), *point);
        }
    }

    #[test]
    fn tracker_subtracts_current_container_origin(
        samples in prop::collection::vec((point(), point()), 1..64),
    ) {
        let origin = Rc::new(Cell::new(Vec2::ZERO));
        let shared = Rc::clone(&origin);
        let mut tracker = PointerTracker::relative_to(move || Some(shared.get()));
        for (point, container) in samples {
            origin.set(container);
            tracker.handle(&PointerEvent::moved(point.x, point.y));
            prop_assert_eq!(tracker.position(), point - container);
        }
    }

    #[test]
    fn vector_is_first_difference(points in prop::collection::vec(point(), 1..64)) {
        let mut tracker = VectorTracker::default();
        let mut previous = Vec2::ZERO;
        for point in points {
            let motion = tracker.handle(&PointerEvent::moved(point.x, point.y)).unwrap();
            prop_assert_eq!(motion.position, point);
            prop_assert_eq!(motion.vector, point - previous);
            previous = point;
        }
    }

    #[test]
    fn undamped_offset_is_exact(pointer in point(), depth in 0.0f32..10.0, sensitivity in -3.0f32..3.0) {
        let mut registry = ParallaxRegistry::<()>::new();
        let id = registry.register((), depth);
        let config = ParallaxConfig { sensitivity, easing_factor: 1.0 };
        registry.tick(pointer, &config);
        prop_assert_eq!(registry.offset(id), Some(pointer * follow_strength(depth, sensitivity)));
    }

    #[test]
    fn damped_offset_converges_monotonically(
        pointer in point(),
        depth in 0.1f32..8.0,
        easing_factor in 0.01f32..0.99,
    ) {
        let mut registry = ParallaxRegistry::<()>::new();
        let id = registry.register((), depth);
        let config = ParallaxConfig { sensitivity: 1.0, easing_factor };
        let target = pointer * follow_strength(depth, 1.0);
        let mut distance = target.length();
        for _ in 0..5_000 {
            registry.tick(pointer, &config);
            let next = (target - registry.offset(id).unwrap()).length();
            prop_assert!(next <= distance + 1e-3, "moved away: {} -> {}", distance, next);
            distance = next;
        }
        prop_assert!(distance <= target.length() * 1e-4 + 1e-3);
    }
}

#[test]
fn depth_two_offset_matches_reference_value() {
    let mut registry = ParallaxRegistry::<Vec2>::new();
    let id = registry.register(Vec2::ZERO, 2.0);
    let config = ParallaxConfig {
        sensitivity: 1.0,
        easing_factor: 1.0,
    };
    registry.tick(Vec2::new(300.0, 150.0), &config);
    assert_eq!(registry.offset(id), Some(Vec2::new(300.0, 150.0) * (2.0 * 1.0 / 20.0)));
}

#[test]
fn reregistration_starts_from_origin() {
    let mut registry = ParallaxRegistry::<()>::new();
    let config = ParallaxConfig {
        sensitivity: 1.0,
        easing_factor: 0.5,
    };
    let first = registry.register((), 3.0);
    for _ in 0..10 {
        registry.tick(Vec2::new(500.0, 500.0), &config);
    }
    assert!(registry.offset(first).unwrap().x > 0.0);
    registry.unregister(first);
    assert_eq!(registry.tick(Vec2::new(500.0, 500.0), &config), 0);

    let second = registry.register((), 3.0);
    assert_eq!(registry.offset(second), Some(Vec2::ZERO));
    assert_eq!(registry.offset(first), None);
}
