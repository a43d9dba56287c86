use super::*;

#[test]
fn new_store_is_empty_and_paused() {
    let store = BodyStore::new();
    assert!(store.is_empty());
    assert!(!store.is_running());
}

#[test]
fn body_at_finds_rect_and_circle() {
    let mut store = BodyStore::new();
    let r = store.create_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    let c = store.create_circle(Vector::new(50.0, 50.0), 5.0);
    assert_eq!(store.body_at(Vector::new(5.0, 5.0)), Some(r));
    assert_eq!(store.body_at(Vector::new(52.0, 51.0)), Some(c));
    assert_eq!(store.body_at(Vector::new(30.0, 30.0)), None);
}

#[test]
fn body_at_returns_topmost() {
    let mut store = BodyStore::new();
    store.create_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    let top = store.create_rect(Rect::new(5.0, 5.0, 10.0, 10.0));
    assert_eq!(store.body_at(Vector::new(7.0, 7.0)), Some(top));
}

#[test]
fn move_body_recenters_shape() {
    let mut store = BodyStore::new();
    let r = store.create_rect(Rect::new(0.0, 0.0, 10.0, 4.0));
    assert!(store.move_body(r, Vector::new(100.0, 100.0)));
    assert_eq!(store.body_center(r), Some(Vector::new(100.0, 100.0)));
    assert_eq!(store.get(r).map(|b| b.shape), Some(Shape::Rect { rect: Rect::new(95.0, 98.0, 10.0, 4.0) }));
    assert!(!store.move_body(Uuid::new_v4(), Vector::ZERO));
}

#[test]
fn remove_body_drops_attached_joints() {
    let mut store = BodyStore::new();
    let a = store.create_circle(Vector::new(0.0, 0.0), 1.0);
    let b = store.create_circle(Vector::new(10.0, 0.0), 1.0);
    let c = store.create_circle(Vector::new(20.0, 0.0), 1.0);
    store.create_hinge(a, b, Vector::new(5.0, 0.0));
    let kept = store.create_spring((b, Vector::new(10.0, 0.0)), (c, Vector::new(20.0, 0.0)));
    assert!(store.remove_body(a));
    assert_eq!(store.joints().len(), 1);
    assert_eq!(store.joints()[0].id(), kept);
    assert!(!store.remove_body(a));
}

#[test]
fn toggle_running_flips() {
    let mut store = BodyStore::new();
    assert!(store.toggle_running());
    assert!(store.is_running());
    assert!(!store.toggle_running());
}

#[test]
fn store_serializes_shapes_with_type_tag() {
    let mut store = BodyStore::new();
    store.create_circle(Vector::new(1.0, 2.0), 3.0);
    let json = serde_json::to_value(&store).unwrap();
    assert_eq!(json["bodies"][0]["shape"]["type"], "circle");
    assert_eq!(json["bodies"][0]["shape"]["radius"], 3.0);
}
