//! Room tests.

use quill_foundation::{EntityId, Room};

#[test]
fn paths_lead_where_they_say() {
    let cellar = EntityId::new(2, 1);
    let attic = EntityId::new(3, 1);
    let room = Room::new("A dusty landing.")
        .with_path("down", cellar)
        .with_path("up", attic);

    assert_eq!(room.exit("down"), Some(cellar));
    assert_eq!(room.exit("up"), Some(attic));
    assert_eq!(room.exit("north"), None);
    assert!(room.has_path("up"));
    assert!(!room.has_path("north"));
}

#[test]
fn directions_are_sorted() {
    let here = EntityId::new(1, 1);
    let room = Room::new("A crossroads.")
        .with_path("west", here)
        .with_path("east", here)
        .with_path("north", here);

    assert_eq!(room.directions().collect::<Vec<_>>(), vec!["east", "north", "west"]);
}

#[test]
fn rooms_can_be_dark() {
    assert!(!Room::new("A lit room.").dark);
    assert!(Room::new("A cupboard.").with_dark(true).dark);
}
