//! Index invariant checkers.
//!
//! These asserts verify the structural invariants the surface promises
//! after every mutation. Reused by the unit tests here and by the
//! integration tests; callers embedding the surface can run them in
//! their own test suites too.

use std::collections::HashMap;

use veldt_core::{EntityId, Kind};

use crate::surface::Surface;

/// Assert that every live entity sits in exactly the bucket its
/// coordinates truncate to, and in no other.
pub fn assert_index_consistent<K: Kind>(surface: &Surface<K>) {
    let mut expected: HashMap<(u32, u32), Vec<EntityId>> = HashMap::new();
    for id in surface.ids() {
        let (x, y) = surface
            .position(id)
            .unwrap_or_else(|e| panic!("live id {id} unreadable: {e}"));
        assert!(
            x >= 0.0 && x < surface.width() as f64 && y >= 0.0 && y < surface.height() as f64,
            "entity {id} stored out of range at ({x}, {y})"
        );
        expected.entry((x as u32, y as u32)).or_default().push(id);
    }

    let mut total = 0;
    for cx in 0..surface.width() {
        for cy in 0..surface.height() {
            let bucket = surface.bucket(cx, cy);
            total += bucket.len();
            let want = expected.get(&(cx, cy)).map_or(&[] as &[_], Vec::as_slice);
            assert_eq!(
                bucket.len(),
                want.len(),
                "bucket ({cx}, {cy}) holds {} entities, expected {}",
                bucket.len(),
                want.len()
            );
            for id in want {
                assert!(
                    bucket.contains(id),
                    "entity {id} missing from bucket ({cx}, {cy})"
                );
            }
        }
    }
    assert_eq!(
        total,
        surface.len(),
        "bucket occupancy {total} != registered count {}",
        surface.len()
    );
}

/// Assert that the buffer of `origin` is sorted ascending by distance.
pub fn assert_buffer_sorted<K: Kind>(surface: &Surface<K>, origin: EntityId) {
    let distances: Vec<f64> = surface
        .neighbours(origin)
        .unwrap_or_else(|e| panic!("origin {origin} unreadable: {e}"))
        .map(|(d, _)| d)
        .collect();
    for pair in distances.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "buffer of {origin} not sorted: {} before {}",
            pair[0],
            pair[1]
        );
    }
}
