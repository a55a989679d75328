use super::*;
use crate::error::Error;
use crate::grid::{Connectivity, PixelGrid};
use crate::islands::{label_islands, Island, IslandId};
use crate::types::Pixel;
use std::collections::HashSet;
use std::sync::Arc;

fn island_of(rows: &[&str]) -> Island {
    let grid = Arc::new(PixelGrid::from_ascii(rows).expect("valid grid"));
    label_islands(&grid, Connectivity::Eight).remove(0)
}

fn filled(width: usize, height: usize) -> Island {
    let grid = Arc::new(PixelGrid::from_fn(width, height, |_, _| true).expect("valid grid"));
    label_islands(&grid, Connectivity::Eight).remove(0)
}

/// Midpoint circle, one pixel thick and 8-connected.
fn circle(cx: i32, cy: i32, r: i32) -> Vec<Pixel> {
    let mut out = Vec::new();
    let (mut x, mut y, mut err) = (r, 0, 1 - r);
    while x >= y {
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            out.push(Pixel::new(cx + dx, cy + dy));
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
    out.sort_unstable();
    out.dedup();
    out
}

fn assert_disjoint_cover(list: &PixelRingList, island: &Island) {
    let mut seen = HashSet::new();
    for ring in list {
        for &p in ring.pixels() {
            assert!(island.contains(p));
            assert!(seen.insert(p), "pixel {p:?} in two rings");
        }
    }
    assert_eq!(seen.len(), island.len());
}

#[test]
fn grow_ring_from_single_pixel() {
    let island = filled(5, 5);
    let d = RingDecomposer::default();
    let seed = PixelRing::new(island.id(), [Pixel::new(2, 2)]);
    let first = d.grow_ring(&island, &seed, None);
    assert_eq!(first.len(), 8);
    let second = d.grow_ring(&island, &first, Some(&seed));
    assert_eq!(second.len(), 16);
    let third = d.grow_ring(&island, &second, Some(&first));
    assert!(third.is_empty());
}

#[test]
fn single_pixel_seed_covers_hole_free_island() {
    let island = island_of(&[
        "#######..",
        "#######..",
        "##.......",
        "##..#####",
        "#########",
    ]);
    let list = RingDecomposer::default()
        .decompose(&island, &RingSeed::Pixel(Pixel::new(0, 0)))
        .expect("valid seed");
    assert_disjoint_cover(&list, &island);
    assert_eq!(list.get(0).map(PixelRing::pixels), Some(&[Pixel::new(0, 0)][..]));
    assert_eq!(list.total_pixels(), island.len());
}

#[test]
fn repeated_grow_ring_matches_decompose() {
    let island = filled(6, 4);
    let d = RingDecomposer::default();
    let list = d
        .decompose(&island, &RingSeed::Pixel(Pixel::new(1, 1)))
        .expect("valid seed");

    let mut manual = vec![PixelRing::new(island.id(), [Pixel::new(1, 1)])];
    loop {
        let inner = manual.len().checked_sub(2).map(|i| manual[i].clone());
        let next = d.grow_ring(&island, &manual[manual.len() - 1], inner.as_ref());
        if next.is_empty() {
            break;
        }
        manual.push(next);
    }
    assert_eq!(list.rings(), manual.as_slice());
    assert_eq!(list.sizes(), vec![1, 8, 7, 4, 4]);
}

#[test]
fn concentric_circles_grow_exactly_the_outer_ring() {
    let inner = circle(15, 15, 5);
    let outer = circle(15, 15, 10);
    let grid = Arc::new(
        PixelGrid::from_pixels(31, 31, Pixel::new(0, 0), inner.iter().chain(&outer).copied())
            .expect("circles fit"),
    );
    assert_eq!(label_islands(&grid, Connectivity::Eight).len(), 2);

    let region = Island::from_pixels(IslandId(0), Arc::clone(&grid), grid.iter_foreground())
        .expect("foreground pixels");
    let list = RingDecomposer::default()
        .decompose(&region, &RingSeed::Ring(inner.clone()))
        .expect("valid seed");

    assert_eq!(list.len(), 2);
    let grown: HashSet<Pixel> = list.rings()[1].to_set();
    let expected: HashSet<Pixel> = outer.iter().copied().collect();
    assert_eq!(grown, expected);
    assert_disjoint_cover(&list, &region);

    // Plain growth has nothing to add: the gap is not part of the region.
    let d = RingDecomposer::default();
    let seed = PixelRing::new(region.id(), inner);
    assert!(d.grow_ring(&region, &seed, None).is_empty());
}

#[test]
fn stalled_growth_stops_without_bridging() {
    let grid = Arc::new(PixelGrid::from_ascii(&["##...##"]).expect("valid grid"));
    let region = Island::from_pixels(IslandId(0), Arc::clone(&grid), grid.iter_foreground())
        .expect("foreground pixels");
    let d = RingDecomposer::new(RingOptions {
        bridge_gaps: false,
        ..Default::default()
    });
    let list = d
        .decompose(&region, &RingSeed::Pixel(Pixel::new(0, 0)))
        .expect("valid seed");
    assert_eq!(list.sizes(), vec![1, 1]);

    let bridged = RingDecomposer::default()
        .decompose(&region, &RingSeed::Pixel(Pixel::new(0, 0)))
        .expect("valid seed");
    assert_eq!(bridged.sizes(), vec![1, 1, 2]);
}

#[test]
fn bridging_follows_the_configured_connectivity() {
    let grid = Arc::new(PixelGrid::from_ascii(&["#.#.", "...#"]).expect("valid grid"));
    let region = Island::from_pixels(IslandId(0), Arc::clone(&grid), grid.iter_foreground())
        .expect("foreground pixels");
    let seed = RingSeed::Pixel(Pixel::new(0, 0));

    let eight = RingDecomposer::default()
        .decompose(&region, &seed)
        .expect("valid seed");
    assert_eq!(eight.sizes(), vec![1, 2]);

    let four = RingDecomposer::new(RingOptions {
        connectivity: Connectivity::Four,
        ..Default::default()
    })
    .decompose(&region, &seed)
    .expect("valid seed");
    assert_eq!(four.sizes(), vec![1, 1, 1]);
    assert_eq!(four.rings()[1].pixels(), &[Pixel::new(2, 0)]);
    assert_disjoint_cover(&four, &region);
}

#[test]
fn outline_seed_peels_inwards() {
    let island = filled(7, 7);
    let list = RingDecomposer::default()
        .decompose(&island, &RingSeed::Outline)
        .expect("valid seed");
    assert_eq!(list.sizes(), vec![24, 16, 8, 1]);
    assert_eq!(list.rings()[3].pixels(), &[Pixel::new(3, 3)]);
}

#[test]
fn max_rings_caps_the_list() {
    let island = filled(7, 7);
    let d = RingDecomposer::new(RingOptions {
        max_rings: Some(2),
        ..Default::default()
    });
    let list = d.decompose(&island, &RingSeed::Outline).expect("valid seed");
    assert_eq!(list.sizes(), vec![24, 16]);
}

#[test]
fn decompose_all_handles_every_island() {
    let grid = Arc::new(
        PixelGrid::from_ascii(&["###....", "###..##", "###..##"]).expect("valid grid"),
    );
    let islands = label_islands(&grid, Connectivity::Eight);
    let lists = RingDecomposer::default()
        .decompose_all(&islands)
        .expect("outline seeds are valid");
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].sizes(), vec![8, 1]);
    assert_eq!(lists[1].sizes(), vec![4]);
    for (list, island) in lists.iter().zip(&islands) {
        assert_eq!(list.island(), island.id());
        assert_disjoint_cover(list, island);
    }
}

#[test]
fn foreign_or_empty_seeds_are_rejected() {
    let island = island_of(&["##.", "..."]);
    let d = RingDecomposer::default();
    let err = d
        .decompose(&island, &RingSeed::Pixel(Pixel::new(2, 0)))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = d.decompose(&island, &RingSeed::Ring(Vec::new())).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn ring_construction_drops_duplicates() {
    let ring = PixelRing::new(
        IslandId(3),
        [Pixel::new(1, 1), Pixel::new(0, 0), Pixel::new(1, 1)],
    );
    assert_eq!(ring.pixels(), &[Pixel::new(1, 1), Pixel::new(0, 0)]);
    assert_eq!(ring.island(), IslandId(3));
}
