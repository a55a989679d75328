use pixel_graph::graph::GraphBuilder;
use pixel_graph::grid::{Connectivity, NEIGH_OFFSETS};
use pixel_graph::islands::label_islands;
use pixel_graph::merge::{MergeOptions, NodeMerger};
use pixel_graph::skeleton::{Skeletonizer, ThinningAlgorithm, ThinningOptions};
use pixel_graph::{Pixel, PixelGraph, PixelGrid};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn mask_strategy() -> impl Strategy<Value = PixelGrid> {
    (1usize..=12, 1usize..=12, 0.1f64..0.9)
        .prop_flat_map(|(w, h, density)| {
            (
                Just(w),
                Just(h),
                prop::collection::vec(prop::bool::weighted(density), w * h),
            )
        })
        .prop_map(|(w, h, bits)| {
            PixelGrid::from_fn(w, h, |x, y| bits[y * w + x]).expect("non-empty grid")
        })
}

fn algorithm_strategy() -> impl Strategy<Value = ThinningAlgorithm> {
    prop_oneof![Just(ThinningAlgorithm::ZhangSuen), Just(ThinningAlgorithm::Hilditch)]
}

fn thinner(algorithm: ThinningAlgorithm) -> Skeletonizer {
    Skeletonizer::new(ThinningOptions {
        algorithm,
        ..Default::default()
    })
}

fn components(mask: &PixelGrid, connectivity: Connectivity) -> usize {
    label_islands(&Arc::new(mask.clone()), connectivity).len()
}

/// 4-connected background regions, counting the outside once.
fn background_regions(mask: &PixelGrid) -> usize {
    let inverted = PixelGrid::from_fn(mask.width() + 2, mask.height() + 2, |x, y| {
        !mask.is_set(x as i32 - 1, y as i32 - 1)
    })
    .expect("non-empty grid");
    components(&inverted, Connectivity::Four)
}

/// Undirected 8-links of a skeleton, skipping diagonals that cut across a
/// set orthogonal pixel.
fn link_count(mask: &PixelGrid) -> usize {
    let directed: usize = mask
        .iter_foreground()
        .map(|p| {
            NEIGH_OFFSETS
                .iter()
                .filter(|&&(dx, dy)| {
                    mask.get(p.offset(dx, dy))
                        && !(dx != 0
                            && dy != 0
                            && (mask.get(p.offset(dx, 0)) || mask.get(p.offset(0, dy))))
                })
                .count()
        })
        .sum();
    directed / 2
}

fn graph_of(mask: &PixelGrid) -> PixelGraph {
    GraphBuilder::default().build_mask(mask, Pixel::new(0, 0), None)
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, .. ProptestConfig::default() })]

    #[test]
    fn thinning_is_idempotent(mask in mask_strategy(), algorithm in algorithm_strategy()) {
        let s = thinner(algorithm);
        let mut once = mask.clone();
        s.thin(&mut once).expect("converges");
        let mut twice = once.clone();
        let stats = s.thin(&mut twice).expect("converges");
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(stats.removed, 0);
    }

    #[test]
    fn thinning_preserves_topology(mask in mask_strategy(), algorithm in algorithm_strategy()) {
        let mut thinned = mask.clone();
        thinner(algorithm).thin(&mut thinned).expect("converges");
        prop_assert!(thinned.iter_foreground().all(|p| mask.get(p)));
        prop_assert_eq!(
            components(&thinned, Connectivity::Eight),
            components(&mask, Connectivity::Eight)
        );
        prop_assert_eq!(background_regions(&thinned), background_regions(&mask));
    }

    #[test]
    fn labeling_partitions_foreground(mask in mask_strategy(), eight in any::<bool>()) {
        let connectivity = if eight { Connectivity::Eight } else { Connectivity::Four };
        let grid = Arc::new(mask);
        let islands = label_islands(&grid, connectivity);
        let mut seen = HashSet::new();
        for island in &islands {
            for &p in island.pixels() {
                prop_assert!(grid.get(p));
                prop_assert!(seen.insert(p));
            }
        }
        prop_assert_eq!(seen.len(), grid.foreground_count());
        let firsts: Vec<Pixel> = islands.iter().map(|i| i.first_pixel()).collect();
        prop_assert!(firsts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn graph_walk_uses_every_link_once(mask in mask_strategy(), algorithm in algorithm_strategy()) {
        let mut skeleton = mask;
        thinner(algorithm).thin(&mut skeleton).expect("converges");
        let graph = graph_of(&skeleton);
        prop_assert!(graph.validate().is_ok());

        let mut covered: HashSet<Pixel> = graph.nodes().iter().map(|n| n.pixel).collect();
        for edge in graph.edges() {
            prop_assert!(edge.pixels.windows(2).all(|w| w[0].touches(w[1])));
            prop_assert_eq!(edge.pixels.first(), graph.node(edge.a).map(|n| &n.pixel));
            prop_assert_eq!(edge.pixels.last(), graph.node(edge.b).map(|n| &n.pixel));
            covered.extend(edge.pixels.iter().copied());
        }
        prop_assert_eq!(covered, skeleton.iter_foreground().collect::<HashSet<_>>());
        let walked: usize = graph.edges().iter().map(|e| e.length()).sum();
        prop_assert_eq!(walked, link_count(&skeleton));
    }

    #[test]
    fn merged_nodes_keep_their_distance(
        mask in mask_strategy(),
        threshold in prop_oneof![Just(0.0), Just(1.0), Just(1.5), Just(2.0), Just(3.0)],
    ) {
        let mut skeleton = mask;
        Skeletonizer::default().thin(&mut skeleton).expect("converges");
        let graph = graph_of(&skeleton);
        let merged = NodeMerger::new(MergeOptions {
            distance_threshold: threshold,
            ..Default::default()
        })
        .merge(graph.clone())
        .expect("valid threshold");

        prop_assert!(merged.validate().is_ok());
        prop_assert!(merged.node_count() <= graph.node_count());
        prop_assert_eq!(merged.edge_count(), graph.edge_count());
        prop_assert_eq!(merged.edge_pixel_count(), graph.edge_pixel_count());
        let nodes = merged.nodes();
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                prop_assert!(a.pixel.distance(b.pixel) >= threshold);
            }
        }
    }
}
