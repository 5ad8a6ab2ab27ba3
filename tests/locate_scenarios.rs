use corrlocate::lowlevel::{suppress, SUPPRESS_FILL};
use corrlocate::{
    to_rects, CorrLocateError, ImageView, LocateConfig, Location, Locator, MatchMetric,
    MatchRect, MatchStage, OwnedImage,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn noise(width: usize, height: usize, seed: u64) -> OwnedImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height)
        .map(|_| rng.random_range(0..=255u8))
        .collect();
    OwnedImage::new(data, width, height).unwrap()
}

fn scene(placements: &[(usize, usize)], tpl: &OwnedImage) -> OwnedImage {
    let mut source = noise(100, 100, 7);
    for &(x, y) in placements {
        source.paste(tpl.view(), x, y);
    }
    source
}

fn locator(metric: MatchMetric, confidence: f32) -> Locator {
    Locator::default().with_config(LocateConfig {
        metric,
        confidence,
        ..LocateConfig::default()
    })
}

fn sorted(mut locs: Vec<Location>) -> Vec<Location> {
    locs.sort_by_key(|l| (l.y, l.x));
    locs
}

#[test]
fn finds_single_copy() {
    let tpl = noise(10, 10, 1);
    let source = scene(&[(20, 30)], &tpl);

    let loc = locator(MatchMetric::CCoeffNormed, 0.99)
        .locate(source.view(), tpl.view())
        .unwrap();
    assert_eq!(loc, Some(Location::new(20, 30)));
}

#[test]
fn finds_uniform_block() {
    let tpl = OwnedImage::filled(10, 10, 42).unwrap();
    let source = scene(&[(20, 30)], &tpl);

    let loc = locator(MatchMetric::CCoeffNormed, 0.99)
        .locate(source.view(), tpl.view())
        .unwrap();
    assert_eq!(loc, Some(Location::new(20, 30)));

    let loc = locator(MatchMetric::SqDiffNormed, 0.99)
        .locate(source.view(), tpl.view())
        .unwrap();
    assert_eq!(loc, Some(Location::new(20, 30)));

    let all = locator(MatchMetric::CCoeffNormed, 0.99)
        .locate_all(source.view(), tpl.view())
        .unwrap();
    assert_eq!(all, vec![Location::new(20, 30)]);
}

#[test]
fn finds_three_copies() {
    let tpl = noise(12, 12, 2);
    let placements = [(5, 5), (5, 50), (70, 70)];
    let source = scene(&placements, &tpl);

    let found = locator(MatchMetric::CCoeffNormed, 0.95)
        .locate_all(source.view(), tpl.view())
        .unwrap();
    assert_eq!(found.len(), 3);

    let expected: Vec<_> = placements.iter().map(|&(x, y)| Location::new(x, y)).collect();
    assert_eq!(sorted(found), sorted(expected));
}

#[test]
fn absent_template_is_not_found() {
    let tpl = noise(10, 10, 3);
    let source = scene(&[], &tpl);
    let locator = locator(MatchMetric::CCoeffNormed, 0.8);

    assert_eq!(locator.locate(source.view(), tpl.view()).unwrap(), None);
    assert!(locator.locate_all(source.view(), tpl.view()).unwrap().is_empty());
    assert_eq!(locator.locate_rect(source.view(), tpl.view()).unwrap(), None);
    assert!(locator
        .locate_all_rects(source.view(), tpl.view())
        .unwrap()
        .is_empty());
}

#[test]
fn rectangles_extend_locations_by_template_size() {
    let locs = [Location::new(5, 5), Location::new(70, 70)];
    let rects = to_rects(&locs, 10, 10);
    assert_eq!(rects.len(), 2);
    for (rect, loc) in rects.iter().zip(locs.iter()) {
        assert_eq!(rect.min(), *loc);
        assert_eq!(rect.max(), Location::new(loc.x + 10, loc.y + 10));
    }
}

#[test]
fn locate_all_rects_wrap_discovered_locations() {
    let tpl = noise(8, 6, 4);
    let source = scene(&[(10, 10), (60, 80)], &tpl);
    let locator = locator(MatchMetric::CCoeffNormed, 0.95);

    let locs = locator.locate_all(source.view(), tpl.view()).unwrap();
    let rects = locator.locate_all_rects(source.view(), tpl.view()).unwrap();
    assert_eq!(rects, to_rects(&locs, 8, 6));

    let best = locator.locate_rect(source.view(), tpl.view()).unwrap().unwrap();
    assert_eq!(best, MatchRect::from_location(locs[0], 8, 6));
}

#[test]
fn zero_threshold_always_accepts() {
    let tpl = noise(10, 10, 5);
    let source = scene(&[], &tpl);
    for metric in MatchMetric::ALL {
        let loc = locator(metric, 0.0)
            .locate(source.view(), tpl.view())
            .unwrap();
        assert!(loc.is_some(), "{} rejected at threshold 0", metric.name());
    }
}

#[test]
fn zero_threshold_accepts_negative_coefficient() {
    let source = OwnedImage::new(vec![1, 1, 0], 3, 1).unwrap();
    let tpl = OwnedImage::new(vec![0, 0, 1], 3, 1).unwrap();

    let hit = locator(MatchMetric::CCoeff, -1.0)
        .locate_scored(source.view(), tpl.view())
        .unwrap()
        .unwrap();
    assert!((0.0..1.0).contains(&hit.confidence), "{}", hit.confidence);

    let loc = locator(MatchMetric::CCoeff, 0.0)
        .locate(source.view(), tpl.view())
        .unwrap();
    assert_eq!(loc, Some(Location::new(0, 0)));
}

#[test]
fn threshold_above_one_behaves_like_one() {
    let tpl = noise(10, 10, 6);
    let source = scene(&[(33, 44)], &tpl);
    for metric in MatchMetric::ALL {
        let at_one = locator(metric, 1.0).locate(source.view(), tpl.view()).unwrap();
        let above = locator(metric, 1.01)
            .locate(source.view(), tpl.view())
            .unwrap();
        assert_eq!(at_one, above, "{}", metric.name());
    }

    let exact = locator(MatchMetric::SqDiffNormed, 1.01)
        .locate(source.view(), tpl.view())
        .unwrap();
    assert_eq!(exact, Some(Location::new(33, 44)));
}

#[test]
fn locate_all_is_repeatable_and_leaves_source_untouched() {
    let tpl = noise(12, 12, 2);
    let source = scene(&[(5, 5), (5, 50), (70, 70)], &tpl);
    let before = source.clone();
    let locator = locator(MatchMetric::CCoeffNormed, 0.95);

    let first = locator.locate_all(source.view(), tpl.view()).unwrap();
    let second = locator.locate_all(source.view(), tpl.view()).unwrap();
    assert_eq!(first, second);
    assert_eq!(source, before);
}

#[test]
fn suppressed_region_is_never_rediscovered() {
    let tpl = noise(12, 12, 8);
    let source = scene(&[(20, 20), (60, 40)], &tpl);
    let locator = locator(MatchMetric::CCoeffNormed, 0.9);

    let first = locator.locate(source.view(), tpl.view()).unwrap().unwrap();
    let mut working = source.clone();
    suppress(&mut working, first, 12, 12, SUPPRESS_FILL);

    let painted = MatchRect::from_location(first, 12, 12);
    let next = locator.locate(working.view(), tpl.view()).unwrap().unwrap();
    assert!(!MatchRect::from_location(next, 12, 12).intersects(&painted));
    assert_ne!(next, first);
}

#[test]
fn discovered_regions_do_not_overlap() {
    let tpl = noise(10, 10, 9);
    let placements = [(0, 0), (10, 0), (0, 10), (45, 45), (90, 90)];
    let source = scene(&placements, &tpl);

    let found = locator(MatchMetric::CCoeffNormed, 0.95)
        .locate_all(source.view(), tpl.view())
        .unwrap();
    assert_eq!(found.len(), placements.len());

    let rects = to_rects(&found, 10, 10);
    for (i, a) in rects.iter().enumerate() {
        for b in rects.iter().skip(i + 1) {
            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn max_matches_caps_results() {
    let tpl = noise(12, 12, 2);
    let source = scene(&[(5, 5), (5, 50), (70, 70)], &tpl);
    let locator = Locator::default().with_config(LocateConfig {
        confidence: 0.95,
        max_matches: Some(2),
        ..LocateConfig::default()
    });
    assert_eq!(locator.locate_all(source.view(), tpl.view()).unwrap().len(), 2);
}

#[test]
fn zero_threshold_multi_match_terminates() {
    let mut rng = StdRng::seed_from_u64(11);
    let data: Vec<u8> = (0..20 * 20).map(|_| rng.random_range(0..=255u8)).collect();
    let source = OwnedImage::new(data, 20, 20).unwrap();
    let tpl = noise(5, 5, 12);

    let found = locator(MatchMetric::CCoeffNormed, 0.0)
        .locate_all(source.view(), tpl.view())
        .unwrap();
    assert!(!found.is_empty());
    assert!(found.len() <= 16 * 16);

    let mut unique = found.clone();
    unique.sort_by_key(|l| (l.y, l.x));
    unique.dedup();
    assert_eq!(unique.len(), found.len());
}

#[test]
fn oversized_template_fails_in_correlation_stage() {
    let source = noise(8, 8, 13);
    let tpl = noise(9, 4, 14);
    let err = Locator::new(0.5)
        .locate(source.view(), tpl.view())
        .err()
        .unwrap();
    assert!(matches!(
        err,
        CorrLocateError::Stage {
            stage: MatchStage::Correlation,
            ..
        }
    ));
    assert!(matches!(
        err.root(),
        CorrLocateError::TemplateTooLarge {
            tpl_width: 9,
            img_width: 8,
            ..
        }
    ));
}

#[test]
fn nan_confidence_is_rejected() {
    let source = noise(8, 8, 15);
    let err = Locator::new(f32::NAN)
        .locate(source.view(), source.view())
        .err()
        .unwrap();
    assert!(matches!(err, CorrLocateError::InvalidConfig { .. }));
}

#[test]
fn strided_source_matches_contiguous_copy() {
    let tpl = noise(6, 6, 16);
    let contiguous = scene(&[(40, 12)], &tpl);

    let stride = 104;
    let mut padded = vec![0u8; stride * 100];
    for y in 0..100 {
        padded[y * stride..y * stride + 100].copy_from_slice(contiguous.view().row(y).unwrap());
    }
    let strided = ImageView::new(&padded, 100, 100, stride).unwrap();

    let locator = locator(MatchMetric::CCoeffNormed, 0.99);
    assert_eq!(
        locator.locate(strided, tpl.view()).unwrap(),
        Some(Location::new(40, 12))
    );
    assert_eq!(
        locator.locate_all(strided, tpl.view()).unwrap(),
        locator.locate_all(contiguous.view(), tpl.view()).unwrap()
    );
}
