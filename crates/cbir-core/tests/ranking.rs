//! End-to-end ranking tests over synthetic databases.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use cbir_core::ports::ImageSource;
use cbir_core::{
    rank, rank_with_progress, Candidate, Error, MetricRegistry, MetricSettings, Ranking, Result,
};
use cbir_test_support::{MockImageSource, MockProgressSink, SyntheticImageBuilder};

fn registry() -> MetricRegistry {
    MetricRegistry::with_defaults(&MetricSettings::default()).unwrap()
}

/// Resolves the metric, then loads the database and ranks it against red.
fn search(registry: &MetricRegistry, source: &dyn ImageSource, key: &str) -> Result<Ranking> {
    let metric = registry.get(key)?;
    let db = source.candidates()?;
    let query = SyntheticImageBuilder::red().image;
    Ok(rank(&query, &db, metric, None))
}

fn primaries() -> Vec<Candidate> {
    vec![
        SyntheticImageBuilder::red(),
        SyntheticImageBuilder::blue(),
        SyntheticImageBuilder::green(),
    ]
}

#[test]
fn test_red_query_ranks_red_first() {
    let registry = registry();
    let metric = registry.get("HIST").unwrap();
    let query = SyntheticImageBuilder::red().image;
    let db = primaries();

    let ranking = rank(&query, &db, metric, None);
    assert!(ranking.failures.is_empty());
    assert_eq!(ranking.results.len(), 3);
    assert_eq!(ranking.results[0].id, "red");
    assert!(ranking.results[0].score.abs() < 1e-9);

    let blue = ranking.results.iter().find(|r| r.id == "blue").unwrap();
    let green = ranking.results.iter().find(|r| r.id == "green").unwrap();
    assert!(blue.score > ranking.results[0].score + 0.5);
    assert!((blue.score - green.score).abs() < 1e-12);
    // Equal scores keep database order: blue was inserted before green
    assert_eq!(ranking.results[1].id, "blue");
    assert_eq!(ranking.results[2].id, "green");
}

#[test]
fn test_every_candidate_appears_once_for_every_metric() {
    let registry = registry();
    let query = SyntheticImageBuilder::noise(24, 24, 1).image;
    let db: Vec<Candidate> = (0..6)
        .map(|i| {
            SyntheticImageBuilder::named(
                &format!("noise-{i}"),
                SyntheticImageBuilder::noise(24, 20, i),
            )
        })
        .collect();

    for (key, metric) in registry.iter() {
        let ranking = rank(&query, &db, metric, None);
        assert!(ranking.failures.is_empty(), "{key}: {:?}", ranking.failures);
        assert_eq!(ranking.results.len(), db.len(), "{key}");

        let mut indices: Vec<_> = ranking.results.iter().map(|r| r.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..db.len()).collect::<Vec<_>>(), "{key}");

        assert!(
            ranking.results.windows(2).all(|w| w[0].score <= w[1].score),
            "{key}: not sorted"
        );
        assert!(ranking.results.iter().all(|r| r.score >= 0.0), "{key}");
    }
}

#[test]
fn test_duplicates_keep_insertion_order() {
    let registry = registry();
    let metric = registry.get("TEXCOL").unwrap();
    let query = SyntheticImageBuilder::checkerboard(32, 32).image;
    let db = vec![
        SyntheticImageBuilder::named("twin-a", SyntheticImageBuilder::vertical_bars(32, 32, 4)),
        SyntheticImageBuilder::named("exact", SyntheticImageBuilder::checkerboard(32, 32)),
        SyntheticImageBuilder::named("twin-b", SyntheticImageBuilder::vertical_bars(32, 32, 4)),
    ];

    let ranking = rank(&query, &db, metric, None);
    let ids: Vec<_> = ranking.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["exact", "twin-a", "twin-b"]);
    assert_eq!(ranking.results[1].score, ranking.results[2].score);
}

#[test]
fn test_top_k_clamping() {
    let registry = registry();
    let metric = registry.get("SSD").unwrap();
    let query = SyntheticImageBuilder::red().image;
    let db = primaries();

    assert_eq!(rank(&query, &db, metric, Some(2)).results.len(), 2);
    assert_eq!(rank(&query, &db, metric, Some(99)).results.len(), 3);
    assert!(rank(&query, &db, metric, Some(0)).results.is_empty());
}

#[test]
fn test_degenerate_candidate_is_recorded_not_fatal() {
    let registry = registry();
    let metric = registry.get("SSD").unwrap();
    let query = SyntheticImageBuilder::red().image;
    let mut db = primaries();
    db.insert(
        1,
        SyntheticImageBuilder::named("tiny", SyntheticImageBuilder::single_pixel([255, 0, 0])),
    );

    let progress = MockProgressSink::new();
    let ranking = rank_with_progress(&query, &db, metric, None, &progress);

    assert_eq!(ranking.results.len(), 3);
    assert_eq!(ranking.failures.len(), 1);
    assert_eq!(ranking.failures[0].id, "tiny");
    assert!(matches!(
        ranking.failures[0].error,
        Error::DegenerateImage { .. }
    ));
    assert_eq!(progress.started_count(), 4);
    assert_eq!(progress.scored_count(), 3);
    assert_eq!(progress.failed_count(), 1);
    assert_eq!(progress.finished_counts(), Some((3, 1)));
}

#[test]
fn test_unknown_metric_stops_before_loading() {
    let registry = registry();
    let source = MockImageSource::new(primaries());

    let result = search(&registry, &source, "BOGUS");
    assert!(matches!(result, Err(Error::UnknownMetric { .. })));
    assert_eq!(source.load_count(), 0);

    let ranking = search(&registry, &source, "hist").unwrap();
    assert_eq!(ranking.results[0].id, "red");
    assert_eq!(source.load_count(), 1);
}

#[test]
fn test_ranking_from_image_source() {
    let source = MockImageSource::new(primaries());
    let db = source.candidates().unwrap();
    let registry = registry();
    let query = SyntheticImageBuilder::blue().image;

    for key in ["HIST", "MULTIHIST", "CUSTOM", "GRADORIENT", "SSD"] {
        let ranking = rank(&query, &db, registry.get(key).unwrap(), Some(1));
        assert_eq!(ranking.results[0].id, "blue", "{key}");
        assert_eq!(ranking.results[0].rank, 1);
    }
}

#[test]
fn test_block_ssd_matches_centre_only() {
    let registry = registry();
    let metric = registry.get("SSD").unwrap();
    // Same centre, different surroundings and sizes
    let query = SyntheticImageBuilder::solid(11, 11, [40, 40, 40]).image;
    let framed = cbir_core::Image::from_fn(21, 15, |x, y| {
        if x.abs_diff(10) <= 2 && y.abs_diff(7) <= 2 {
            [40, 40, 40]
        } else {
            [250, 0, 100]
        }
    });
    let db = vec![Candidate::new("framed", framed)];
    let ranking = rank(&query, &db, metric, None);
    assert_eq!(ranking.results[0].score, 0.0);
}

#[test]
fn test_texture_tells_bar_orientation_apart() {
    let registry = registry();
    let metric = registry.get("TEXTURE").unwrap();
    let query = SyntheticImageBuilder::vertical_bars(32, 32, 4).image;
    let db = vec![
        SyntheticImageBuilder::named("rows", SyntheticImageBuilder::horizontal_bars(32, 32, 4)),
        SyntheticImageBuilder::named("cols", SyntheticImageBuilder::vertical_bars(32, 32, 4)),
    ];

    let ranking = rank(&query, &db, metric, None);
    let ids: Vec<_> = ranking.results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["cols", "rows"]);
    assert!(ranking.results[0].score.abs() < 1e-9);
    assert!(ranking.results[1].score > ranking.results[0].score);
}

#[test]
fn test_multi_region_sees_rotated_quadrants() {
    let registry = registry();
    let colours = [[255, 0, 0], [0, 0, 255], [0, 255, 0], [9, 9, 9]];
    let rotated = [colours[2], colours[0], colours[3], colours[1]];
    let query = SyntheticImageBuilder::quadrants(20, 20, colours).image;
    let db = vec![SyntheticImageBuilder::quadrants(20, 20, rotated)];

    let global = rank(&query, &db, registry.get("HIST").unwrap(), None);
    let regional = rank(&query, &db, registry.get("MULTIHIST").unwrap(), None);
    assert!(global.results[0].score.abs() < 1e-9);
    assert!(regional.results[0].score > 0.5);
}

#[test]
fn test_source_failure_is_fatal() {
    let registry = registry();
    let source = MockImageSource::failing("truncated");

    let result = search(&registry, &source, "HIST");
    assert!(matches!(result, Err(Error::ImageReadFailure { .. })));
    assert_eq!(source.load_count(), 1);
}

#[test]
fn test_orientation_finds_identical_ramp() {
    let registry = registry();
    let metric = registry.get("GRADORIENT").unwrap();
    let query = SyntheticImageBuilder::horizontal_gradient(32, 32).image;
    let db = vec![
        SyntheticImageBuilder::named("board", SyntheticImageBuilder::checkerboard(32, 32)),
        SyntheticImageBuilder::named("ramp", SyntheticImageBuilder::horizontal_gradient(32, 32)),
    ];

    let ranking = rank(&query, &db, metric, None);
    assert_eq!(ranking.results[0].id, "ramp");
    assert!(ranking.results[0].score.abs() < 1e-9);
}
