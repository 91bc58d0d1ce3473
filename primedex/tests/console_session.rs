//! End-to-end: build into a scratch directory, reload, and drive the console

use std::io::Cursor;

use primedex::{
    ArtifactKind, ArtifactStore, IoChannel, PrimeEngine, PrimedexConfig, Provenance, QueryService,
    QUERY_PROMPTS,
};

fn responses(output: Vec<u8>) -> Vec<String> {
    String::from_utf8(output)
        .unwrap()
        .lines()
        .filter(|line| !QUERY_PROMPTS.contains(line))
        .map(str::to_string)
        .collect()
}

#[test]
fn build_reload_and_query() {
    let dir = tempfile::tempdir().unwrap();
    let config = PrimedexConfig::default()
        .with_bound(20)
        .with_data_dir(dir.path().join("primes"));
    config.validate().unwrap();

    let engine = PrimeEngine::from_config(&config);
    let (built, provenance) = engine.prepare(config.bound).unwrap();
    assert_eq!(provenance, Provenance::Built);
    for kind in [ArtifactKind::Bitmap, ArtifactKind::List, ArtifactKind::Index] {
        assert!(engine.store().artifact_path(20, kind).is_file());
    }

    // A fresh engine over the same directory must not sieve again
    let engine = PrimeEngine::from_config(&config);
    assert!(engine.store().exists(20));
    let (loaded, provenance) = engine.prepare(config.bound).unwrap();
    assert_eq!(provenance, Provenance::Loaded);
    assert_eq!(loaded, built);

    let script = "start\n1\n100\n-1\n9\n23\nnine\n-1\n-1\n";
    let channel = IoChannel::new(Cursor::new(script), Vec::new());
    let mut service = QueryService::new(loaded.store(), channel);
    let summary = service.run().unwrap();
    assert_eq!(summary.index_queries, 2);
    assert_eq!(summary.primality_queries, 2);
    assert_eq!(summary.rejected_inputs, 1);

    let (_, output) = service.into_channel().into_parts();
    assert_eq!(
        responses(output),
        vec![
            "The prime at index 1 is 5",
            "Index 100 has not been computed yet; only 7 primes are available",
            "9 is not prime",
            "23 is beyond the computed range (largest known prime is 19) and cannot be judged",
            "'nine' is not an integer, try again",
        ]
    );
}

#[test]
fn bounds_are_cached_independently() {
    let dir = tempfile::tempdir().unwrap();
    let engine = PrimeEngine::from_config(&PrimedexConfig::default().with_data_dir(dir.path()));

    let (small, _) = engine.prepare(10).unwrap();
    let (large, _) = engine.prepare(100).unwrap();
    assert_eq!(small.store().primes(), &[3, 5, 7]);
    assert_eq!(large.store().len(), 24);

    assert_eq!(engine.prepare(10).unwrap().1, Provenance::Loaded);
    assert_eq!(engine.prepare(100).unwrap().1, Provenance::Loaded);
}
