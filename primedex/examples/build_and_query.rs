//! Build primes into ./example_primes, reload them and answer a few queries

use primedex::{answer_index, answer_primality, PrimeEngine, PrimedexConfig};
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let config = PrimedexConfig::default()
        .with_bound(10_000_000)
        .with_data_dir("example_primes");
    config.validate()?;

    println!("Preparing primes up to {}...", config.bound);
    let engine = PrimeEngine::from_config(&config);

    let start = Instant::now();
    let (set, provenance) = engine.prepare(config.bound)?;
    println!("First pass ({provenance}) in {:?}", start.elapsed());

    // The second pass always comes from disk
    let start = Instant::now();
    let (reloaded, provenance) = engine.prepare(config.bound)?;
    println!("Second pass ({provenance}) in {:?}", start.elapsed());
    assert_eq!(reloaded.store().len(), set.store().len());

    let store = reloaded.store();
    println!("\nArtifact summary:");
    println!("   Primes greater than 2: {}", store.len());
    println!("   Largest prime: {:?}", store.max_prime());
    println!("   Bitmap size: {} bytes", reloaded.bitmap().byte_size());

    println!("\nSample queries:");
    for index in [0, 1, 1_000, 664_577, 700_000] {
        println!("   {}", answer_index(store, index));
    }
    for value in [2, 9, 7_919, 9_999_991, 10_000_019] {
        println!("   {}", answer_primality(store, value));
    }

    println!("\nRun 'cargo run --bin primedex -- query --bound 10000000 --data-dir example_primes' for the console");
    Ok(())
}
