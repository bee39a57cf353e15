//! Benchmark tests for critical operations
//!
//! Run with: cargo test --release bench -- --ignored --nocapture

use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    Json,
};
use tempfile::NamedTempFile;

use shortlink::handler::{resolve_url, shorten_url};
use shortlink::model::ShortenRequest;
use shortlink::state::AppState;
use shortlink::store::LinkStore;

fn setup_state() -> (AppState, NamedTempFile) {
    let temp_db = NamedTempFile::new().unwrap();
    let store = LinkStore::open(temp_db.path()).unwrap();
    let state = AppState::new(store, "http://bench.test".parse().unwrap());
    (state, temp_db)
}

fn report(name: &str, iterations: usize, duration: Duration) {
    let avg_ms = duration.as_secs_f64() * 1000.0 / iterations as f64;
    let ops_per_sec = (iterations as f64 / duration.as_secs_f64()) as u64;

    println!("  {} ({} iterations)", name, iterations);
    println!("    Total time: {:?}", duration);
    println!("    Avg time: {:.3}ms", avg_ms);
    println!("    Throughput: {} ops/sec\n", ops_per_sec);
}

fn request(url: String) -> ShortenRequest {
    ShortenRequest { url, short: None }
}

#[tokio::test]
#[ignore]
async fn bench_shorten() {
    println!("\n=== Benchmark: Shorten ===\n");

    let (state, _temp_db) = setup_state();
    let iterations = 1000;

    let start = Instant::now();
    for i in 0..iterations {
        let req = request(format!("https://example.com/bench/{i}"));
        shorten_url(State(state.clone()), Ok(Json(req)))
            .await
            .unwrap();
    }
    report("Shorten (generated code)", iterations, start.elapsed());
}

#[tokio::test]
#[ignore]
async fn bench_resolve() {
    println!("\n=== Benchmark: Resolve ===\n");

    let (state, _temp_db) = setup_state();
    let codes = ["alpha", "bravo", "charlie", "delta"];
    for code in codes {
        let req = ShortenRequest {
            url: format!("https://example.com/{code}"),
            short: Some(code.to_string()),
        };
        shorten_url(State(state.clone()), Ok(Json(req)))
            .await
            .unwrap();
    }

    let iterations = 10_000;
    let start = Instant::now();
    for i in 0..iterations {
        let code = codes[i % codes.len()].to_string();
        resolve_url(Path(code), State(state.clone())).await.unwrap();
    }
    report("Resolve (hit)", iterations, start.elapsed());

    let start = Instant::now();
    for i in 0..iterations {
        let _ = resolve_url(Path(format!("miss{i}")), State(state.clone())).await;
    }
    report("Resolve (miss)", iterations, start.elapsed());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn bench_concurrent_shorten() {
    println!("\n=== Benchmark: Concurrent Shorten ===\n");

    let (state, _temp_db) = setup_state();
    let num_tasks = 100;
    let ops_per_task = 10;

    let start = Instant::now();

    let mut handles = vec![];
    for task_id in 0..num_tasks {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            for op_id in 0..ops_per_task {
                let req = request(format!("https://example.com/concurrent-{task_id}-{op_id}"));
                shorten_url(State(state.clone()), Ok(Json(req)))
                    .await
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    report("Concurrent shorten", num_tasks * ops_per_task, start.elapsed());
    assert_eq!(state.store.len().unwrap(), (num_tasks * ops_per_task) as u64);
}
