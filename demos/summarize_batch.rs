//! Example: Summarize multiple WAV files in parallel
//!
//! Usage:
//!   cargo run --release --example summarize_batch -- [--jobs N] [--width W] [--json] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files. Each file is still read sequentially.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use rayon::prelude::*;
use std::env;
use std::time::Instant;
use wavedraw::{summarize_wave, ColumnStatistics, SampleOptions};

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

struct ItemOut {
    path: String,
    processing_ms: f32,
    result: Result<Vec<ColumnStatistics>, String>,
}

/// Loudest positive peak and quietest negative peak across all columns
fn overall_peaks(columns: &[ColumnStatistics]) -> (f64, f64) {
    columns.iter().fold((0.0, 0.0), |(hi, lo), c| {
        (
            hi.max(c.pos_max.unwrap_or_default()),
            lo.min(c.neg_max.unwrap_or_default()),
        )
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut width = 1200usize;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--width" => {
                width = args
                    .first()
                    .ok_or("--width requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: summarize_batch [--jobs N] [--width W] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --width W  Columns per file (default: 1200)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one WAV file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}, width={}", paths.len(), jobs, width);

    let options = SampleOptions::new(width);

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let started = Instant::now();
                let result = summarize_wave(path, &options).map_err(|e| e.to_string());
                ItemOut {
                    path: path.clone(),
                    processing_ms: started.elapsed().as_secs_f32() * 1000.0,
                    result,
                }
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        match (&o.result, json) {
            (Ok(columns), true) => println!(
                "{}",
                serde_json::json!({
                    "file": o.path,
                    "processing_time_ms": o.processing_ms,
                    "columns": columns,
                })
            ),
            (Err(e), true) => println!("{}", serde_json::json!({ "file": o.path, "error": e })),
            (Ok(columns), false) => {
                let (hi, lo) = overall_peaks(columns);
                println!(
                    "[{}/{}] {}: {} columns, peak +{:.0}/{:.0} time={:.2}ms",
                    idx + 1,
                    outs.len(),
                    o.path,
                    columns.len(),
                    hi,
                    lo,
                    o.processing_ms
                );
            }
            (Err(e), false) => {
                println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), o.path, e);
            }
        }
    }

    let ok = outs.iter().filter(|o| o.result.is_ok()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
