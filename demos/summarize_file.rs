//! Example: Summarize a single WAV file
//!
//! Usage:
//!   cargo run --example summarize_file -- <file.wav> [width] [start] [end]

use std::env;
use wavedraw::{Metrics, SampleOptions, Timestamp, WaveFile};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let path = args.first().ok_or("Usage: summarize_file <file.wav> [width] [start] [end]")?;
    let width = args.get(1).map(|w| w.parse::<usize>()).transpose()?.unwrap_or(80);
    let start = args.get(2).map(|s| s.parse::<Timestamp>()).transpose()?.unwrap_or(Timestamp::Start);
    let end = args.get(3).map(|s| s.parse::<Timestamp>()).transpose()?.unwrap_or(Timestamp::End);

    let wave = WaveFile::new(path)?;
    let header = wave.header()?;

    println!("Header:");
    println!("  Channels: {}", header.num_channels);
    println!("  Sample rate: {} Hz", header.sample_rate);
    println!("  Bits per sample: {}", header.bits_per_sample);
    println!(
        "  Length: {:02}:{:02}:{:02}",
        header.length.hours, header.length.minutes, header.length.seconds
    );

    let options = SampleOptions {
        width,
        start,
        end,
        metrics: Metrics::all(),
    };
    let columns = wave.samples(&header, &options)?;

    println!("Columns ({} from {} to {}):", columns.len(), start, end);
    for (x, column) in columns.iter().enumerate() {
        println!(
            "  {:>4}: max {:>7.0} / {:>7.0}  rms {:>9.1} / {:>9.1}  avg {:>9.1} / {:>9.1}",
            x,
            column.pos_max.unwrap_or_default(),
            column.neg_max.unwrap_or_default(),
            column.pos_rms.unwrap_or_default(),
            column.neg_rms.unwrap_or_default(),
            column.pos_avg.unwrap_or_default(),
            column.neg_avg.unwrap_or_default(),
        );
    }

    Ok(())
}
