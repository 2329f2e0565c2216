//! Trace-driven cache simulator CLI.

use clap::Parser;
use std::io::Write;
use std::{fs, process};

use linecache::config::Config;
use linecache::sim::Simulation;
use linecache::sim::trace;

#[derive(Parser, Debug)]
#[command(
    name = "linecache",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = None,
)]
struct Cli {
    /// JSON configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Access trace to replay.
    #[arg(short, long)]
    trace: String,

    /// Print statistics as JSON instead of a report.
    #[arg(long)]
    json: bool,

    /// Print the bytes returned by every read.
    #[arg(long)]
    show_reads: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| fail(&e.to_string())),
        None => Config::default(),
    };

    let mut sim = Simulation::new(&config).unwrap_or_else(|e| fail(&e.to_string()));

    let text = fs::read_to_string(&cli.trace)
        .unwrap_or_else(|e| fail(&format!("failed to read {}: {}", cli.trace, e)));
    let ops = sim
        .parse_trace(&text)
        .unwrap_or_else(|e| fail(&format!("{}: {}", cli.trace, e)));

    log::info!("replaying {} operations from {}", ops.len(), cli.trace);
    let reads = trace::replay(&mut sim.cache, &ops);

    if cli.show_reads {
        for (i, bytes) in reads.iter().enumerate() {
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            println!("read {i}: {hex}");
        }
    }

    let stats = sim.finish();
    if cli.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&e.to_string()),
        }
    } else {
        stats.print();
    }
    std::io::stdout().flush().ok();
}

fn fail(msg: &str) -> ! {
    eprintln!("\x1b[1;31merror:\x1b[0m {msg}");
    process::exit(1);
}
