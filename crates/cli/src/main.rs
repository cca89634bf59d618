//! MIPS cycle-accurate simulator CLI.
//!
//! This binary provides the single entry point for running program images. It
//! performs:
//! 1. **Loading:** Reads a flat big-endian image and places it at address 0.
//! 2. **Execution:** Runs the pipeline to the halt sentinel, optionally under
//!    a watchdog cycle cap.
//! 3. **Reporting:** Prints statistics, the register dump, and optionally the
//!    nonzero memory words.

use clap::{Parser, Subcommand};
use std::{fs, process};

use mipsim_core::sim::{RunStatus, loader};
use mipsim_core::{MemoryStore, SimConfig, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "MIPS cycle-accurate pipeline simulator",
    long_about = "Run a flat big-endian MIPS program image through the five-stage pipeline model.\n\nExamples:\n  sim run -f programs/fib.bin\n  sim run -f programs/fib.bin --config two_way.json --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image to the halt sentinel.
    Run {
        /// Program image to execute (raw big-endian word stream).
        #[arg(short, long)]
        file: String,

        /// JSON configuration file (cache geometry, trace flag).
        #[arg(long)]
        config: Option<String>,

        /// Enable per-stage tracing to stderr (overrides the config file).
        #[arg(long)]
        trace: bool,

        /// Watchdog: abort after this many cycles.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Dump all nonzero memory words after the run.
        #[arg(long)]
        dump_memory: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            file,
            config,
            trace,
            max_cycles,
            dump_memory,
        } => cmd_run(&file, config.as_deref(), trace, max_cycles, dump_memory),
    }
}

/// Loads the image, runs the simulator, and prints the final state.
fn cmd_run(
    file: &str,
    config_path: Option<&str>,
    trace: bool,
    max_cycles: Option<u64>,
    dump_memory: bool,
) {
    let mut config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: could not read config '{}': {}", path, e);
                process::exit(1);
            });
            serde_json::from_str::<SimConfig>(&text).unwrap_or_else(|e| {
                eprintln!("[!] FATAL: invalid config '{}': {}", path, e);
                process::exit(1);
            })
        }
        None => SimConfig::default(),
    };
    if trace {
        config.trace = true;
    }

    let image = loader::read_image(file).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    });

    let mut mem = MemoryStore::new(config.memory_bytes);
    let words = loader::load_words(&mut mem, &image).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    });

    println!("[*] Loaded {} words from {}", words, file);
    println!(
        "    I$: {}B/{}B {:?} penalty={}  D$: {}B/{}B {:?} penalty={}",
        config.icache.cache_size,
        config.icache.block_size,
        config.icache.kind,
        config.icache.miss_latency,
        config.dcache.cache_size,
        config.dcache.block_size,
        config.dcache.kind,
        config.dcache.miss_latency
    );

    let mut sim = Simulator::new(&config, mem).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: {}", e);
        process::exit(1);
    });

    match max_cycles {
        Some(cap) => {
            if sim.run_cycles(cap) == RunStatus::Running {
                eprintln!("[!] Watchdog: still running after {} cycles", cap);
            }
        }
        None => sim.run_till_halt(),
    }

    match sim.finalize() {
        Ok(stats) => stats.print(),
        Err(e) => {
            eprintln!("[!] FATAL: finalize failed: {}", e);
            process::exit(1);
        }
    }

    println!("\nRegisters:");
    sim.cpu.regs.dump();

    if dump_memory {
        println!("\nMemory (nonzero words):");
        sim.cpu.mem.dump();
    }
}
