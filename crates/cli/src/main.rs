//! Out-of-order scheduling core CLI.
//!
//! This binary drives the simulator from the command line. It performs:
//! 1. **Run:** Load a program (assembly listing or JSON), run it to completion,
//!    and print the committed registers and statistics.
//! 2. **Check:** Parse and validate a program against a configuration without
//!    running it, echoing the normalized listing.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use o3sim_core::common::SimError;
use o3sim_core::config::Config;
use o3sim_core::core::arch::Gpr;
use o3sim_core::sim::{Simulator, load_config, load_program};
use o3sim_core::stats::SimStats;

#[derive(Parser, Debug)]
#[command(
    name = "o3sim",
    author,
    version,
    about = "Out-of-order instruction scheduling core simulator",
    long_about = "Run a program through a wakeup-matrix scheduler and report the committed state.\n\nExamples:\n  o3sim run demos/dependent_chain.s\n  o3sim run prog.s --config machine.json --json\n  o3sim run prog.s --set r1=3 --set r2=4 --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program until every instruction has retired.
    Run {
        /// Program to execute (`.json` for serialized instructions, otherwise assembly).
        program: PathBuf,

        /// JSON machine configuration (defaults apply to omitted fields).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print registers and statistics as JSON.
        #[arg(long)]
        json: bool,

        /// Log every retired instruction (sets `general.trace_instructions`).
        #[arg(long)]
        trace: bool,

        /// Initial register value, e.g. `r1=5` or `r2=0xff`. Repeatable.
        #[arg(long = "set", value_parser = parse_assignment)]
        set: Vec<(usize, u64)>,
    },

    /// Parse and validate a program without running it.
    Check {
        /// Program to check.
        program: PathBuf,

        /// JSON machine configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Machine-readable run report.
#[derive(Serialize)]
struct Report<'a> {
    registers: &'a [u64],
    stats: &'a SimStats,
    ipc: f64,
}

fn main() {
    let cli = Cli::parse();

    let trace = matches!(cli.command, Commands::Run { trace: true, .. });
    init_tracing(trace);

    let result = match cli.command {
        Commands::Run {
            program,
            config,
            json,
            trace,
            set,
        } => cmd_run(&program, config.as_deref(), json, trace, &set),
        Commands::Check { program, config } => cmd_check(&program, config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(trace: bool) {
    let default = if trace { "o3sim_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parses `rN=value` where value is decimal or `0x` hex.
fn parse_assignment(s: &str) -> Result<(usize, u64), String> {
    let (reg, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected rN=VALUE, got '{s}'"))?;
    let reg = reg.trim();
    let index = reg
        .strip_prefix('r')
        .or_else(|| reg.strip_prefix('x'))
        .and_then(|n| n.parse::<usize>().ok())
        .ok_or_else(|| format!("bad register '{reg}'"))?;
    let value = value.trim();
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value
            .parse::<u64>()
            .or_else(|_| value.parse::<i64>().map(|v| v as u64)),
    };
    let value = parsed.map_err(|e| format!("bad value '{value}': {e}"))?;
    Ok((index, value))
}

fn resolve_config(path: Option<&Path>) -> Result<Config, SimError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}

/// Loads, runs, and reports.
fn cmd_run(
    program: &Path,
    config: Option<&Path>,
    json: bool,
    trace: bool,
    set: &[(usize, u64)],
) -> Result<(), SimError> {
    let mut config = resolve_config(config)?;
    config.general.trace_instructions |= trace;

    let instructions = load_program(program)?;
    let mut regs = Gpr::new(config.scheduler.arch_regs);
    for &(reg, value) in set {
        if reg >= regs.len() {
            eprintln!("Error: --set r{reg}: only {} registers are configured", regs.len());
            process::exit(1);
        }
        regs.write(reg, value);
    }

    let mut sim = Simulator::with_registers(&config, instructions, regs)?;
    let stats = sim.run()?.clone();

    if json {
        let report = Report {
            registers: sim.registers().values(),
            stats: &stats,
            ipc: stats.ipc(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if trace {
        for record in sim.commit_log() {
            let r = record.retired;
            match r.rd {
                Some(rd) => println!(
                    "[{:>6}] #{:<4} {:<24} r{rd} <- {:#x}",
                    record.cycle, r.seq, r.instr.to_string(), r.value
                ),
                None => println!("[{:>6}] #{:<4} {}", record.cycle, r.seq, r.instr),
            }
        }
        println!();
    }

    println!("[*] Committed registers");
    sim.registers().dump();
    println!();
    println!("{stats}");
    Ok(())
}

/// Parses and validates without running.
fn cmd_check(program: &Path, config: Option<&Path>) -> Result<(), SimError> {
    let config = resolve_config(config)?;
    let instructions = load_program(program)?;
    for (i, instr) in instructions.iter().enumerate() {
        println!("{i:>5}: {instr}");
    }
    let count = instructions.len();
    let _ = Simulator::new(&config, instructions)?;
    println!("[*] {count} instructions OK");
    Ok(())
}
