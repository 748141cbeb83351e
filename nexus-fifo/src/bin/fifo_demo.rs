//! Driver for exercising a fifo by hand.
//!
//! `script` replays a fixed push/pop sequence on a five-slot fifo, printing
//! the status and population after each step. `stress` runs several writer
//! threads with seeded timing jitter against one blocking reader and reports
//! how often each rejection occurred.
//!
//! Run:
//!   cargo run --features demo --bin fifo-demo
//!   cargo run --features demo --bin fifo-demo -- stress --writers 4 --items 100000
//!   RUST_LOG=nexus_fifo=trace cargo run --features demo --bin fifo-demo

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossbeam_utils::Backoff;
use nexus_fifo::{BuildError, Fifo, PushError, Status};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fifo-demo")]
#[command(about = "Exercise a nexus-fifo from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay the fixed push/pop sequence on a five-slot fifo.
    Script,
    /// Hammer one fifo from several jittered writer threads.
    Stress {
        /// Number of writer threads.
        #[arg(long, default_value_t = 2)]
        writers: usize,
        /// Items pushed by each writer.
        #[arg(long, default_value_t = 10_000)]
        items: u64,
        /// Fifo capacity.
        #[arg(long, default_value_t = nexus_fifo::DEFAULT_CAPACITY)]
        capacity: usize,
        /// Seed for writer timing jitter. Writer `i` uses `seed + i`.
        #[arg(long, default_value_t = 0x5eed)]
        seed: u64,
        /// Upper bound on the per-push jitter, in spin iterations.
        #[arg(long, default_value_t = 256)]
        max_jitter: u32,
    },
}

fn main() -> Result<(), BuildError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match Cli::parse().command.unwrap_or(Command::Script) {
        Command::Script => script(),
        Command::Stress {
            writers,
            items,
            capacity,
            seed,
            max_jitter,
        } => stress(writers, items, capacity, seed, max_jitter),
    }
}

// =============================================================================
// Scripted rig
// =============================================================================

enum Step {
    Push(i32),
    /// Pop into a variable that was first overwritten with this marker.
    Pop(i32),
}

fn script() -> Result<(), BuildError> {
    let fifo = Fifo::<i32>::builder().label("script").build()?;
    let mut value = -1;

    println!("** nexus-fifo scripted rig, capacity {} **", fifo.capacity());
    println!();
    println!("Fifo population at start-up is {}", fifo.population());

    let steps = [
        Step::Pop(-1),
        Step::Push(7),
        Step::Push(8),
        Step::Pop(1000),
        Step::Push(9),
        Step::Push(10),
        Step::Push(11),
        Step::Push(12),
        Step::Push(13),
        Step::Pop(2000),
        Step::Pop(3000),
        Step::Pop(4000),
        Step::Pop(5000),
        Step::Pop(6000),
        Step::Pop(7000),
    ];

    for (n, step) in steps.into_iter().enumerate() {
        println!();
        let status = match step {
            Step::Push(v) => {
                value = v;
                println!("** Test {} ** Pushing the value {value} onto fifo", n + 1);
                Status::of_push(&fifo.push(value))
            }
            Step::Pop(marker) => {
                value = marker;
                println!("** Test {} ** Trying to pop a value from fifo", n + 1);
                println!("Current value (may be overwritten by pop) is {value}");
                let result = fifo.try_pop();
                let status = Status::of_pop(&result);
                if let Ok(v) = result {
                    value = v;
                }
                status
            }
        };
        println!("Status result of operation was {status}");
        println!("Fifo population after test is {}", fifo.population());
        println!("Current value is {value}");
    }

    Ok(())
}

// =============================================================================
// Jittered multi-writer stress run
// =============================================================================

/// Rejections seen by one writer, indexed like `REJECTIONS`.
type Tally = [u64; 3];

const REJECTIONS: [Status; 3] = [Status::Full, Status::Locked, Status::Preempted];

fn stress(
    writers: usize,
    items: u64,
    capacity: usize,
    seed: u64,
    max_jitter: u32,
) -> Result<(), BuildError> {
    let fifo = Arc::new(
        Fifo::<(usize, u64)>::builder()
            .capacity(capacity)
            .label("stress")
            .build()?,
    );

    info!(writers, items, capacity, seed, "starting stress run");
    let started = Instant::now();

    let handles: Vec<_> = (0..writers)
        .map(|writer| {
            let fifo = Arc::clone(&fifo);
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(writer as u64));
            thread::spawn(move || {
                let mut tally: Tally = [0; 3];
                for seq in 0..items {
                    // Jitter spreads writers out, with occasional collisions
                    // on the last free slot.
                    for _ in 0..rng.random_range(0..=max_jitter) {
                        std::hint::spin_loop();
                    }
                    push_counting(&fifo, (writer, seq), &mut tally);
                }
                tally
            })
        })
        .collect();

    let mut next = vec![0u64; writers];
    let total = items * writers as u64;
    for _ in 0..total {
        let (writer, seq) = fifo.pop();
        assert_eq!(seq, next[writer], "writer {writer} delivered out of order");
        next[writer] += 1;
    }

    let mut totals: Tally = [0; 3];
    for handle in handles {
        let tally = handle.join().expect("writer thread panicked");
        for (sum, n) in totals.iter_mut().zip(tally) {
            *sum += n;
        }
    }

    let elapsed = started.elapsed();
    println!("Delivered {total} items in order in {elapsed:.2?}");
    println!("  {:<10} {total:>10}", Status::Success);
    for (status, n) in REJECTIONS.iter().zip(totals) {
        println!("  {status:<10} {n:>10}");
    }
    println!(
        "  throughput {:>10.0} items/s",
        total as f64 / elapsed.max(Duration::from_nanos(1)).as_secs_f64()
    );

    Ok(())
}

fn push_counting<T>(fifo: &Fifo<T>, mut item: T, tally: &mut Tally) {
    let backoff = Backoff::new();
    loop {
        match fifo.push(item) {
            Ok(()) => return,
            Err(e) => {
                let slot = match e {
                    PushError::Full(_) => 0,
                    PushError::Locked(_) => 1,
                    PushError::Preempted(_) => 2,
                };
                tally[slot] += 1;
                item = e.into_inner();
                backoff.snooze();
            }
        }
    }
}
