//! Ping-pong latency benchmark for nexus-fifo.
//!
//! One message in flight. Both sides block in `pop`, so this measures the
//! full wake path: push, readiness signal, reader wakeup.
//!
//! Run: cargo build --release --bench perf_fifo_latency
//! Profile: sudo taskset -c 0,2 ./target/release/deps/perf_fifo_latency-*

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use hdrhistogram::Histogram;
use nexus_fifo::Fifo;

const WARMUP: usize = 10_000;
const SAMPLES: usize = 100_000;
const CAPACITY: usize = 64;

#[cfg(target_arch = "x86_64")]
#[inline]
fn rdtscp() -> u64 {
    unsafe {
        let mut aux: u32 = 0;
        core::arch::x86_64::__rdtscp(&mut aux)
    }
}

#[cfg(not(target_arch = "x86_64"))]
#[inline]
fn rdtscp() -> u64 {
    static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

fn push_spinning(fifo: &Fifo<u64>, mut item: u64) {
    while let Err(e) = fifo.push(item) {
        item = e.into_inner();
        std::hint::spin_loop();
    }
}

fn main() {
    let fwd = Arc::new(Fifo::<u64>::new(CAPACITY));
    let ret = Arc::new(Fifo::<u64>::new(CAPACITY));

    let total = WARMUP + SAMPLES;

    // Worker thread: receive and echo back
    let worker = {
        let fwd = Arc::clone(&fwd);
        let ret = Arc::clone(&ret);
        thread::spawn(move || {
            for _ in 0..total {
                let val = fwd.pop();
                push_spinning(&ret, val);
            }
        })
    };

    for i in 0..WARMUP as u64 {
        push_spinning(&fwd, i);
        ret.pop();
    }

    let mut hist = Histogram::<u64>::new_with_max(10_000_000, 3).unwrap();
    let started = Instant::now();

    for i in 0..SAMPLES as u64 {
        let start = rdtscp();

        push_spinning(&fwd, i);
        ret.pop();

        let latency = rdtscp().wrapping_sub(start) / 2;
        let _ = hist.record(latency.min(10_000_000));
    }

    let elapsed = started.elapsed();
    worker.join().unwrap();

    println!("=== nexus-fifo ping-pong (RTT/2) ===");
    println!("Samples:  {:>8}", SAMPLES);
    println!("Capacity: {:>8}", CAPACITY);
    println!("Elapsed:  {:>8.2?}", elapsed);
    println!();
    println!("One-way latency (cycles):");
    println!("  min:   {:>7}", hist.min());
    println!("  mean:  {:>7.0}", hist.mean());
    println!("  p50:   {:>7}", hist.value_at_quantile(0.50));
    println!("  p90:   {:>7}", hist.value_at_quantile(0.90));
    println!("  p99:   {:>7}", hist.value_at_quantile(0.99));
    println!("  p999:  {:>7}", hist.value_at_quantile(0.999));
    println!("  p9999: {:>7}", hist.value_at_quantile(0.9999));
    println!("  max:   {:>7}", hist.max());
}
