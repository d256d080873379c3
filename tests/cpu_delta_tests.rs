//! Tests for the two-sample CPU usage calculation.
//!
//! Usage between two snapshots is active ticks over active plus idle ticks,
//! where idle covers the idle and iowait counters.

use procinfo_reader::system::cpu::parse_cpu_snapshot;
use procinfo_reader::{cpu_percent_between, CpuField, CpuSampler, CpuSnapshot, ProcPaths};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn aggregate(line: &str) -> CpuSnapshot {
    parse_cpu_snapshot(Path::new("stat"), line, None).expect("valid cpu line")
}

#[test]
fn test_worked_example() {
    let t0 = aggregate("cpu  100 0 50 800 10 0 0 0 0 0");
    let t1 = aggregate("cpu  150 0 80 830 20 0 0 0 0 0");

    // active: (150-100) + (80-50) = 80, idle: (830-800) + (20-10) = 40
    assert_eq!(t1.active() - t0.active(), 80);
    assert_eq!(t1.idle() - t0.idle(), 40);

    let pct = cpu_percent_between(&t0, &t1).unwrap();
    assert!((pct - 66.666_666).abs() < 1e-4, "got {}", pct);
}

#[test]
fn test_aggregate_line_has_ten_non_negative_tokens() {
    let s = aggregate("cpu  4705 356 584 3699 23 23 0 0 0 0\ncpu0 1 2 3 4 5 6 7 8 9 10\n");
    let tokens = s.tokens();
    assert_eq!(tokens.len(), 10);
    for token in &tokens {
        assert!(token.parse::<f64>().unwrap() >= 0.0);
    }
    assert_eq!(s.get(CpuField::User), 4705);
    assert_eq!(s.get(CpuField::Softirq), 23);
}

#[test]
fn test_result_is_bounded() {
    let base = [1000u64, 10, 500, 9000, 100, 5, 5, 0, 0, 0];
    // Spread ticks over every counter in different proportions
    for step in 1..50u64 {
        let mut later = base;
        for (i, v) in later.iter_mut().enumerate() {
            *v += (step * (i as u64 + 1)) % 17;
        }
        let a = CpuSnapshot {
            label: "cpu".into(),
            values: base,
        };
        let b = CpuSnapshot {
            label: "cpu".into(),
            values: later,
        };
        if let Some(pct) = cpu_percent_between(&a, &b) {
            assert!((0.0..=100.0).contains(&pct), "step {} gave {}", step, pct);
        }
    }
}

#[test]
fn test_fully_busy_and_fully_idle() {
    let t0 = aggregate("cpu 100 0 100 100 0 0 0 0 0 0");
    let busy = aggregate("cpu 200 0 200 100 0 0 0 0 0 0");
    let idle = aggregate("cpu 100 0 100 300 50 0 0 0 0 0");
    assert_eq!(cpu_percent_between(&t0, &busy), Some(100.0));
    assert_eq!(cpu_percent_between(&t0, &idle), Some(0.0));
}

#[test]
fn test_guest_counters_count_as_active() {
    let t0 = aggregate("cpu 0 0 0 0 0 0 0 0 0 0");
    let t1 = aggregate("cpu 0 0 0 10 0 0 0 0 5 5");
    assert_eq!(cpu_percent_between(&t0, &t1), Some(50.0));
}

#[test]
fn test_sampler_reads_stat_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let paths = ProcPaths::new(dir.path(), dir.path().join("passwd"));
    let stat = dir.path().join("stat");

    fs::write(&stat, "cpu  100 0 50 800 10 0 0 0 0 0\ncpu0 100 0 50 800 10 0 0 0 0 0\n")
        .expect("Failed to write stat");
    let mut sampler = CpuSampler::new();
    assert!(sampler.sample(&paths).unwrap().is_empty());

    fs::write(&stat, "cpu  150 0 80 830 20 0 0 0 0 0\ncpu0 100 0 50 900 10 0 0 0 0 0\n")
        .expect("Failed to write stat");
    let usage = sampler.sample(&paths).unwrap();
    assert!((usage["cpu"] - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(usage["cpu0"], 0.0);
}
