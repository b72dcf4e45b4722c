use rand::Rng;
use std::time::Duration;
use system_monitor::{
    error::SystemError,
    metrics::cpu::CounterSample,
    metrics::sources::{CpuTimes, MemInfo},
    Metric, MetricsSnapshot, Monitor, MonitorConfig, PeriodicTask, SharedMetrics, SnapshotWriter,
    WebConfig,
};
use system_monitor::{CpuSampler, MemorySampler, PowerSampler};
use tempfile::tempdir;

/// Two /proc/stat readings one tick apart: total 100/idle 50, then total 200/idle 100
#[tokio::test]
async fn test_cpu_end_to_end() {
    let dir = tempdir().unwrap();
    let stat = dir.path().join("stat");
    let metrics = SharedMetrics::new();
    let mut sampler = CpuSampler::new(&stat);

    std::fs::write(&stat, "cpu  30 0 20 40 10 0 0 0\n").unwrap();
    sampler.tick(&metrics).await.unwrap();
    assert_eq!(metrics.snapshot().await.cpu_usage, 0.0, "cold start must not publish");

    std::fs::write(&stat, "cpu  60 0 40 80 20 0 0 0\n").unwrap();
    sampler.tick(&metrics).await.unwrap();
    assert_eq!(metrics.snapshot().await.cpu_usage, 50.0);
}

/// Usage stays within [0, 100] for monotonic counters
#[test]
fn test_cpu_usage_bounds() {
    let mut rng = rand::thread_rng();
    for _ in 0..1000 {
        let mut sampler = CpuSampler::new("/nonexistent");
        let base = CpuTimes {
            user: rng.gen_range(0..1_000_000),
            idle: rng.gen_range(0..1_000_000),
            ..Default::default()
        };
        sampler.observe(CounterSample::try_from(base).unwrap());

        let busy = rng.gen_range(0..10_000);
        let idle = rng.gen_range(0..10_000);
        let next = CpuTimes {
            user: base.user + busy,
            idle: base.idle + idle,
            ..Default::default()
        };
        let usage = sampler
            .observe(CounterSample::try_from(next).unwrap())
            .unwrap();

        if busy + idle == 0 {
            assert_eq!(usage, 0.0);
        } else {
            assert!((0.0..=100.0).contains(&usage), "usage {usage} out of bounds");
            let expected = 100.0 * busy as f64 / (busy + idle) as f64;
            assert!((usage - expected).abs() < 1e-9);
        }
    }
}

/// Memory usage for the documented example
#[tokio::test]
async fn test_memory_usage() {
    let dir = tempdir().unwrap();
    let meminfo = dir.path().join("meminfo");
    std::fs::write(&meminfo, "MemTotal: 1000 kB\nMemAvailable: 400 kB\n").unwrap();

    let sampler = MemorySampler::new(&meminfo);
    assert_eq!(sampler.sample().await.unwrap(), 60.0);

    let info = MemInfo::parse("MemTotal: 0 kB\nMemAvailable: 400 kB\n");
    assert_eq!(system_monitor::metrics::memory::memory_usage(info), 0.0);
}

/// Power sensor present and absent
#[tokio::test]
async fn test_power_sampler() {
    let dir = tempdir().unwrap();
    let sensor = dir.path().join("power_now");

    let mut sampler = PowerSampler::new(&sensor);
    let fallback = sampler.sample().await;
    assert!((50.0..70.0).contains(&fallback));

    std::fs::write(&sensor, "50000000\n").unwrap();
    assert_eq!(sampler.sample().await, 50.0);
}

/// The sink file parses back to the same three values
#[tokio::test]
async fn test_snapshot_file_round_trip() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("metrics.json");
    let writer = SnapshotWriter::new(&out);

    let snapshot = MetricsSnapshot {
        cpu_usage: 12.5,
        mem_usage: 33.3,
        power_usage: 55.0,
    };
    writer.write(&snapshot).await.unwrap();

    let json = std::fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object["cpuUsage"], 12.5);
    assert_eq!(object["memUsage"], 33.3);
    assert_eq!(object["powerUsage"], 55.0);

    let parsed: MetricsSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);
}

/// Bit pattern with identical high and low halves; a torn write would break the symmetry
fn tagged(tag: u64, k: u64) -> f64 {
    let half = (tag << 24) | k;
    f64::from_bits((half << 32) | half)
}

fn check_field(value: f64, tag: u64) {
    if value == 0.0 {
        return;
    }
    let bits = value.to_bits();
    let (high, low) = (bits >> 32, bits & 0xffff_ffff);
    assert_eq!(high, low, "torn value {bits:#x}");
    assert_eq!(high >> 24, tag, "value from another field: {bits:#x}");
}

/// Concurrent writers on distinct fields and full-snapshot readers
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_access_never_tears() {
    for _ in 0..5 {
        let metrics = SharedMetrics::new();
        let (writers, readers) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(1..=4), rng.gen_range(1..=4))
        };

        let mut handles = Vec::new();
        for w in 0..writers * 3 {
            let metrics = metrics.clone();
            let (metric, tag) = match w % 3 {
                0 => (Metric::Cpu, 1),
                1 => (Metric::Memory, 2),
                _ => (Metric::Power, 3),
            };
            handles.push(tokio::spawn(async move {
                for k in 1..500 {
                    metrics.store(metric, tagged(tag, k)).await;
                    if rand::random::<bool>() {
                        tokio::task::yield_now().await;
                    }
                }
            }));
        }
        for _ in 0..readers {
            let metrics = metrics.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..500 {
                    let snapshot = metrics.snapshot().await;
                    check_field(snapshot.cpu_usage, 1);
                    check_field(snapshot.mem_usage, 2);
                    check_field(snapshot.power_usage, 3);
                    if rand::random::<bool>() {
                        tokio::task::yield_now().await;
                    }
                }
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }
    }
}

/// Full daemon against synthetic sources
#[tokio::test(start_paused = true)]
async fn test_monitor_writes_snapshot_file() {
    let dir = tempdir().unwrap();
    let config = MonitorConfig::default()
        .with_stat_path(dir.path().join("stat"))
        .with_meminfo_path(dir.path().join("meminfo"))
        .with_power_path(dir.path().join("power_now"))
        .with_output_path(dir.path().join("metrics.json"));

    std::fs::write(&config.stat_path, "cpu  10 0 10 80 0 0 0 0\n").unwrap();
    std::fs::write(&config.meminfo_path, "MemTotal: 1000 kB\nMemAvailable: 400 kB\n").unwrap();
    std::fs::write(&config.power_path, "50000000\n").unwrap();

    let handle = Monitor::new(config.clone()).spawn();
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let in_memory = handle.metrics().snapshot().await;
    assert_eq!(in_memory.mem_usage, 60.0);
    assert_eq!(in_memory.power_usage, 50.0);
    assert_eq!(in_memory.cpu_usage, 0.0, "counters never moved");

    let written: MetricsSnapshot =
        serde_json::from_str(&std::fs::read_to_string(&config.output_path).unwrap()).unwrap();
    assert_eq!(written.mem_usage, 60.0);
    assert_eq!(written.power_usage, 50.0);

    handle.shutdown().await;
}

/// Missing sources never stop the daemon
#[tokio::test(start_paused = true)]
async fn test_monitor_survives_missing_sources() {
    let dir = tempdir().unwrap();
    let config = MonitorConfig::default()
        .with_stat_path(dir.path().join("missing-stat"))
        .with_meminfo_path(dir.path().join("missing-meminfo"))
        .with_power_path(dir.path().join("missing-power"))
        .with_output_path(dir.path().join("metrics.json"));

    let handle = Monitor::new(config.clone()).spawn();
    tokio::time::sleep(Duration::from_millis(300)).await;

    let snapshot = handle.metrics().snapshot().await;
    assert_eq!(snapshot.cpu_usage, 0.0);
    assert_eq!(snapshot.mem_usage, 0.0);
    assert!((50.0..70.0).contains(&snapshot.power_usage));
    assert!(config.output_path.exists());

    handle.shutdown().await;
}

/// SystemError creation and formatting
#[test]
fn test_system_error_types() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let unavailable = SystemError::source_unavailable("/proc/stat", io);
    assert!(format!("{}", unavailable).contains("/proc/stat"));

    let malformed = SystemError::malformed("/proc/stat", "empty source");
    assert!(format!("{}", malformed).contains("empty source"));

    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let sink = SystemError::sink_unwritable("/tmp/metrics.json", io);
    assert!(format!("{}", sink).contains("Unable to write to /tmp/metrics.json"));

    let config_error = SystemError::config_error("Invalid configuration");
    assert!(format!("{}", config_error).contains("Invalid configuration"));
}

/// WebConfig builder pattern
#[test]
fn test_web_config() {
    let config = WebConfig::default()
        .with_host("127.0.0.1")
        .with_port(9090)
        .with_cors(false);

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9090);
    assert!(!config.enable_cors);
    assert_eq!(config.bind_address(), "127.0.0.1:9090");
    assert_eq!(
        config.metrics_path,
        std::path::PathBuf::from("/tmp/metrics.json")
    );
}
