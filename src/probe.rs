//! Runtime introspection for the informational endpoints.
//!
//! Wraps `sysinfo` for hostname and resident memory, jemalloc statistics for the
//! heap, and `chrono` for timestamps. None of these calls can fail from the
//! caller's point of view: if the OS or allocator refuses to answer, the probe
//! logs a warning and reports an empty or zero value.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};

/// Memory footprint of the current process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    /// Resident set size
    pub rss: u64,
    /// Bytes in active heap pages held by the allocator
    pub heap_total: u64,
    /// Bytes currently allocated by the application
    pub heap_used: u64,
    /// Memory held outside the allocator on behalf of the application; always 0
    pub external: u64,
}

/// Heap figures as reported by the global allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapStats {
    pub total: u64,
    pub used: u64,
}

/// Current UTC time as an ISO-8601 string with millisecond precision and a `Z` suffix.
pub fn timestamp_now() -> String {
    format_timestamp(Utc::now())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Hostname of the machine (or container) the service runs on.
pub fn host_name() -> String {
    System::host_name().unwrap_or_else(|| {
        tracing::warn!("Unable to determine hostname");
        String::new()
    })
}

/// Snapshot of this process's memory usage.
pub fn process_memory() -> MemoryUsage {
    let heap = heap_stats();
    MemoryUsage {
        rss: resident_set_size(),
        heap_total: heap.total,
        heap_used: heap.used,
        external: 0,
    }
}

/// Resident set size of the current process.
///
/// Builds a fresh `System` per call so concurrent requests share nothing.
fn resident_set_size() -> u64 {
    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            tracing::warn!(error = %e, "Unable to determine current PID");
            return 0;
        }
    };

    let mut system = System::new();
    system.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_memory(),
    );

    match system.process(pid) {
        Some(process) => process.memory(),
        None => {
            tracing::warn!(%pid, "Current process not visible to sysinfo");
            0
        }
    }
}

/// Read jemalloc's active and allocated byte counters.
///
/// The counters are cached by jemalloc, so the epoch is advanced first.
#[cfg(not(target_env = "msvc"))]
pub fn heap_stats() -> HeapStats {
    use tikv_jemalloc_ctl::{epoch, stats};

    let read = || -> Result<HeapStats, tikv_jemalloc_ctl::Error> {
        epoch::advance()?;
        Ok(HeapStats {
            total: stats::active::read()? as u64,
            used: stats::allocated::read()? as u64,
        })
    };

    read().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unable to read allocator statistics");
        HeapStats::default()
    })
}

#[cfg(target_env = "msvc")]
pub fn heap_stats() -> HeapStats {
    HeapStats::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_matches_javascript_iso_string() {
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(format_timestamp(at), "2024-03-05T07:08:09.042Z");
    }

    #[test]
    fn timestamp_now_parses_as_rfc3339() {
        let ts = timestamp_now();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2024-03-05T07:08:09.042Z".len());
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn memory_snapshot_reports_resident_pages() {
        let memory = process_memory();
        // A running test binary always has some resident memory.
        assert!(memory.rss > 0);
        assert_eq!(memory.external, 0);
    }

    #[cfg(not(target_env = "msvc"))]
    #[test]
    fn heap_stats_track_live_allocations() {
        let block = std::hint::black_box(vec![7u8; 4 * 1024 * 1024]);
        let heap = heap_stats();
        assert!(heap.used >= block.len() as u64);
        assert!(heap.total >= heap.used);
        drop(block);
    }

    #[test]
    fn memory_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(MemoryUsage {
            rss: 10,
            heap_total: 20,
            heap_used: 15,
            external: 0,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "rss": 10, "heapTotal": 20, "heapUsed": 15, "external": 0 })
        );
    }
}
