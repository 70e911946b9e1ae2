use super::report::DashboardReport;
use super::selection::FilterSelection;
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Identity of an uploaded export: its byte length plus a digest of its content.
/// Two uploads share a fingerprint only if both the length and the digest agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DatasetFingerprint {
    len: usize,
    digest: u64,
}

impl DatasetFingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Self {
            len: bytes.len(),
            digest: hasher.finish(),
        }
    }

    pub fn byte_len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for DatasetFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}:{}", self.digest, self.len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub dataset: DatasetFingerprint,
    pub selection: FilterSelection,
}

impl ReportKey {
    pub fn new(dataset: DatasetFingerprint, selection: FilterSelection) -> Self {
        Self { dataset, selection }
    }
}

#[derive(Clone)]
struct CachedReport {
    report: Arc<DashboardReport>,
    created_at: Instant,
}

/// Memoizes computed reports for the presentation layer. The engine never reads it.
pub struct ReportCache {
    ttl: Duration,
    max_entries: usize,
    entries: HashMap<ReportKey, CachedReport>,
}

impl ReportCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &ReportKey) -> Option<Arc<DashboardReport>> {
        self.evict_expired();
        self.entries.get(key).map(|entry| entry.report.clone())
    }

    pub fn insert(&mut self, key: ReportKey, report: Arc<DashboardReport>) {
        if self.max_entries == 0 {
            return;
        }

        self.evict_expired();
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            if let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(key, _)| key.clone())
            {
                self.entries.remove(&victim);
            }
        }

        self.entries.insert(
            key,
            CachedReport {
                report,
                created_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_expired(&mut self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| entry.created_at.elapsed() <= ttl);
    }
}
