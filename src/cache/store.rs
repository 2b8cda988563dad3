//! JSON cache files holding `{run_date, result}` entries
//!
//! Two layouts are supported: a single entry per file (cities) and an
//! object of entries keyed by name (menus per city).

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::{format_run_date, parse_run_date};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CacheEntry<T> {
    pub(crate) run_date: String,
    pub(crate) result: T,
}

impl<T> CacheEntry<T> {
    pub(crate) fn new(result: T, now: DateTime<Utc>) -> Self {
        Self {
            run_date: format_run_date(now),
            result,
        }
    }

    /// Usable only while `now < run_date + ttl`; an unreadable date is stale
    pub(crate) fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        parse_run_date(&self.run_date)
            .and_then(|fetched| fetched.checked_add_signed(ttl))
            .is_some_and(|expires| now < expires)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let file = File::open(path).ok()?;
    serde_json::from_reader(io::BufReader::new(file)).ok()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = io::BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()
}

pub(crate) fn load_fresh<T: DeserializeOwned>(
    path: &Path,
    now: DateTime<Utc>,
    ttl: TimeDelta,
) -> Option<T> {
    let entry: CacheEntry<T> = read_json(path)?;
    entry.is_fresh(now, ttl).then_some(entry.result)
}

pub(crate) fn save<T: Serialize>(path: &Path, result: &T, now: DateTime<Utc>) -> io::Result<()> {
    write_json(path, &CacheEntry::new(result, now))
}

/// Raw keyed file. Entries that do not decode as the caller's type are kept
/// as-is so rewriting one key never loses another.
fn read_keyed(path: &Path) -> Map<String, Value> {
    read_json(path).unwrap_or_default()
}

pub(crate) fn load_fresh_keyed<T: DeserializeOwned>(
    path: &Path,
    key: &str,
    now: DateTime<Utc>,
    ttl: TimeDelta,
) -> Option<T> {
    let mut entries = read_keyed(path);
    let raw = entries.remove(key)?;
    let entry: CacheEntry<T> = serde_json::from_value(raw).ok()?;
    entry.is_fresh(now, ttl).then_some(entry.result)
}

pub(crate) fn save_keyed<T: Serialize>(
    path: &Path,
    key: &str,
    result: &T,
    now: DateTime<Utc>,
) -> io::Result<()> {
    let mut entries = read_keyed(path);
    let entry = serde_json::to_value(CacheEntry::new(result, now))?;
    entries.insert(key.to_string(), entry);
    write_json(path, &entries)
}
