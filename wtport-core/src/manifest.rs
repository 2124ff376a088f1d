// wtport-core/src/manifest.rs
//! Artifact manifest bookkeeping.
//!
//! The manifest is a small JSON document listing every distributable artifact
//! with its SHA-256. It is updated with a load-merge-save cycle: the merge is a
//! pure function over the in-memory document, and everything the tool does not
//! own (unknown top-level keys, unrelated or hand-written artifact entries) is
//! carried through untouched and in its original order.
//!
//! License: MIT OR APACHE 2.0

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{PortableError, Result};
use crate::paths::ensure_parent;

pub const MANIFEST_VERSION: &str = "1.0.0";
pub const DEFAULT_SOURCE_MACHINE: &str = "sanitized";
/// `generated_at` format, e.g. `2024-05-01T12:00:00Z`.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const ARTIFACTS_KEY: &str = "artifacts";

/// One tracked artifact. `path` is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub path: String,
    pub sha256: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, sha256: impl Into<String>) -> Self {
        Self { name: name.into(), path: path.into(), sha256: sha256.into() }
    }
}

/// The manifest root document.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    doc: Map<String, Value>,
}

impl Manifest {
    /// A fresh document with no artifacts.
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        let mut doc = Map::new();
        doc.insert("version".into(), Value::String(MANIFEST_VERSION.into()));
        doc.insert(
            "generated_at".into(),
            Value::String(generated_at.format(GENERATED_AT_FORMAT).to_string()),
        );
        doc.insert("source_machine".into(), Value::String(DEFAULT_SOURCE_MACHINE.into()));
        doc.insert(ARTIFACTS_KEY.into(), Value::Array(Vec::new()));
        Self { doc }
    }

    /// Parses manifest text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| PortableError::data(origin, format!("not valid JSON: {}", e)))?;
        match value {
            Value::Object(doc) => Ok(Self { doc }),
            other => Err(PortableError::data(
                origin,
                format!("expected a JSON object at the top level, found {}", json_kind(&other)),
            )),
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.doc.get(key).and_then(Value::as_str)
    }

    pub fn version(&self) -> Option<&str> {
        self.str_field("version")
    }

    pub fn generated_at(&self) -> Option<&str> {
        self.str_field("generated_at")
    }

    pub fn source_machine(&self) -> Option<&str> {
        self.str_field("source_machine")
    }

    /// Raw artifact items, including any the tool does not recognise.
    pub fn artifacts(&self) -> &[Value] {
        match self.doc.get(ARTIFACTS_KEY) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Well-formed artifact entries, in order. Malformed items are skipped.
    pub fn entries(&self) -> Vec<ManifestEntry> {
        self.artifacts()
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    }

    pub fn entry_for(&self, path: &str) -> Option<ManifestEntry> {
        self.entries().into_iter().find(|e| e.path == path)
    }

    pub fn tracks(&self, path: &str) -> bool {
        self.artifacts().iter().any(|item| item_path(item) == Some(path))
    }

    /// Paths of every artifact item that has one, in document order.
    pub fn tracked_paths(&self) -> Vec<&str> {
        self.artifacts().iter().filter_map(item_path).collect()
    }

    /// Replaces any entry with the same `path` and appends `entry` at the end.
    pub fn upsert(&mut self, entry: &ManifestEntry) -> Result<()> {
        // Mutate the slot in place so the key keeps its position in the document.
        let slot = self
            .doc
            .entry(ARTIFACTS_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        let current = match std::mem::take(slot) {
            Value::Array(items) => items,
            other => {
                debug!("Manifest `artifacts` was {}, starting a new list", json_kind(&other));
                Vec::new()
            }
        };
        *slot = Value::Array(upsert_artifacts(current, entry)?);
        Ok(())
    }

    /// Pretty JSON (2-space indent) with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&self.doc)?;
        text.push('\n');
        Ok(text)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.doc
    }
}

fn item_path(item: &Value) -> Option<&str> {
    item.as_object()?.get("path")?.as_str()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The "remove by key, then append" policy over the raw artifact list.
pub fn upsert_artifacts(artifacts: Vec<Value>, entry: &ManifestEntry) -> Result<Vec<Value>> {
    let mut merged: Vec<Value> = artifacts
        .into_iter()
        .filter(|item| item_path(item) != Some(entry.path.as_str()))
        .collect();
    merged.push(serde_json::to_value(entry)?);
    Ok(merged)
}

/// Merges `entry` into an existing manifest, or starts a new one stamped `now`.
pub fn upsert_entry(existing: Option<Manifest>, entry: &ManifestEntry, now: DateTime<Utc>) -> Result<Manifest> {
    let mut manifest = existing.unwrap_or_else(|| Manifest::new(now));
    manifest.upsert(entry)?;
    Ok(manifest)
}

/// Reads the manifest at `path`; `Ok(None)` when the file does not exist.
pub fn load_manifest(path: &Path) -> Result<Option<Manifest>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    Manifest::parse(&text, path).map(Some)
}

/// Writes the manifest, creating parent directories as needed.
pub fn save_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, manifest.to_json_pretty()?)?;
    Ok(())
}

/// Whether one expected artifact path is listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingCheck {
    pub path: String,
    pub tracked: bool,
}

/// Checks each `expected` path against the manifest, in the given order.
pub fn validate_manifest(manifest: &Manifest, expected: &[&str]) -> Vec<TrackingCheck> {
    expected
        .iter()
        .map(|path| TrackingCheck { path: (*path).to_string(), tracked: manifest.tracks(path) })
        .collect()
}

/// Load-merge-save in one step.
pub fn record_artifact(manifest_path: &Path, entry: &ManifestEntry, now: DateTime<Utc>) -> Result<Manifest> {
    let existing = load_manifest(manifest_path)?;
    let manifest = upsert_entry(existing, entry, now)?;
    save_manifest(manifest_path, &manifest)?;
    debug!("Recorded '{}' in manifest {}", entry.path, manifest_path.display());
    Ok(manifest)
}
