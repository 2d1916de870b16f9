use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::alignment::domain::alignment_error::AlignmentError;
use crate::alignment::domain::alignment_writer::AlignmentWriter;
use crate::alignment::domain::validator::is_valid_alignment;

/// Top-level keys that survive export; anything else is silently dropped.
const EXPORTED_KEYS: &[&str] = &["words", "phonemes", "transcript", "whisper_segments"];

/// Reads and writes alignment records as pretty-printed UTF-8 JSON files.
pub struct JsonAlignmentStore;

impl JsonAlignmentStore {
    pub fn new() -> Self {
        Self
    }

    /// Persist an alignment record.
    ///
    /// The record is validated first; only the known top-level keys are
    /// written. Output is 2-space indented with non-ASCII characters kept
    /// verbatim. The destination is overwritten unconditionally.
    pub fn export(&self, data: &Value, path: &Path) -> Result<(), AlignmentError> {
        self.export_inner(data, path)
            .map_err(|e| AlignmentError::new(format!("failed to export JSON: {e}")))
    }

    fn export_inner(&self, data: &Value, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if !is_valid_alignment(data) {
            return Err("invalid alignment data structure".into());
        }

        // Selective passthrough: validated input is always an object here.
        let mut output = Map::new();
        if let Some(map) = data.as_object() {
            for key in EXPORTED_KEYS {
                if let Some(value) = map.get(*key) {
                    output.insert((*key).to_string(), value.clone());
                }
            }
        }

        let file = fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &Value::Object(output))?;
        Ok(())
    }

    /// Load an alignment record back from disk, validating its shape.
    pub fn load(&self, path: &Path) -> Result<Value, AlignmentError> {
        self.load_inner(path)
            .map_err(|e| AlignmentError::new(format!("failed to load JSON: {e}")))
    }

    fn load_inner(&self, path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let data: Value = serde_json::from_str(&contents)?;

        if !is_valid_alignment(&data) {
            return Err("invalid JSON structure".into());
        }

        Ok(data)
    }
}

impl Default for JsonAlignmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlignmentWriter for JsonAlignmentStore {
    fn write(&self, data: &Value, path: &Path) -> Result<(), AlignmentError> {
        self.export(data, path)
    }
}
