use std::path::Path;

use serde_json::Value;

use super::alignment_error::AlignmentError;

/// Domain interface for persisting an alignment record.
pub trait AlignmentWriter: Send {
    /// Validate and write the record to the given path, overwriting any
    /// existing file.
    fn write(&self, data: &Value, path: &Path) -> Result<(), AlignmentError>;
}
