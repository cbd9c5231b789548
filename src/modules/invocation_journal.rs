// invocation_journal.rs - Per-invocation records in JSONL format
// Lets automated test harnesses check what each script actually received

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use serde::{Serialize, Deserialize};

/// What one script invocation saw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRecord {
    pub timestamp: u64,            // Unix timestamp of the invocation
    pub script: String,
    pub method: String,
    pub query_string: String,
    pub content_length: Option<String>, // Raw CONTENT_LENGTH as declared
    pub body_bytes: usize,         // Bytes actually read
    pub body_outcome: String,      // complete, truncated, timed_out or not_read
    pub degradations: Vec<String>,
}

impl InvocationRecord {
    /// Start a record stamped with the current time
    pub fn now(script: &str, method: &str, query_string: &str, content_length: Option<&str>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        Self {
            timestamp,
            script: script.to_string(),
            method: method.to_string(),
            query_string: query_string.to_string(),
            content_length: content_length.map(str::to_string),
            body_bytes: 0,
            body_outcome: "not_read".to_string(),
            degradations: Vec::new(),
        }
    }
}

/// Append one record as a JSON line
pub fn append_record(journal_file: &Path, record: &InvocationRecord) -> Result<(), String> {
    let mut json_line = serde_json::to_string(record)
        .map_err(|e| format!("Failed to serialize invocation record: {}", e))?;
    json_line.push('\n');

    if let Some(parent) = journal_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| {
                format!("Failed to create journal directory '{}': {} (os error {})",
                       parent.display(), e, e.raw_os_error().unwrap_or(0))
            })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(journal_file)
        .map_err(|e| format!("Failed to open journal '{}': {}", journal_file.display(), e))?;

    // One write per line so concurrent invocations do not interleave
    file.write_all(json_line.as_bytes())
        .map_err(|e| format!("Failed to write journal '{}': {}", journal_file.display(), e))?;

    Ok(())
}

/// Read every record back, skipping lines that do not parse
#[cfg(test)]
fn load_records(journal_file: &Path) -> Result<Vec<InvocationRecord>, String> {
    if !journal_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(journal_file)
        .map_err(|e| format!("Failed to read journal: {}", e))?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<InvocationRecord>(line).ok())
        .collect())
}
