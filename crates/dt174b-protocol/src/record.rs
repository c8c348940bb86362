//! Raw log records.
//!
//! Records are handed out exactly as the device sent them. The only
//! presentation offered is a lowercase hex dump, one record per line.

use std::fmt;

/// One raw record read from the datalogger memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord(Vec<u8>);

impl LogRecord {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        LogRecord(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for LogRecord {
    fn from(bytes: Vec<u8>) -> Self {
        LogRecord(bytes)
    }
}

impl AsRef<[u8]> for LogRecord {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}
