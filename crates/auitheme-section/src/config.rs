/// Default upper bound on the size of a project file accepted for loading: 64 MiB.
pub const DEFAULT_MAX_FILE_SIZE: usize = 64 * 1024 * 1024;

/// Default upper bound on the number of records decoded from one project.
///
/// An element section can be as short as its 4-byte prefix while the record
/// it decodes into is a few hundred bytes, so the byte limit alone does not
/// bound memory.
pub const DEFAULT_MAX_RECORDS: usize = 65_536;

/// Controls how project bytes are accepted for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConfig {
    /// Files larger than this are rejected before any decoding happens.
    pub max_file_size: usize,
    /// Element sections beyond this many records (across all collections)
    /// are skipped and counted as clamped.
    pub max_records: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

impl LoadConfig {
    /// Returns a copy with a different maximum file size.
    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Returns a copy with a different record limit.
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }
}
