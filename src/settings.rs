use serde::{Deserialize, Serialize};

/// How the challenges are run. None of this changes any result.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Log the intermediate steps of the algorithms.
    pub verbose: bool,
    /// Number of worker threads for the testcases, one per CPU if not set.
    pub threads: Option<usize>,
}

pub const DEFAULT_SETTINGS: Settings = Settings {
    verbose: false,
    threads: None,
};

impl Settings {
    /// The number of workers to actually spawn, never less than one.
    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}
