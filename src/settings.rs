use serde::{Deserialize, Serialize};

/// Runtime configuration, built from the command line and handed to every testcase by value.
#[derive(Debug, Clone, Copy, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Print `?` debug lines to stderr
    pub verbose: bool,
    /// Worker count for the challenge runner, [None] means one per logical CPU
    pub threads: Option<usize>,
}

pub const DEFAULT_SETTINGS: Settings = Settings {
    verbose: false,
    threads: None,
};

impl Settings {
    /// How many workers the challenge runner should spawn.
    pub fn worker_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

impl Default for Settings {
    fn default() -> Self {
        DEFAULT_SETTINGS
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_settings_default() {
        let s = Settings::default();
        assert!(!s.verbose);
        assert_eq!(s.threads, None);
        assert!(s.worker_count() >= 1);
    }

    #[test]
    fn test_settings_explicit_threads() {
        let s = Settings {
            verbose: true,
            threads: Some(3),
        };
        assert_eq!(s.worker_count(), 3);
    }
}
