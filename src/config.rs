use serde::Deserialize;

use crate::window::DEFAULT_WINDOW_CAPACITY;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConfig {
    /// Samples kept for the heap pool (collection notifications).
    #[serde(default = "default_window_capacity")]
    pub heap_capacity: usize,
    /// Samples kept for the non-heap pool (polling).
    #[serde(default = "default_window_capacity")]
    pub non_heap_capacity: usize,
}

fn default_window_capacity() -> usize {
    DEFAULT_WINDOW_CAPACITY
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            heap_capacity: default_window_capacity(),
            non_heap_capacity: default_window_capacity(),
        }
    }
}

impl StatsConfig {
    /// Parse and validate config from a TOML string. The caller owns reading the file.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: StatsConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.window.heap_capacity > 0,
            "window.heap_capacity must be > 0, got {}",
            self.window.heap_capacity
        );
        anyhow::ensure!(
            self.window.non_heap_capacity > 0,
            "window.non_heap_capacity must be > 0, got {}",
            self.window.non_heap_capacity
        );
        Ok(())
    }
}
