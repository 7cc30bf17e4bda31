use log::{debug, info, warn};

/// Thin wrapper over the `log` facade that tags every line with its source.
#[derive(Debug, Clone)]
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.target, message);
    }

    pub fn trace_detail(&self, message: &str) {
        debug!("[{}] {}", self.target, message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.target, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("dashboard")
    }
}
