//! Server Configuration

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub bind: String,

    /// Port number
    pub port: u16,

    /// Result count used when a query gives no explicit limit
    pub default_limit: usize,

    /// Upper bound on any requested limit
    pub max_limit: usize,

    /// Maximum concurrent searches (0 = auto-detect)
    pub query_workers: usize,

    /// Longest accepted request line in bytes
    pub max_line_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 7878,
            default_limit: 10,
            max_limit: 1000,
            query_workers: 0, // Auto-detect (num_cores)
            max_line_length: 4096,
        }
    }
}

impl Config {
    /// Set custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set custom bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Set the default result limit
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the maximum result limit
    pub fn with_max_limit(mut self, limit: usize) -> Self {
        self.max_limit = limit;
        self
    }

    /// Set the number of concurrent searches
    pub fn with_query_workers(mut self, workers: usize) -> Self {
        self.query_workers = workers;
        self
    }

    /// Concurrent search slots after auto-detection
    pub fn effective_query_workers(&self) -> usize {
        if self.query_workers == 0 {
            num_cpus::get()
        } else {
            self.query_workers
        }
    }

    /// Resolve a requested limit against the defaults
    pub fn resolve_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = Config::default()
            .with_bind("127.0.0.1")
            .with_port(9000)
            .with_default_limit(5)
            .with_max_limit(20)
            .with_query_workers(3);

        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.effective_query_workers(), 3);
        assert_eq!(config.resolve_limit(None), 5);
        assert_eq!(config.resolve_limit(Some(7)), 7);
        assert_eq!(config.resolve_limit(Some(500)), 20);
    }

    #[test]
    fn test_auto_workers() {
        assert!(Config::default().effective_query_workers() >= 1);
    }
}
