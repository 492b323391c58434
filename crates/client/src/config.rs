use std::time::Duration;

/// Where the service lives and how the views pace their feedback.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service API root, e.g. `http://localhost:8001/api`.
    pub base_url: String,
    pub request_timeout: Duration,
    /// Lifetime of transient list notifications.
    pub notification_ttl: Duration,
    /// Pause between a successful save and returning to the list.
    pub redirect_delay: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001/api".to_string(),
            request_timeout: Duration::from_secs(10),
            notification_ttl: Duration::from_secs(3),
            redirect_delay: Duration::from_millis(1500),
        }
    }
}
