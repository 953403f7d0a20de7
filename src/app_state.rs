use crate::Config;
use crate::order::OrderClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Process-wide state. Read-only once the server is running.
#[derive(Clone)]
pub struct AppState {
    pub order_client: Arc<OrderClient>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let device_id = config.resolve_device_id();
        let order_client = OrderClient::new(&config.upstream_url, &device_id, config.timeout())?;

        info!(
            %device_id,
            upstream = %config.upstream_url,
            timeout_secs = config.timeout_secs,
            "Order client ready"
        );

        Ok(Self {
            order_client: Arc::new(order_client),
            static_dir: PathBuf::from(&config.static_dir),
        })
    }

    pub fn device_id(&self) -> &str {
        self.order_client.device_id()
    }

    pub fn static_dir(&self) -> &Path {
        self.static_dir.as_path()
    }
}
