use std::sync::Arc;

use crate::{
    config_loader::GatewayConfig,
    errors::GatewayResult,
    upstream::UpstreamClient,
};

/// Shared, read-only state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    pub config: GatewayConfig,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self { config, upstream })
    }

    pub fn shared(config: GatewayConfig) -> GatewayResult<Arc<Self>> {
        Self::new(config).map(Arc::new)
    }
}
