//! Device position lookup for the "my location" entry point.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, time::Duration};

use crate::{config::Config, error::GeolocationError};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[async_trait]
pub trait PositionSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position taken from the user's configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredPosition {
    home: Option<Coordinates>,
    allowed: bool,
}

impl ConfiguredPosition {
    pub fn new(home: Option<Coordinates>, allowed: bool) -> Self {
        Self { home, allowed }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.home, config.share_location)
    }
}

#[async_trait]
impl PositionSource for ConfiguredPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        if !self.allowed {
            return Err(GeolocationError::PermissionDenied);
        }
        self.home.ok_or(GeolocationError::Unsupported)
    }
}

/// Ask `source` for a position once. Slow sources fail with [`GeolocationError::Timeout`];
/// there is no retry.
pub async fn locate(
    source: &dyn PositionSource,
    timeout: Duration,
) -> Result<Coordinates, GeolocationError> {
    match tokio::time::timeout(timeout, source.current_position()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Position lookup exceeded {:?}", timeout);
            Err(GeolocationError::Timeout)
        }
    }
}
