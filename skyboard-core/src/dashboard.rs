//! Application state: the single current snapshot and the requests that replace it.
//!
//! Every load takes a [`RequestToken`]. A finished load only replaces the state
//! if no newer load has started in the meantime, so overlapping searches
//! resolve as "latest request wins" regardless of completion order.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::sync::watch;

use crate::{
    error::DashboardError,
    model::{Location, WeatherSnapshot},
    position::{Coordinates, PositionSource, locate},
    provider::WeatherProvider,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadRequest {
    City(String),
    Coordinates(Coordinates),
}

/// Message shown for a failed load; `request` is `None` when no location was reached.
pub fn failure_message(request: Option<&LoadRequest>, err: &DashboardError) -> &'static str {
    match (request, err) {
        (_, DashboardError::Geolocation(geo)) => geo.user_message(),
        (Some(LoadRequest::Coordinates(_)), _) => "Konnte Standortdaten nicht laden.",
        _ => err.user_message(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, Default)]
pub enum DashboardState {
    #[default]
    Idle,
    Loading(RequestToken),
    Ready(Arc<WeatherSnapshot>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Applied(Arc<WeatherSnapshot>),
    /// A newer request started before this one finished; its result was dropped.
    Superseded,
}

/// Resolve `request` to a location and fetch its snapshot.
pub async fn fetch(
    provider: &dyn WeatherProvider,
    request: &LoadRequest,
) -> Result<WeatherSnapshot, DashboardError> {
    let location = match request {
        LoadRequest::City(query) => provider.resolve_by_name(query).await?,
        LoadRequest::Coordinates(c) => Location::from_coordinates(c.latitude, c.longitude),
    };
    provider.fetch_snapshot(&location).await
}

#[derive(Debug)]
pub struct Dashboard {
    provider: Arc<dyn WeatherProvider>,
    latest: AtomicU64,
    state: watch::Sender<DashboardState>,
}

impl Dashboard {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        let (state, _) = watch::channel(DashboardState::Idle);
        Self {
            provider,
            latest: AtomicU64::new(0),
            state,
        }
    }

    /// Receive every wholesale state replacement.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Start a new request, superseding any in flight.
    pub fn begin(&self) -> RequestToken {
        let token = RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        self.state.send_replace(DashboardState::Loading(token));
        token
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }

    /// Publish the outcome of `token` unless a newer request has begun.
    pub fn apply(
        &self,
        token: RequestToken,
        request: Option<&LoadRequest>,
        outcome: Result<WeatherSnapshot, DashboardError>,
    ) -> Result<LoadOutcome, DashboardError> {
        let (next, result) = match outcome {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                (
                    DashboardState::Ready(Arc::clone(&snapshot)),
                    Ok(LoadOutcome::Applied(snapshot)),
                )
            }
            Err(err) => (
                DashboardState::Failed(failure_message(request, &err).to_string()),
                Err(err),
            ),
        };

        let applied = self.state.send_if_modified(|state| {
            if self.is_latest(token) {
                *state = next;
                true
            } else {
                false
            }
        });

        if applied {
            result
        } else {
            tracing::debug!("Dropping result of superseded request {:?}", token);
            Ok(LoadOutcome::Superseded)
        }
    }

    pub async fn load(&self, request: LoadRequest) -> Result<LoadOutcome, DashboardError> {
        let token = self.begin();
        let outcome = fetch(self.provider.as_ref(), &request).await;
        self.apply(token, Some(&request), outcome)
    }

    /// Load the weather at the position reported by `source`. Position errors
    /// are published like any other failure and are not retried.
    pub async fn load_here(
        &self,
        source: &dyn PositionSource,
        timeout: Duration,
    ) -> Result<LoadOutcome, DashboardError> {
        let token = self.begin();
        match locate(source, timeout).await {
            Ok(coordinates) => {
                let request = LoadRequest::Coordinates(coordinates);
                let outcome = fetch(self.provider.as_ref(), &request).await;
                self.apply(token, Some(&request), outcome)
            }
            Err(err) => self.apply(token, None, Err(err.into())),
        }
    }
}

/// One entry of the featured cities board.
#[derive(Debug, Clone)]
pub struct CityTile {
    pub query: String,
    pub snapshot: Option<WeatherSnapshot>,
}

/// Fetch each city in turn. A failing city yields an empty tile and does not
/// stop the rest of the board.
pub async fn load_board(provider: &dyn WeatherProvider, cities: &[String]) -> Vec<CityTile> {
    let mut tiles = Vec::with_capacity(cities.len());
    for city in cities {
        let snapshot = match fetch(provider, &LoadRequest::City(city.clone())).await {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!("Featured city '{}' unavailable: {}", city, err);
                None
            }
        };
        tiles.push(CityTile {
            query: city.clone(),
            snapshot,
        });
    }
    tiles
}
