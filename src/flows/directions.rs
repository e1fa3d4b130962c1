//! Routes between two free-text addresses

use std::fmt;
use thiserror::Error;
use tracing::{info, instrument, warn};

use super::TripPlanner;
use crate::google::ApiError;
use crate::models::{Activity, DirectionsResult, GeoPoint};

/// Which end of a route a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEnd {
    Origin,
    Destination,
}

impl fmt::Display for RouteEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteEnd::Origin => f.write_str("origin"),
            RouteEnd::Destination => f.write_str("destination"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("Origin or destination address missing for route calculation.")]
    MissingAddress,

    #[error("Could not find coordinates for {side}: {address}")]
    Unresolved { side: RouteEnd, address: String },

    #[error("Failed to geocode {side}: {source}")]
    Geocoding {
        side: RouteEnd,
        #[source]
        source: ApiError,
    },

    #[error("Failed to get directions from the service: {0}")]
    Route(#[source] ApiError),
}

impl DirectionsError {
    /// The end that failed, `None` when the route itself failed
    #[must_use]
    pub fn side(&self) -> Option<RouteEnd> {
        match self {
            DirectionsError::Unresolved { side, .. } | DirectionsError::Geocoding { side, .. } => {
                Some(*side)
            }
            DirectionsError::MissingAddress | DirectionsError::Route(_) => None,
        }
    }
}

impl TripPlanner {
    /// Geocode both addresses concurrently, then route between them
    #[instrument(skip(self))]
    pub async fn directions(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<DirectionsResult, DirectionsError> {
        if origin.trim().is_empty() || destination.trim().is_empty() {
            return Err(DirectionsError::MissingAddress);
        }

        let (from, to) = futures::join!(self.maps.geocode(origin), self.maps.geocode(destination));
        let from = resolved(RouteEnd::Origin, origin, from)?;
        let to = resolved(RouteEnd::Destination, destination, to)?;

        let route = self.maps.directions(from, to).await.map_err(|e| {
            warn!(error = %e, "route lookup failed");
            DirectionsError::Route(e)
        })?;
        info!(summary = %route.summary, "route found");
        Ok(route)
    }

    /// Route from one itinerary activity to the next, using their addresses
    pub async fn directions_between(
        &self,
        from: &Activity,
        to: &Activity,
    ) -> Result<DirectionsResult, DirectionsError> {
        match (from.address.as_deref(), to.address.as_deref()) {
            (Some(origin), Some(destination)) => self.directions(origin, destination).await,
            _ => Err(DirectionsError::MissingAddress),
        }
    }
}

fn resolved(
    side: RouteEnd,
    address: &str,
    result: Result<Option<GeoPoint>, ApiError>,
) -> Result<GeoPoint, DirectionsError> {
    match result {
        Ok(Some(point)) => Ok(point),
        Ok(None) => {
            warn!(%side, address, "address could not be geocoded");
            Err(DirectionsError::Unresolved {
                side,
                address: address.to_string(),
            })
        }
        Err(source) => {
            warn!(%side, error = %source, "geocoding failed");
            Err(DirectionsError::Geocoding { side, source })
        }
    }
}
