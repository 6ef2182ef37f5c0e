use thiserror::Error;

/// Failures that abort a dashboard load.
///
/// Best-effort lookups (air quality, reverse geocoding) never produce one of
/// these; they are recorded as [`crate::Degradation`] on the snapshot instead.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("No location found for '{0}'")]
    NotFound(String),

    #[error("Forecast unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

impl DashboardError {
    /// Text shown to the user in place of the dashboard.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) | Self::Unavailable(_) => {
                "Stadt nicht gefunden oder Fehler beim Laden der Daten."
            }
            Self::Geolocation(err) => err.user_message(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location service unavailable")]
    Unsupported,
}

impl GeolocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => {
                "Zugriff auf Standort abgelehnt. Bitte Freigabe in der Konfiguration erteilen."
            }
            Self::Timeout => "Standortabfrage hat zu lange gedauert.",
            Self::Unsupported => "Standortbestimmung wird nicht unterstützt. Bitte Heimatkoordinaten konfigurieren.",
        }
    }
}
