//! One-shot user positioning.
//!
//! Wraps a [`LocationSource`] with a bounded wait and a cache acceptance
//! window: a position younger than `maximum_age` is reused instead of
//! asking the source again. A failed lookup leaves the reference absent,
//! which every consumer tolerates.

use std::fmt;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::domain::Coordinate;

/// Errors from a location source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    /// This environment has no way to determine a position
    #[error("geolocation is not available")]
    Unavailable,

    /// The source did not answer in time
    #[error("position not determined within {0:?}")]
    Timeout(Duration),

    /// The source answered with an error
    #[error("position request failed: {0}")]
    Failed(String),
}

/// Something that can report the user's current position.
pub trait LocationSource: Send + Sync {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeoError>>;
}

impl<S: LocationSource + ?Sized> LocationSource for Box<S> {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeoError>> {
        (**self).locate()
    }
}

/// A source that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationSource for FixedLocation {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeoError>> {
        futures::future::ready(Ok(self.0)).boxed()
    }
}

/// A source for environments without positioning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl LocationSource for NoLocation {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeoError>> {
        futures::future::ready(Err(GeoError::Unavailable)).boxed()
    }
}

/// Outcome shown next to the station field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoStatus {
    Pending,
    Located,
    Failed,
    Unsupported,
}

impl fmt::Display for GeoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GeoStatus::Pending => "Определяем местоположение…",
            GeoStatus::Located => "Местоположение определено",
            GeoStatus::Failed => "Не удалось определить геолокацию",
            GeoStatus::Unsupported => "Геолокация недоступна",
        })
    }
}

/// Configuration for position requests.
#[derive(Debug, Clone)]
pub struct GeolocatorConfig {
    /// How long to wait for the source.
    pub timeout: Duration,
    /// How old a remembered position may be and still be reused.
    pub maximum_age: Duration,
}

impl Default for GeolocatorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(8),
            maximum_age: Duration::from_secs(5 * 60),
        }
    }
}

/// Position lookup with timeout and reuse of recent fixes.
pub struct Geolocator<S> {
    source: S,
    config: GeolocatorConfig,
    last_fix: Mutex<Option<(Instant, Coordinate)>>,
}

impl<S: LocationSource> Geolocator<S> {
    pub fn new(source: S, config: GeolocatorConfig) -> Self {
        Self {
            source,
            config,
            last_fix: Mutex::new(None),
        }
    }

    /// Current position, reusing a recent fix when one exists.
    pub async fn current_position(&self) -> Result<Coordinate, GeoError> {
        let mut last_fix = self.last_fix.lock().await;

        if let Some((at, coordinate)) = *last_fix
            && at.elapsed() <= self.config.maximum_age
        {
            debug!(%coordinate, "reusing recent position");
            return Ok(coordinate);
        }

        let coordinate = tokio::time::timeout(self.config.timeout, self.source.locate())
            .await
            .map_err(|_| GeoError::Timeout(self.config.timeout))??;

        *last_fix = Some((Instant::now(), coordinate));
        Ok(coordinate)
    }

    /// Position as an optional reference plus the status to display.
    pub async fn locate(&self) -> (Option<Coordinate>, GeoStatus) {
        match self.current_position().await {
            Ok(coordinate) => (Some(coordinate), GeoStatus::Located),
            Err(GeoError::Unavailable) => (None, GeoStatus::Unsupported),
            Err(e) => {
                warn!(error = %e, "could not determine position");
                (None, GeoStatus::Failed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
        delay: Duration,
    }

    impl Counting {
        fn new(delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
            }
        }
    }

    impl LocationSource for Counting {
        fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GeoError>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self.delay;
            async move {
                tokio::time::sleep(delay).await;
                Ok(Coordinate::new(55.75 + n as f64, 37.62).unwrap())
            }
            .boxed()
        }
    }

    #[test]
    fn default_config() {
        let config = GeolocatorConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(8));
        assert_eq!(config.maximum_age, Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_location_is_located() {
        let here = Coordinate::new(55.75, 37.62).unwrap();
        let geo = Geolocator::new(FixedLocation(here), GeolocatorConfig::default());
        assert_eq!(geo.locate().await, (Some(here), GeoStatus::Located));
    }

    #[tokio::test(start_paused = true)]
    async fn no_location_is_unsupported() {
        let geo = Geolocator::new(NoLocation, GeolocatorConfig::default());
        assert_eq!(geo.locate().await, (None, GeoStatus::Unsupported));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out() {
        let geo = Geolocator::new(
            Counting::new(Duration::from_secs(30)),
            GeolocatorConfig::default(),
        );

        let err = geo.current_position().await.unwrap_err();
        assert_eq!(err, GeoError::Timeout(Duration::from_secs(8)));
        assert_eq!(geo.locate().await.1, GeoStatus::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn recent_fix_is_reused() {
        let geo = Geolocator::new(Counting::new(Duration::ZERO), GeolocatorConfig::default());

        let first = geo.current_position().await.unwrap();
        tokio::time::sleep(Duration::from_secs(60)).await;
        let second = geo.current_position().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(geo.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_fix_is_refreshed() {
        let geo = Geolocator::new(Counting::new(Duration::ZERO), GeolocatorConfig::default());

        let first = geo.current_position().await.unwrap();
        tokio::time::sleep(Duration::from_secs(301)).await;
        let second = geo.current_position().await.unwrap();

        assert_ne!(first, second);
        assert_eq!(geo.source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn status_messages() {
        assert_eq!(GeoStatus::Located.to_string(), "Местоположение определено");
        assert_eq!(
            GeoStatus::Failed.to_string(),
            "Не удалось определить геолокацию"
        );
    }
}
