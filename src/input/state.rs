//! Viewport state seam
//!
//! The controller re-reads the remote viewport before every decision. A read
//! may come back empty (page mid-navigation, URL not yet updated); that is a
//! retry signal, never an error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::constants::DEFAULT_STATE_PARAM;
use crate::core::geo::GeoPoint;
use crate::{Error, Result};

/// Observed center and zoom of the viewport at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub lat: f64,
    pub lon: f64,
    /// Fractional while the viewport animates
    pub zoom: f64,
}

impl ViewportState {
    pub fn new(lat: f64, lon: f64, zoom: f64) -> Self {
        Self { lat, lon, zoom }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// False if any field is NaN or infinite; such a state cannot be acted on
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite() && self.zoom.is_finite()
    }

    /// Zoom rounded to the nearest integer level
    pub fn zoom_level(&self) -> i64 {
        self.zoom.round() as i64
    }
}

#[async_trait]
pub trait ViewportStateReader: Send + Sync {
    /// Current state, or `None` when it cannot be determined right now
    async fn read(&self) -> Option<ViewportState>;
}

#[async_trait]
impl<T: ViewportStateReader + ?Sized> ViewportStateReader for std::sync::Arc<T> {
    async fn read(&self) -> Option<ViewportState> {
        (**self).read().await
    }
}

/// Anything that can report the URL currently shown by the viewport's page
#[async_trait]
pub trait UrlSource: Send + Sync {
    async fn current_url(&self) -> Option<String>;
}

/// Parses `lat,lon,zoom` out of query parameter `param` of `url`
pub fn try_parse_map_state(url: &str, param: &str) -> Result<ViewportState> {
    let parsed = Url::parse(url).map_err(|e| Error::StateParse(format!("{url}: {e}")))?;
    let raw = parsed
        .query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| Error::StateParse(format!("parameter '{param}' missing")))?;

    let fields = raw
        .split(',')
        .map(|field| field.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::StateParse(format!("'{raw}': {e}")))?;

    let [lat, lon, zoom] = fields[..] else {
        return Err(Error::StateParse(format!(
            "'{raw}': expected 3 fields, got {}",
            fields.len()
        )));
    };

    let state = ViewportState::new(lat, lon, zoom);
    if !state.center().is_valid() || !zoom.is_finite() || zoom < 0.0 {
        return Err(Error::StateParse(format!("'{raw}': out of range")));
    }
    Ok(state)
}

/// Like [`try_parse_map_state`], for callers that only care about presence
pub fn parse_map_state(url: &str, param: &str) -> Option<ViewportState> {
    match try_parse_map_state(url, param) {
        Ok(state) => Some(state),
        Err(e) => {
            log::trace!("no viewport state in url: {}", e);
            None
        }
    }
}

/// Reads viewport state from a query parameter of the page URL
pub struct UrlStateReader<S> {
    source: S,
    param: String,
}

impl<S: UrlSource> UrlStateReader<S> {
    pub fn new(source: S) -> Self {
        Self::with_param(source, DEFAULT_STATE_PARAM)
    }

    pub fn with_param(source: S, param: impl Into<String>) -> Self {
        Self {
            source,
            param: param.into(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<S: UrlSource> ViewportStateReader for UrlStateReader<S> {
    async fn read(&self) -> Option<ViewportState> {
        let url = self.source.current_url().await?;
        parse_map_state(&url, &self.param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedUrl(Mutex<Option<String>>);

    #[async_trait]
    impl UrlSource for FixedUrl {
        async fn current_url(&self) -> Option<String> {
            self.0.lock().ok()?.clone()
        }
    }

    #[test]
    fn test_parse_map_state() {
        let state =
            parse_map_state("https://maps.example.com/?ms=37.5665,126.978,15.4&x=1", "ms").unwrap();
        assert_eq!(state, ViewportState::new(37.5665, 126.978, 15.4));
        assert_eq!(state.zoom_level(), 15);
    }

    #[test]
    fn test_parse_percent_encoded_commas() {
        let state = parse_map_state("https://maps.example.com/p?ms=1.5%2C-2.25%2C10", "ms").unwrap();
        assert_eq!(state, ViewportState::new(1.5, -2.25, 10.0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for url in [
            "https://maps.example.com/",
            "https://maps.example.com/?ms=",
            "https://maps.example.com/?ms=1,2",
            "https://maps.example.com/?ms=1,2,3,4",
            "https://maps.example.com/?ms=a,b,c",
            "https://maps.example.com/?ms=95,0,3",
            "not a url",
        ] {
            assert!(parse_map_state(url, "ms").is_none(), "{url}");
        }
        assert!(matches!(
            try_parse_map_state("https://maps.example.com/?ms=1,2", "ms"),
            Err(Error::StateParse(_))
        ));
    }

    #[tokio::test]
    async fn test_url_state_reader() {
        let source = FixedUrl(Mutex::new(None));
        let reader = UrlStateReader::with_param(source, "view");
        assert_eq!(reader.read().await, None);

        *reader.source().0.lock().unwrap() =
            Some("https://maps.example.com/?view=48.8566,2.3522,12".to_string());
        assert_eq!(
            reader.read().await,
            Some(ViewportState::new(48.8566, 2.3522, 12.0))
        );
    }
}
