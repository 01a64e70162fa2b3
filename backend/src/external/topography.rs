//! OpenTopoData terrain elevation client

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::Coordinates;

use super::ProviderError;

/// Terrain elevation lookup client
#[derive(Clone)]
pub struct TopographyClient {
    client: Client,
    base_url: String,
    dataset: String,
}

/// Elevation of one point, as returned to the map client
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Elevation {
    #[serde(rename = "latitud")]
    pub lat: f64,
    #[serde(rename = "longitud")]
    pub lon: f64,
    #[serde(rename = "elevacion_m")]
    pub elevation_m: f64,
    #[serde(rename = "fuente")]
    pub source: String,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: Option<f64>,
}

impl TopographyClient {
    pub fn new(base_url: String, dataset: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            dataset,
        })
    }

    /// Elevation at `coordinates`; `None` when the dataset has no value there
    pub async fn elevation(&self, coordinates: Coordinates) -> Result<Option<Elevation>, ProviderError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), self.dataset);
        let locations = format!("{},{}", coordinates.lat, coordinates.lng);

        let response = self
            .client
            .get(&url)
            .query(&[("locations", locations)])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let data: LookupResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(self.first_elevation(data, coordinates))
    }

    fn first_elevation(&self, data: LookupResponse, coordinates: Coordinates) -> Option<Elevation> {
        let elevation_m = data.results.first()?.elevation?;
        Some(Elevation {
            lat: coordinates.lat,
            lon: coordinates.lng,
            elevation_m,
            source: format!("OpenTopoData ({})", self.dataset),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TopographyClient {
        TopographyClient::new(
            "http://localhost/v1".to_string(),
            "aster30m".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_first_elevation() {
        let data: LookupResponse = serde_json::from_str(
            r#"{"status": "OK", "results": [{"dataset": "aster30m", "elevation": 412.0,
                "location": {"lat": -45.5, "lng": -72.0}}]}"#,
        )
        .unwrap();

        let elevation = client()
            .first_elevation(data, Coordinates::new(-45.5, -72.0))
            .unwrap();
        assert_eq!(elevation.elevation_m, 412.0);
        assert_eq!(elevation.source, "OpenTopoData (aster30m)");
    }

    #[test]
    fn test_missing_elevation_is_none() {
        let point = Coordinates::new(-45.5, -72.0);
        let empty: LookupResponse = serde_json::from_str(r#"{"status": "OK", "results": []}"#).unwrap();
        assert!(client().first_elevation(empty, point).is_none());

        let null: LookupResponse =
            serde_json::from_str(r#"{"results": [{"elevation": null}]}"#).unwrap();
        assert!(client().first_elevation(null, point).is_none());
    }
}
