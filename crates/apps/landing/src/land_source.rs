use formats::{LandCollection, LandDataError};
use gloo_net::http::Request;
use thiserror::Error;

/// Why the land map could not be shown. The `Display` text is what the
/// error view prints.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load land map data: {0}")]
    Request(#[from] gloo_net::Error),
    #[error("Failed to load land map data: server answered {status} {status_text}")]
    Status { status: u16, status_text: String },
    #[error("Failed to load land map data: {0}")]
    Parse(#[from] LandDataError),
}

/// Fetches and parses the land GeoJSON. One attempt, no retry.
pub async fn fetch_land(url: &str) -> Result<LandCollection, LoadError> {
    tracing::debug!(url, "fetching land data");
    let response = Request::get(url).send().await?;
    if !response.ok() {
        return Err(LoadError::Status {
            status: response.status(),
            status_text: response.status_text(),
        });
    }
    let body = response.text().await?;
    Ok(LandCollection::from_geojson_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_headline() {
        let err = LoadError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load land map data: server answered 404 Not Found"
        );

        let err = LoadError::from(LandDataError::NotAFeatureCollection);
        assert!(err.to_string().starts_with("Failed to load land map data: "));
    }
}
