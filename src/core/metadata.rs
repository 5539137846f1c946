use crate::core::{TrackMetadata, TrackQuery, TrackResponse, SUCCESS_CODE};
use crate::utils::error::{Result, SongdlError};
use crate::utils::validation::Validate;
use reqwest::Client;
use url::Url;

const NO_AUDIO_URL: &str =
    "provider returned no audio URL, try another quality or result index";

/// Appends `word`, `n` and `q` to the endpoint. The keyword is percent-encoded.
pub fn build_query_url(api_endpoint: &str, query: &TrackQuery) -> Result<Url> {
    let params = [
        ("word", query.keyword.clone()),
        ("n", query.result_index.to_string()),
        ("q", query.quality_level.to_string()),
    ];

    Url::parse_with_params(api_endpoint, &params).map_err(|e| {
        SongdlError::usage(format!("invalid API endpoint '{}': {}", api_endpoint, e))
    })
}

/// Single GET against the metadata endpoint; no retries.
pub async fn fetch_metadata(
    client: &Client,
    api_endpoint: &str,
    query: &TrackQuery,
) -> Result<TrackMetadata> {
    query.validate()?;
    let url = build_query_url(api_endpoint, query)?;

    tracing::debug!("Making metadata request to: {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SongdlError::network("metadata", e))?;
    tracing::debug!("Metadata response status: {}", response.status());

    // 不看 HTTP 狀態碼，失敗原因以 body 裡的 code/msg 為準
    let body = response
        .text()
        .await
        .map_err(|e| SongdlError::network("metadata", e))?;

    parse_metadata(&body)
}

/// Decodes the envelope and applies the provider's status code.
pub fn parse_metadata(body: &str) -> Result<TrackMetadata> {
    let envelope: TrackResponse = serde_json::from_str(body)?;

    if envelope.code != SUCCESS_CODE {
        let message = if envelope.msg.is_empty() {
            format!("provider returned status {}", envelope.code)
        } else {
            envelope.msg
        };
        return Err(SongdlError::DomainError {
            code: envelope.code,
            message,
        });
    }

    match envelope.data {
        Some(metadata) if !metadata.audio_url.is_empty() => Ok(metadata),
        _ => Err(SongdlError::DomainError {
            code: envelope.code,
            message: NO_AUDIO_URL.to_string(),
        }),
    }
}
