use serde::de::DeserializeOwned;
use tracing::{error, info_span};

use crate::error::CollectError;

/// GET `url` with the given query pairs and headers, returning the raw body.
/// Non-2xx statuses are reported as `CollectError::Status` carrying the url.
pub fn get_text(url: &str, query: &[(&str, &str)], headers: &[(&str, &str)]) -> Result<String, CollectError> {
    let mut request = ureq::get(url);
    for (key, value) in query {
        request = request.query(*key, *value);
    }
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response_result = {
        let _span = info_span!("http_get", url = %url).entered();
        request.call()
    };
    let response = response_result.map_err(|e| {
        error!(error = %e, url = %url, "Request failed");
        match e {
            ureq::Error::StatusCode(status) => CollectError::Status { url: url.to_string(), status },
            other => CollectError::Http { url: url.to_string(), source: other },
        }
    })?;

    let mut body_reader = response.into_body();
    body_reader.read_to_string().map_err(|e| {
        error!(error = %e, url = %url, "Failed to read response body");
        CollectError::Http { url: url.to_string(), source: e }
    })
}

/// GET `url` and deserialize the JSON body into `T`.
pub fn get_json<T: DeserializeOwned>(
    url: &str,
    query: &[(&str, &str)],
    headers: &[(&str, &str)],
) -> Result<T, CollectError> {
    let body = get_text(url, query, headers)?;
    serde_json::from_str::<T>(&body).map_err(|e| {
        error!(error = %e, url = %url, "Failed to deserialize response");
        CollectError::json(url, e)
    })
}
