use std::path::Path;

use tracing::{error, info, info_span, instrument};

use crate::config::{Credentials, TWITCH_TOKEN_URL, TWITCH_USERS_URL};
use crate::error::CollectError;
use crate::export;
use crate::http;
use crate::model::Envelope;
use crate::model::twitch::{TokenResponse, TwitchUser};

/// Access token from the `token_path` cache, or a fresh client-credentials token
/// from `token_url` that is then cached at `token_path`.
#[instrument(level = "info", skip_all, fields(url = token_url))]
pub fn get_token(token_url: &str, credentials: &Credentials, token_path: &Path) -> Result<String, CollectError> {
    if let Some(token) = cached_token(token_path) {
        info!("Using cached Twitch token");
        return Ok(token);
    }

    let body = request_token(token_url, credentials.client_id()?, credentials.client_secret()?)?;
    let reply: TokenResponse = serde_json::from_str(&body).map_err(|e| CollectError::json(token_url, e))?;
    // 2xx without `access_token` counts as a rejection
    let token = reply.access_token.clone().ok_or_else(|| CollectError::Auth(body.clone()))?;

    let cache = serde_json::to_string_pretty(&reply).map_err(|e| CollectError::json(token_url, e))?;
    std::fs::write(token_path, cache)?;
    info!(path = %token_path.display(), "New Twitch token cached");
    Ok(token)
}

/// The `access_token` of a previously cached reply. Unreadable caches count as absent.
pub fn cached_token(token_path: &Path) -> Option<String> {
    let body = std::fs::read_to_string(token_path).ok()?;
    serde_json::from_str::<TokenResponse>(&body).ok()?.access_token
}

/// POST the client-credentials grant. Rejections come back as `Auth` with the reply body.
fn request_token(token_url: &str, client_id: &str, client_secret: &str) -> Result<String, CollectError> {
    let response_result = {
        let _span = info_span!("twitch_token", url = %token_url).entered();
        // Status errors are turned off so a rejection's body can be read
        ureq::post(token_url)
            .config()
            .http_status_as_error(false)
            .build()
            .query("client_id", client_id)
            .query("client_secret", client_secret)
            .query("grant_type", "client_credentials")
            .send_empty()
    };
    let response = response_result.map_err(|e| {
        error!(error = %e, "Token request failed");
        CollectError::Http { url: token_url.to_string(), source: e }
    })?;

    let status = response.status();
    let mut body_reader = response.into_body();
    let body = body_reader
        .read_to_string()
        .map_err(|e| CollectError::Http { url: token_url.to_string(), source: e })?;
    if !status.is_success() {
        error!(status = status.as_u16(), body = %body, "Token request rejected");
        return Err(CollectError::Auth(format!("HTTP {}: {}", status.as_u16(), body)));
    }
    Ok(body)
}

/// Look up Helix users by login.
#[instrument(level = "info", skip(client_id, token))]
pub fn fetch_users(client_id: &str, token: &str, login: &str) -> Result<Vec<TwitchUser>, CollectError> {
    let bearer = format!("Bearer {}", token);
    let users: Envelope<Vec<TwitchUser>> = http::get_json(
        TWITCH_USERS_URL,
        &[("login", login)],
        &[("Client-ID", client_id), ("Authorization", &bearer)],
    )?;
    Ok(users.data)
}

pub fn collect(auth_path: &Path, token_path: &Path, login: &str, out_path: &Path) -> Result<String, CollectError> {
    let credentials = Credentials::load(auth_path)?;
    let token = get_token(TWITCH_TOKEN_URL, &credentials, token_path)?;
    let users = fetch_users(credentials.client_id()?, &token, login)?;
    if users.is_empty() {
        info!(login, "No Twitch user found");
        return Ok(format!("Twitch: no user '{}' (skipped)", login));
    }
    for user in &users {
        info!(id = %user.id, login = %user.login, display_name = %user.display_name, "Twitch user");
    }
    export::write_rows(out_path, &users)?;
    Ok(format!("Twitch: {} users written to {}", users.len(), out_path.display()))
}
