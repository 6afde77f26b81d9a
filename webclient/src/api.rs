//! HTTP client for the Purple Player backend.
//!
//! Every request carries `Content-Type: application/json` and the static
//! `x-api-key` header. The base URL comes from `API_URL` in `.env`; the key
//! comes from `API_KEY` in the build environment and otherwise falls back to
//! the key the backend ships with.

use seed::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use shared::lib::{OnlineUser, Track};

const API_URL: &str = dotenv_codegen::dotenv!("API_URL");
const DEFAULT_API_KEY: &str = "purple-secret-key-samra-2025";

pub const TRACKS_PATH: &str = "/api/tracks";
pub const TOP_SONG_PATH: &str = "/api/tracks/top-song";
pub const ONLINE_USERS_PATH: &str = "/api/users/online";
pub const REGISTER_PATH: &str = "/api/users/register";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed: {cause:?}")]
    Fetch {
        path: &'static str,
        cause: FetchError,
    },

    #[error("unexpected response body from {path}: {cause}")]
    Decode {
        path: &'static str,
        cause: serde_json::Error,
    },
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    avatar: Option<&'a str>,
}

pub fn api_key() -> &'static str {
    option_env!("API_KEY").unwrap_or(DEFAULT_API_KEY)
}

fn request(path: &'static str) -> Request<'static> {
    Request::new(format!("{}{}", API_URL, path))
        .header(Header::content_type("application/json"))
        .header(Header::custom("x-api-key", api_key()))
}

fn fetch_failed(path: &'static str) -> impl Fn(FetchError) -> ApiError {
    move |cause| ApiError::Fetch { path, cause }
}

async fn send(path: &'static str, request: Request<'static>) -> Result<String, ApiError> {
    let response = request
        .fetch()
        .await
        .and_then(Response::check_status)
        .map_err(fetch_failed(path))?;

    response.text().await.map_err(fetch_failed(path))
}

fn parse<T: DeserializeOwned>(path: &'static str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|cause| ApiError::Decode { path, cause })
}

async fn get<T: DeserializeOwned>(path: &'static str) -> Result<T, ApiError> {
    let body = send(path, request(path)).await?;
    parse(path, &body)
}

pub async fn fetch_tracks() -> Result<Vec<Track>, ApiError> {
    get(TRACKS_PATH).await
}

pub async fn fetch_online_users() -> Result<Vec<OnlineUser>, ApiError> {
    get(ONLINE_USERS_PATH).await
}

/// The backend answers with a track, `null`, or an empty body when nothing
/// has been played yet.
pub async fn fetch_top_song() -> Result<Option<Track>, ApiError> {
    let body = send(TOP_SONG_PATH, request(TOP_SONG_PATH)).await?;
    parse_top_song(&body)
}

fn parse_top_song(body: &str) -> Result<Option<Track>, ApiError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    parse(TOP_SONG_PATH, body)
}

pub async fn register_user(
    name: &str,
    email: &str,
    avatar: Option<&str>,
) -> Result<(), ApiError> {
    let request = request(REGISTER_PATH)
        .method(Method::Post)
        .json(&RegisterRequest {
            name,
            email,
            avatar,
        })
        .map_err(fetch_failed(REGISTER_PATH))?;

    send(REGISTER_PATH, request).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_falls_back_to_backend_default() {
        if option_env!("API_KEY").is_none() {
            assert_eq!(api_key(), "purple-secret-key-samra-2025");
        }
    }

    #[test]
    fn test_parse_top_song_empty_body() {
        assert_eq!(parse_top_song("").unwrap(), None);
        assert_eq!(parse_top_song("  \n").unwrap(), None);
        assert_eq!(parse_top_song("null").unwrap(), None);
    }

    #[test]
    fn test_parse_top_song_track() {
        let track = parse_top_song(r#"{"title":"Perfect","artist":"Ed Sheeran","plays":4}"#)
            .unwrap()
            .unwrap();

        assert_eq!(track.title, "Perfect");
        assert_eq!(track.artist, "Ed Sheeran");
    }

    #[test]
    fn test_parse_top_song_garbage() {
        match parse_top_song("<html>") {
            Err(ApiError::Decode { path, .. }) => assert_eq!(path, TOP_SONG_PATH),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_register_request_sends_null_avatar() {
        let body = serde_json::to_value(&RegisterRequest {
            name: "Samra",
            email: "samra@gmail.com",
            avatar: None,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"name": "Samra", "email": "samra@gmail.com", "avatar": null})
        );
    }
}
