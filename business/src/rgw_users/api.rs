//! RGW user endpoints of the dashboard REST API.
//!
//! Performs network IO and is meant to be called from commands; callers map
//! results into compute updates.

use thiserror::Error;

use super::model::RgwUser;
use crate::http::{Client, HttpError};

#[derive(Debug, Error)]
pub enum RgwApiError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse user list: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResult<T> = Result<T, RgwApiError>;

const USER_PATH: &str = "/api/rgw/user";

fn status_error(response: &crate::http::Response) -> RgwApiError {
    RgwApiError::Status {
        status: response.status,
        body: response.text(),
    }
}

/// GET `/api/rgw/user`
pub async fn list_users(client: &Client) -> ApiResult<Vec<RgwUser>> {
    let response = client.get(USER_PATH).send().await?;
    if !response.is_success() {
        return Err(status_error(&response));
    }
    Ok(response.json()?)
}

/// DELETE `/api/rgw/user/{uid}`
pub async fn delete_user(client: &Client, uid: &str) -> ApiResult<()> {
    let path = format!("{USER_PATH}/{}", urlencoding::encode(uid));
    let response = client.delete(&path).send().await?;
    if !response.is_success() {
        return Err(status_error(&response));
    }
    Ok(())
}
