use movielist_models::{Troupe, TroupeRecord};
use reqwest::Client;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{fetch_one, segment};

/// An actor or director with their filmography.
pub async fn get_troupe(client: &Client, api_root: &str, troupe_id: &str) -> Result<Troupe, ApiError> {
    let url = format!("{}/troupe/get_troupe/{}", api_root, segment(troupe_id));
    debug!(%url, "Fetching troupe");
    fetch_one::<TroupeRecord, _>(client.get(&url), "troupe/get_troupe").await
}
