use crate::{
    api::{ApiClient, ApiError},
    types::{
        OverallStats, PlaylistProgress, Progress, ProgressEnvelope, ProgressUpdate, Streaks,
        WeeklyInsights,
    },
};

/// Adds watch time to an item and optionally marks it completed.
///
/// Time is accumulated server side; completing an already completed item does
/// not count it twice.
pub async fn record(client: &ApiClient, update: &ProgressUpdate) -> Result<Progress, ApiError> {
    let envelope: ProgressEnvelope = client.post("/progress/", update).await?.json()?;
    Ok(envelope.progress)
}

pub async fn for_playlist(client: &ApiClient, playlist_id: u64) -> Result<PlaylistProgress, ApiError> {
    client
        .get(&format!("/progress/playlist/{playlist_id}/"))
        .await?
        .json()
}

pub async fn stats(client: &ApiClient) -> Result<OverallStats, ApiError> {
    client.get("/progress/stats/").await?.json()
}

pub async fn streaks(client: &ApiClient) -> Result<Streaks, ApiError> {
    client.get("/progress/streaks/").await?.json()
}

pub async fn weekly(client: &ApiClient) -> Result<WeeklyInsights, ApiError> {
    client.get("/progress/weekly/").await?.json()
}
