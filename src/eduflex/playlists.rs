use crate::{
    api::{ApiClient, ApiError},
    types::{
        Listing, NewItem, NewPlaylist, Permission, Playlist, PlaylistItem, PlaylistUpdate,
        ReorderRequest, ShareRequest, ShareResponse,
    },
    utils,
};

/// Playlists owned by or shared with the signed-in user.
pub async fn list(client: &ApiClient) -> Result<Vec<Playlist>, ApiError> {
    let listing: Listing<Playlist> = client.get("/playlists/").await?.json()?;
    Ok(listing.into_items())
}

/// Playlist with its items in display order.
pub async fn get(client: &ApiClient, id: u64) -> Result<Playlist, ApiError> {
    let mut playlist: Playlist = client.get(&format!("/playlists/{id}/")).await?.json()?;
    playlist.items.sort_by_key(|item| item.order);
    Ok(playlist)
}

pub async fn create(client: &ApiClient, playlist: &NewPlaylist) -> Result<Playlist, ApiError> {
    client.post("/playlists/", playlist).await?.json()
}

pub async fn update(
    client: &ApiClient,
    id: u64,
    update: &PlaylistUpdate,
) -> Result<Playlist, ApiError> {
    client
        .patch(&format!("/playlists/{id}/"), update)
        .await?
        .json()
}

pub async fn delete(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client.delete(&format!("/playlists/{id}/")).await?;
    Ok(())
}

pub async fn add_item(
    client: &ApiClient,
    playlist_id: u64,
    item: &NewItem,
) -> Result<PlaylistItem, ApiError> {
    client
        .post(&format!("/playlists/{playlist_id}/items/"), item)
        .await?
        .json()
}

pub async fn delete_item(client: &ApiClient, item_id: u64) -> Result<(), ApiError> {
    client
        .delete(&format!("/playlists/items/{item_id}/"))
        .await?;
    Ok(())
}

/// Reorders items; `item_ids` lists every item of the playlist in its new order.
pub async fn reorder(client: &ApiClient, playlist_id: u64, item_ids: &[u64]) -> Result<(), ApiError> {
    let request = ReorderRequest {
        item_ids: item_ids.to_vec(),
    };
    client
        .put(&format!("/playlists/{playlist_id}/reorder/"), &request)
        .await?;
    Ok(())
}

pub async fn share(
    client: &ApiClient,
    playlist_id: u64,
    email: &str,
    permission: Permission,
) -> Result<ShareResponse, ApiError> {
    let request = ShareRequest {
        email: email.to_string(),
        permission,
    };
    client
        .post(&format!("/playlists/{playlist_id}/share/"), &request)
        .await?
        .json()
}

/// Public playlists, optionally filtered by a search term.
pub async fn discover(client: &ApiClient, search: Option<&str>) -> Result<Vec<Playlist>, ApiError> {
    let listing: Listing<Playlist> = client
        .get(&utils::discover_endpoint(search))
        .await?
        .json()?;
    Ok(listing.into_items())
}
