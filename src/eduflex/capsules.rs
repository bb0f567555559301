use reqwest::Method;

use crate::{
    api::{ApiClient, ApiError, RequestDescriptor},
    types::{Capsule, CapsuleSummary, CapsuleUpdate, LikeState, Listing, NewCapsule},
};

/// Capsules written by the signed-in user.
pub async fn mine(client: &ApiClient) -> Result<Vec<CapsuleSummary>, ApiError> {
    let listing: Listing<CapsuleSummary> = client.get("/capsules/user/").await?.json()?;
    Ok(listing.into_items())
}

/// Public capsules, most liked first.
pub async fn public(client: &ApiClient) -> Result<Vec<CapsuleSummary>, ApiError> {
    let listing: Listing<CapsuleSummary> = client.get("/capsules/public/").await?.json()?;
    Ok(listing.into_items())
}

/// Capsules on one item: every public one plus the user's own.
pub async fn for_item(client: &ApiClient, item_id: u64) -> Result<Vec<Capsule>, ApiError> {
    let listing: Listing<Capsule> = client
        .get(&format!("/capsules/item/{item_id}/"))
        .await?
        .json()?;
    Ok(listing.into_items())
}

pub async fn get(client: &ApiClient, id: u64) -> Result<Capsule, ApiError> {
    client.get(&format!("/capsules/{id}/")).await?.json()
}

/// Blank key points are dropped by the server.
pub async fn create(client: &ApiClient, capsule: &NewCapsule) -> Result<Capsule, ApiError> {
    client.post("/capsules/", capsule).await?.json()
}

pub async fn update(client: &ApiClient, id: u64, update: &CapsuleUpdate) -> Result<Capsule, ApiError> {
    client.patch(&format!("/capsules/{id}/"), update).await?.json()
}

pub async fn delete(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client.delete(&format!("/capsules/{id}/")).await?;
    Ok(())
}

/// Likes a public capsule, or removes the like if it was already given.
pub async fn toggle_like(client: &ApiClient, id: u64) -> Result<LikeState, ApiError> {
    client
        .send(RequestDescriptor::new(
            Method::POST,
            format!("/capsules/{id}/like/"),
        ))
        .await?
        .json()
}
