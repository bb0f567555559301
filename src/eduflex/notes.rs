use crate::{
    api::{ApiClient, ApiError},
    types::{Listing, NewNote, Note, NoteUpdate},
};

/// Notes attached to a playlist item, ordered by video timestamp.
pub async fn for_item(client: &ApiClient, item_id: u64) -> Result<Vec<Note>, ApiError> {
    let listing: Listing<Note> = client
        .get(&format!("/notes/?item_id={item_id}"))
        .await?
        .json()?;

    let mut notes = listing.into_items();
    notes.sort_by_key(|note| note.timestamp_seconds.unwrap_or(0));
    Ok(notes)
}

pub async fn create(client: &ApiClient, note: &NewNote) -> Result<Note, ApiError> {
    client.post("/notes/", note).await?.json()
}

pub async fn update(client: &ApiClient, id: u64, update: &NoteUpdate) -> Result<Note, ApiError> {
    client.patch(&format!("/notes/{id}/"), update).await?.json()
}

pub async fn delete(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client.delete(&format!("/notes/{id}/")).await?;
    Ok(())
}
