use crate::{
    api::{ApiClient, ApiError},
    types::{
        Comment, ContentUpdate, Discussion, DiscussionReply, Listing, NewComment, NewDiscussion,
    },
};

/// Top-level comments on an item, each with its replies, oldest first.
pub async fn for_item(client: &ApiClient, item_id: u64) -> Result<Vec<Comment>, ApiError> {
    let listing: Listing<Comment> = client
        .get(&format!("/comments/item/{item_id}/"))
        .await?
        .json()?;

    let mut comments = listing.into_items();
    comments.sort_by_key(|comment| comment.created_at);
    Ok(comments)
}

/// Posts a comment, or a reply when `parent` is set.
///
/// The server only echoes the submitted fields; reload the item's comments to
/// see the new id.
pub async fn create(client: &ApiClient, comment: &NewComment) -> Result<NewComment, ApiError> {
    client.post("/comments/", comment).await?.json()
}

/// Only the author can edit; other users get a 404.
pub async fn update(client: &ApiClient, id: u64, content: &str) -> Result<Comment, ApiError> {
    let update = ContentUpdate {
        content: content.to_string(),
    };
    client
        .patch(&format!("/comments/{id}/"), &update)
        .await?
        .json()
}

pub async fn delete(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client.delete(&format!("/comments/{id}/")).await?;
    Ok(())
}

/// Discussion threads of a playlist, pinned threads first.
pub async fn discussions(client: &ApiClient, playlist_id: u64) -> Result<Vec<Discussion>, ApiError> {
    let listing: Listing<Discussion> = client
        .get(&format!("/comments/discussions/playlist/{playlist_id}/"))
        .await?
        .json()?;

    let mut threads = listing.into_items();
    threads.sort_by_key(|thread| !thread.is_pinned);
    Ok(threads)
}

pub async fn discussion(client: &ApiClient, id: u64) -> Result<Discussion, ApiError> {
    client
        .get(&format!("/comments/discussions/{id}/"))
        .await?
        .json()
}

pub async fn start_discussion(
    client: &ApiClient,
    discussion: &NewDiscussion,
) -> Result<NewDiscussion, ApiError> {
    client
        .post("/comments/discussions/", discussion)
        .await?
        .json()
}

pub async fn reply(
    client: &ApiClient,
    discussion_id: u64,
    content: &str,
) -> Result<DiscussionReply, ApiError> {
    let reply = ContentUpdate {
        content: content.to_string(),
    };
    client
        .post(&format!("/comments/discussions/{discussion_id}/reply/"), &reply)
        .await?
        .json()
}

pub async fn delete_discussion(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client
        .delete(&format!("/comments/discussions/{id}/"))
        .await?;
    Ok(())
}
