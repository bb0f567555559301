use std::collections::HashMap;

use tabled::Table;

use crate::{
    eduflex::{playlists, progress},
    info, success,
    types::{
        ItemTableRow, ItemType, NewItem, NewPlaylist, Permission, Playlist, PlaylistTableRow,
    },
    utils, warning,
};

use super::{client, fail};

pub async fn list_playlists() {
    let client = client().await;
    let pb = utils::spinner("Fetching playlists...");
    let result = playlists::list(&client).await;
    pb.finish_and_clear();

    match result {
        Ok(list) if list.is_empty() => info!("No playlists yet. Create one with eduflexcli playlists create"),
        Ok(list) => println!("{}", Table::new(playlist_rows(list))),
        Err(e) => fail("Failed to load playlists", e),
    }
}

pub async fn discover(search: Option<String>) {
    let client = client().await;
    let pb = utils::spinner("Searching public playlists...");
    let result = playlists::discover(&client, search.as_deref()).await;
    pb.finish_and_clear();

    match result {
        Ok(list) if list.is_empty() => warning!("No public playlists found."),
        Ok(list) => println!("{}", Table::new(playlist_rows(list))),
        Err(e) => fail("Failed to discover playlists", e),
    }
}

/// Shows a playlist's items together with the user's progress on each.
pub async fn show_playlist(id: u64) {
    let client = client().await;
    let pb = utils::spinner("Fetching playlist...");
    let (playlist, summary) = tokio::join!(
        playlists::get(&client, id),
        progress::for_playlist(&client, id)
    );
    pb.finish_and_clear();

    let playlist = match playlist {
        Ok(p) => p,
        Err(e) => fail("Failed to load playlist", e),
    };

    info!("{} (#{})", playlist.title, playlist.id);
    if !playlist.description.is_empty() {
        info!("{}", playlist.description);
    }

    let completed: HashMap<u64, bool> = match summary {
        Ok(summary) => {
            info!(
                "{} {}/{} items, {} spent",
                utils::progress_bar(summary.progress_percentage, 20),
                summary.completed_items,
                summary.total_items,
                utils::format_minutes(summary.total_time_spent / 60)
            );
            summary
                .items
                .into_iter()
                .map(|item| (item.item_id, item.is_completed))
                .collect()
        }
        Err(e) => {
            warning!("Progress unavailable: {}", e.message());
            HashMap::new()
        }
    };

    if playlist.items.is_empty() {
        info!("This playlist has no items yet.");
        return;
    }

    let rows: Vec<ItemTableRow> = playlist
        .items
        .into_iter()
        .map(|item| ItemTableRow {
            id: item.id,
            order: item.order,
            title: utils::truncate(&item.title, 48),
            item_type: item.item_type,
            duration: item
                .duration_minutes
                .map(|m| utils::format_minutes(m as u64))
                .unwrap_or_else(|| "-".to_string()),
            status: match completed.get(&item.id) {
                Some(true) => "done".to_string(),
                _ => "open".to_string(),
            },
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub async fn create_playlist(title: String, description: Option<String>, public: bool) {
    let client = client().await;
    let playlist = NewPlaylist {
        title,
        description: description.unwrap_or_default(),
        is_public: public,
    };

    match playlists::create(&client, &playlist).await {
        Ok(created) => success!("Playlist {} created (#{}).", created.title, created.id),
        Err(e) => fail("Failed to create playlist", e),
    }
}

pub async fn delete_playlist(id: u64) {
    let client = client().await;

    match playlists::delete(&client, id).await {
        Ok(()) => success!("Playlist #{} deleted.", id),
        Err(e) => fail("Failed to delete playlist", e),
    }
}

pub async fn add_item(
    playlist_id: u64,
    title: String,
    url: String,
    item_type: ItemType,
    description: Option<String>,
    duration_minutes: Option<u32>,
) {
    let client = client().await;
    let item = NewItem {
        title,
        item_type,
        url,
        description: description.unwrap_or_default(),
        duration_minutes,
    };

    match playlists::add_item(&client, playlist_id, &item).await {
        Ok(created) => success!(
            "Added {} {} to playlist #{} (item #{}).",
            created.item_type,
            created.title,
            playlist_id,
            created.id
        ),
        Err(e) => fail("Failed to add item", e),
    }
}

pub async fn remove_item(item_id: u64) {
    let client = client().await;

    match playlists::delete_item(&client, item_id).await {
        Ok(()) => success!("Item #{} removed.", item_id),
        Err(e) => fail("Failed to remove item", e),
    }
}

pub async fn reorder_items(playlist_id: u64, item_ids: Vec<u64>) {
    let client = client().await;

    match playlists::reorder(&client, playlist_id, &item_ids).await {
        Ok(()) => success!("Items of playlist #{} reordered.", playlist_id),
        Err(e) => fail("Failed to reorder items", e),
    }
}

pub async fn share_playlist(playlist_id: u64, email: String, permission: Permission) {
    let client = client().await;

    match playlists::share(&client, playlist_id, &email, permission).await {
        Ok(resp) if resp.message.is_empty() => {
            success!("Playlist #{} shared with {}.", playlist_id, email)
        }
        Ok(resp) => success!("{}", resp.message),
        Err(e) => fail("Failed to share playlist", e),
    }
}

fn playlist_rows(list: Vec<Playlist>) -> Vec<PlaylistTableRow> {
    list.into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            title: utils::truncate(&p.title, 40),
            items: p
                .item_count
                .unwrap_or(p.items.len() as u32)
                .to_string(),
            duration: utils::format_minutes(p.total_duration.unwrap_or(0) as u64),
            visibility: if p.is_public { "public" } else { "private" }.to_string(),
        })
        .collect()
}
