use tabled::Table;

use crate::{
    eduflex::notes,
    info, success,
    types::{NewNote, NoteTableRow, NoteUpdate},
    utils, warning,
};

use super::{client, fail};

pub async fn list_notes(item_id: u64) {
    let client = client().await;

    let list = match notes::for_item(&client, item_id).await {
        Ok(list) => list,
        Err(e) => fail("Failed to load notes", e),
    };

    if list.is_empty() {
        info!("No notes for item #{}.", item_id);
        return;
    }

    let rows: Vec<NoteTableRow> = list
        .into_iter()
        .map(|note| NoteTableRow {
            id: note.id,
            at: note
                .timestamp_seconds
                .map(utils::format_timestamp)
                .unwrap_or_else(|| "-".to_string()),
            title: utils::truncate(&note.title, 30),
            content: utils::truncate(&note.content, 60),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn add_note(
    item_id: u64,
    content: String,
    title: Option<String>,
    at: Option<u32>,
    playlist_id: Option<u64>,
) {
    let client = client().await;
    let note = NewNote {
        playlist_item_id: Some(item_id),
        playlist_id,
        title: title.unwrap_or_default(),
        content,
        timestamp_seconds: at,
    };

    match notes::create(&client, &note).await {
        Ok(created) => match created.timestamp_seconds {
            Some(ts) => success!("Note #{} saved at {}.", created.id, utils::format_timestamp(ts)),
            None => success!("Note #{} saved.", created.id),
        },
        Err(e) => fail("Failed to save note", e),
    }
}

pub async fn edit_note(id: u64, content: Option<String>, title: Option<String>, at: Option<u32>) {
    if content.is_none() && title.is_none() && at.is_none() {
        warning!("Nothing to update. Pass --content, --title and/or --at.");
        return;
    }

    let client = client().await;
    let update = NoteUpdate {
        title,
        content,
        timestamp_seconds: at,
    };

    match notes::update(&client, id, &update).await {
        Ok(note) => success!("Note #{} updated.", note.id),
        Err(e) => fail("Failed to update note", e),
    }
}

pub async fn delete_note(id: u64) {
    let client = client().await;

    match notes::delete(&client, id).await {
        Ok(()) => success!("Note #{} deleted.", id),
        Err(e) => fail("Failed to delete note", e),
    }
}
