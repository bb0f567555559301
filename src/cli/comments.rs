use tabled::Table;

use crate::{
    eduflex::comments,
    info, success,
    types::{Comment, DiscussionTableRow, NewComment, NewDiscussion},
    utils, warning,
};

use super::{client, fail};

pub async fn list_comments(item_id: u64) {
    let client = client().await;
    let pb = utils::spinner("Fetching comments...");
    let result = comments::for_item(&client, item_id).await;
    pb.finish_and_clear();

    let thread = match result {
        Ok(t) => t,
        Err(e) => fail("Failed to load comments", e),
    };

    if thread.is_empty() {
        info!("No comments on item #{} yet.", item_id);
        return;
    }

    for comment in &thread {
        print_comment(comment, 0);
        for reply in &comment.replies {
            print_comment(reply, 1);
        }
    }
}

pub async fn add_comment(item_id: u64, content: String, reply_to: Option<u64>) {
    let client = client().await;
    let comment = NewComment {
        playlist_item: item_id,
        content,
        parent: reply_to,
    };

    match comments::create(&client, &comment).await {
        Ok(_) => match reply_to {
            Some(parent) => success!("Replied to comment #{}.", parent),
            None => success!("Comment posted on item #{}.", item_id),
        },
        Err(e) => fail("Failed to post comment", e),
    }
}

pub async fn edit_comment(id: u64, content: String) {
    let client = client().await;

    match comments::update(&client, id, &content).await {
        Ok(comment) => success!("Comment #{} updated.", comment.id),
        Err(e) => fail("Failed to update comment", e),
    }
}

pub async fn delete_comment(id: u64) {
    let client = client().await;

    match comments::delete(&client, id).await {
        Ok(()) => success!("Comment #{} deleted.", id),
        Err(e) => fail("Failed to delete comment", e),
    }
}

pub async fn list_discussions(playlist_id: u64) {
    let client = client().await;
    let pb = utils::spinner("Fetching discussions...");
    let result = comments::discussions(&client, playlist_id).await;
    pb.finish_and_clear();

    let threads = match result {
        Ok(t) => t,
        Err(e) => fail("Failed to load discussions", e),
    };

    if threads.is_empty() {
        info!(
            "No discussions for playlist #{}. Start one with eduflexcli discussions start",
            playlist_id
        );
        return;
    }

    let rows: Vec<DiscussionTableRow> = threads
        .into_iter()
        .map(|d| DiscussionTableRow {
            id: d.id,
            title: utils::truncate(&d.title, 48),
            author: d.author_username,
            replies: d.reply_count,
            pinned: if d.is_pinned { "yes" } else { "" }.to_string(),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn show_discussion(id: u64) {
    let client = client().await;

    let thread = match comments::discussion(&client, id).await {
        Ok(d) => d,
        Err(e) => fail("Failed to load discussion", e),
    };

    info!("{} (#{}) by {}", thread.title, thread.id, thread.author_username);
    println!("{}", thread.content);

    if thread.replies.is_empty() {
        warning!("No replies yet.");
        return;
    }

    for reply in thread.replies {
        let when = reply
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!("  {} {}: {}", when, reply.author_username, reply.content);
    }
}

pub async fn start_discussion(playlist_id: u64, title: String, content: String) {
    let client = client().await;
    let discussion = NewDiscussion {
        playlist: playlist_id,
        title,
        content,
    };

    match comments::start_discussion(&client, &discussion).await {
        Ok(created) => success!("Discussion {} started on playlist #{}.", created.title, playlist_id),
        Err(e) => fail("Failed to start discussion", e),
    }
}

pub async fn reply_discussion(id: u64, content: String) {
    let client = client().await;

    match comments::reply(&client, id, &content).await {
        Ok(reply) => success!("Reply #{} added to discussion #{}.", reply.id, id),
        Err(e) => fail("Failed to reply", e),
    }
}

pub async fn delete_discussion(id: u64) {
    let client = client().await;

    match comments::delete_discussion(&client, id).await {
        Ok(()) => success!("Discussion #{} deleted.", id),
        Err(e) => fail("Failed to delete discussion", e),
    }
}

fn print_comment(comment: &Comment, depth: usize) {
    let when = comment
        .created_at
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    println!(
        "{}#{} {} {}: {}",
        "  ".repeat(depth),
        comment.id,
        when,
        comment.username,
        comment.content
    );
}
