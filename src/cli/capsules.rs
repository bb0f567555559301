use std::path::PathBuf;

use tabled::Table;

use crate::{
    eduflex::capsules,
    error, info, success,
    types::{Capsule, CapsuleSummary, CapsuleTableRow, NewCapsule},
    utils, warning,
};

use super::{client, fail};

pub async fn list_capsules(public: bool) {
    let client = client().await;
    let pb = utils::spinner("Fetching capsules...");
    let result = if public {
        capsules::public(&client).await
    } else {
        capsules::mine(&client).await
    };
    pb.finish_and_clear();

    match result {
        Ok(list) if list.is_empty() && public => warning!("No public capsules yet."),
        Ok(list) if list.is_empty() => {
            info!("You have no capsules. Create one with eduflexcli capsules create")
        }
        Ok(list) => println!("{}", Table::new(capsule_rows(list))),
        Err(e) => fail("Failed to load capsules", e),
    }
}

pub async fn item_capsules(item_id: u64) {
    let client = client().await;

    let list = match capsules::for_item(&client, item_id).await {
        Ok(list) => list,
        Err(e) => fail("Failed to load capsules", e),
    };

    if list.is_empty() {
        info!("No capsules for item #{}.", item_id);
        return;
    }

    for capsule in &list {
        print_capsule(capsule);
        println!();
    }
}

pub async fn show_capsule(id: u64) {
    let client = client().await;

    match capsules::get(&client, id).await {
        Ok(capsule) => print_capsule(&capsule),
        Err(e) => fail("Failed to load capsule", e),
    }
}

pub async fn create_capsule(
    item_id: u64,
    summary: String,
    key_points: Vec<String>,
    mistakes: Option<String>,
    code_file: Option<PathBuf>,
    language: Option<String>,
    public: bool,
) {
    let code_snippet = match code_file {
        Some(path) => match async_fs::read_to_string(&path).await {
            Ok(code) => code,
            Err(e) => error!("Cannot read {}. Err: {}", path.display(), e),
        },
        None => String::new(),
    };

    let client = client().await;
    let capsule = NewCapsule {
        playlist_item: item_id,
        summary,
        key_points,
        common_mistakes: mistakes.unwrap_or_default(),
        code_snippet,
        code_language: language.unwrap_or_default(),
        is_public: public,
    };

    match capsules::create(&client, &capsule).await {
        Ok(created) => success!("Capsule #{} created for {}.", created.id, created.item_title),
        Err(e) => fail("Failed to create capsule", e),
    }
}

pub async fn delete_capsule(id: u64) {
    let client = client().await;

    match capsules::delete(&client, id).await {
        Ok(()) => success!("Capsule #{} deleted.", id),
        Err(e) => fail("Failed to delete capsule", e),
    }
}

pub async fn like_capsule(id: u64) {
    let client = client().await;

    match capsules::toggle_like(&client, id).await {
        Ok(state) if state.liked => success!("Liked capsule #{} ({} likes).", id, state.likes_count),
        Ok(state) => info!("Like removed from capsule #{} ({} likes).", id, state.likes_count),
        Err(e) => fail("Failed to like capsule", e),
    }
}

fn print_capsule(capsule: &Capsule) {
    info!(
        "Capsule #{} on {} by {} ({} likes)",
        capsule.id, capsule.item_title, capsule.username, capsule.likes_count
    );
    println!("{}", capsule.summary);

    for point in &capsule.key_points {
        println!("  - {}", point);
    }
    if !capsule.common_mistakes.is_empty() {
        warning!("Common mistakes: {}", capsule.common_mistakes);
    }
    if !capsule.code_snippet.is_empty() {
        println!("```{}\n{}\n```", capsule.code_language, capsule.code_snippet.trim_end());
    }
}

fn capsule_rows(list: Vec<CapsuleSummary>) -> Vec<CapsuleTableRow> {
    list.into_iter()
        .map(|c| CapsuleTableRow {
            id: c.id,
            item: utils::truncate(&c.item_title, 30),
            summary: utils::truncate(&c.summary, 50),
            author: c.username,
            likes: c.likes_count,
            visibility: if c.is_public { "public" } else { "private" }.to_string(),
        })
        .collect()
}
