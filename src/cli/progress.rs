use tabled::Table;

use crate::{
    eduflex::progress,
    info, success,
    types::{ActivityTableRow, ProgressUpdate},
    utils, warning,
};

use super::{client, fail};

pub async fn stats() {
    let client = client().await;
    let pb = utils::spinner("Fetching learning stats...");
    let result = progress::stats(&client).await;
    pb.finish_and_clear();

    let stats = match result {
        Ok(s) => s,
        Err(e) => fail("Failed to load stats", e),
    };

    info!("Items completed: {}", stats.total_items_completed);
    info!(
        "Time spent learning: {}",
        utils::format_minutes(stats.total_time_minutes)
    );

    for playlist in stats.playlist_progress {
        println!(
            "  {} {}",
            utils::progress_bar(playlist.progress, 20),
            utils::truncate(&playlist.title, 40)
        );
    }
}

pub async fn streaks() {
    let client = client().await;
    let pb = utils::spinner("Fetching streaks...");
    let result = progress::streaks(&client).await;
    pb.finish_and_clear();

    let streaks = match result {
        Ok(s) => s,
        Err(e) => fail("Failed to load streaks", e),
    };

    if streaks.current_streak > 0 {
        success!("Current streak: {} day(s)", streaks.current_streak);
    } else {
        warning!("No active streak. Learn something today to start one.");
    }
    info!("Longest streak: {} day(s)", streaks.longest_streak);

    if streaks.recent_activity.is_empty() {
        return;
    }

    let rows: Vec<ActivityTableRow> = streaks
        .recent_activity
        .into_iter()
        .map(|day| ActivityTableRow {
            date: day.date.format("%a %Y-%m-%d").to_string(),
            minutes: utils::format_minutes(day.minutes_learned as u64),
            activity: format!("{} item(s) completed", day.items_completed),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn weekly() {
    let client = client().await;
    let pb = utils::spinner("Fetching weekly insights...");
    let result = progress::weekly(&client).await;
    pb.finish_and_clear();

    let weekly = match result {
        Ok(w) => w,
        Err(e) => fail("Failed to load weekly insights", e),
    };

    info!(
        "Last 7 days: {} learned, {} item(s) completed",
        utils::format_minutes(weekly.total_minutes),
        weekly.items_completed
    );

    let busiest = weekly
        .daily_breakdown
        .iter()
        .map(|day| day.minutes)
        .max()
        .unwrap_or(0)
        .max(1);

    let rows: Vec<ActivityTableRow> = weekly
        .daily_breakdown
        .into_iter()
        .map(|day| ActivityTableRow {
            date: day.date.format("%a %Y-%m-%d").to_string(),
            minutes: utils::format_minutes(day.minutes as u64),
            activity: "#".repeat((day.minutes as usize * 20) / busiest as usize),
        })
        .collect();
    println!("{}", Table::new(rows));
}

pub async fn record_progress(item_id: u64, minutes: u64, completed: bool) {
    let client = client().await;
    let update = ProgressUpdate::from_minutes(item_id, minutes, completed);

    match progress::record(&client, &update).await {
        Ok(p) if p.is_completed => success!(
            "Item #{} completed, {} spent in total.",
            item_id,
            utils::format_minutes(p.time_spent_seconds / 60)
        ),
        Ok(p) => success!(
            "Progress saved for item #{}, {} spent in total.",
            item_id,
            utils::format_minutes(p.time_spent_seconds / 60)
        ),
        Err(e) => fail("Failed to record progress", e),
    }
}
