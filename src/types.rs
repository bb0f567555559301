use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
    pub password2: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub tokens: TokenPair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Creator,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::User => "user",
            Role::Creator => "creator",
            Role::Admin => "admin",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_creator: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatorUpgrade {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

/// List endpoints answer either with a bare array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paginated { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paginated { results } => results,
            Listing::Plain(items) => items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Video,
    Article,
    Resource,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemType::Video => "video",
            ItemType::Article => "article",
            ItemType::Resource => "resource",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    #[default]
    View,
    Edit,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Permission::View => "view",
            Permission::Edit => "edit",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: u64,
    #[serde(default)]
    pub creator: Option<User>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(default)]
    pub item_count: Option<u32>,
    #[serde(default)]
    pub total_duration: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub item_type: ItemType,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPlaylist {
    pub title: String,
    pub description: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewItem {
    pub title: String,
    pub item_type: ItemType,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReorderRequest {
    pub item_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareRequest {
    pub email: String,
    pub permission: Permission,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Collaborator {
    pub id: u64,
    pub user: User,
    pub permission: Permission,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareResponse {
    #[serde(default)]
    pub message: String,
    pub collaborator: Collaborator,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    pub playlist_item_id: u64,
    pub is_completed: bool,
    pub time_spent_seconds: u64,
}

impl ProgressUpdate {
    /// Watch time given in minutes; absurdly large values saturate.
    pub fn from_minutes(playlist_item_id: u64, minutes: u64, is_completed: bool) -> Self {
        Self {
            playlist_item_id,
            is_completed,
            time_spent_seconds: minutes.saturating_mul(60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressEnvelope {
    pub progress: Progress,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Progress {
    pub id: u64,
    pub is_completed: bool,
    pub time_spent_seconds: u64,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_accessed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistProgress {
    pub playlist_id: u64,
    pub playlist_title: String,
    pub total_items: u32,
    pub completed_items: u32,
    pub progress_percentage: f64,
    pub total_time_spent: u64,
    #[serde(default)]
    pub items: Vec<ItemProgress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemProgress {
    pub item_id: u64,
    pub title: String,
    pub is_completed: bool,
    pub time_spent_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverallStats {
    pub total_items_completed: u32,
    pub total_time_minutes: u64,
    #[serde(default)]
    pub playlist_progress: Vec<PlaylistCompletion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistCompletion {
    pub id: u64,
    pub title: String,
    pub progress: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Streaks {
    pub current_streak: u32,
    pub longest_streak: u32,
    #[serde(default)]
    pub recent_activity: Vec<StreakDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreakDay {
    pub date: NaiveDate,
    pub minutes_learned: u32,
    pub items_completed: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyInsights {
    pub total_minutes: u64,
    pub items_completed: u32,
    #[serde(default)]
    pub daily_breakdown: Vec<DailyMinutes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyMinutes {
    pub date: NaiveDate,
    pub minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    #[serde(default)]
    pub playlist_item: Option<u64>,
    #[serde(default)]
    pub playlist: Option<u64>,
    #[serde(default)]
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub timestamp_seconds: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_item_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<u64>,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_seconds: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_seconds: Option<u32>,
}

/// Comment on a playlist item. Top-level comments carry their replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub parent: Option<u64>,
    #[serde(default)]
    pub replies: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Comment submission. The server answers with these fields echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComment {
    pub playlist_item: u64,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentUpdate {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discussion {
    pub id: u64,
    pub playlist: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author_username: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub reply_count: u32,
    #[serde(default)]
    pub replies: Vec<DiscussionReply>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionReply {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub author_username: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Discussion submission, echoed back by the server like [`NewComment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDiscussion {
    pub playlist: u64,
    pub title: String,
    pub content: String,
}

/// Knowledge capsule: a learner's summary of one playlist item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capsule {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    pub playlist_item: u64,
    #[serde(default)]
    pub item_title: String,
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub common_mistakes: String,
    #[serde(default)]
    pub code_snippet: String,
    #[serde(default)]
    pub code_language: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub is_liked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Lightweight capsule returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapsuleSummary {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub item_title: String,
    pub summary: String,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCapsule {
    pub playlist_item: u64,
    pub summary: String,
    pub key_points: Vec<String>,
    pub common_mistakes: String,
    pub code_snippet: String,
    pub code_language: String,
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CapsuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_mistakes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// Result of toggling a like on a public capsule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LikeState {
    pub liked: bool,
    pub likes_count: u32,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: u64,
    pub title: String,
    pub items: String,
    pub duration: String,
    pub visibility: String,
}

#[derive(Tabled)]
pub struct ItemTableRow {
    pub id: u64,
    pub order: u32,
    pub title: String,
    #[tabled(rename = "type")]
    pub item_type: ItemType,
    pub duration: String,
    pub status: String,
}

#[derive(Tabled)]
pub struct NoteTableRow {
    pub id: u64,
    pub at: String,
    pub title: String,
    pub content: String,
}

#[derive(Tabled)]
pub struct ActivityTableRow {
    pub date: String,
    pub minutes: String,
    pub activity: String,
}

#[derive(Tabled)]
pub struct DiscussionTableRow {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub replies: u32,
    pub pinned: String,
}

#[derive(Tabled)]
pub struct CapsuleTableRow {
    pub id: u64,
    pub item: String,
    pub summary: String,
    pub author: String,
    pub likes: u32,
    pub visibility: String,
}
