/// Database row types — these map directly to SQLite rows.
/// Distinct from the connectsphere-types API models to keep the DB
/// layer independent.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub created_at: String,
}

pub struct PostRow {
    pub id: String,
    pub user_id: String,
    pub image: String,
    pub description: Option<String>,
    pub status: String,
    pub art_type: Option<String>,
    pub price_cents: Option<i64>,
    pub min_trade_value_cents: Option<i64>,
    pub sold: bool,
    pub created_at: String,
}

/// Fields for a new listing; ids are minted by the caller.
pub struct NewPost<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub image: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub art_type: Option<&'a str>,
    pub price_cents: Option<i64>,
    pub min_trade_value_cents: Option<i64>,
}

/// A feed entry: one post joined with its author and interaction
/// counts, relative to the viewing user.
pub struct FeedPostRow {
    pub post: PostRow,
    pub author_username: String,
    pub author_photo: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub viewer_liked: bool,
}

pub struct CommentRow {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub author_username: String,
    pub author_photo: Option<String>,
    pub body: String,
    pub created_at: String,
}

pub struct NotificationRow {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub post_id: String,
    pub actor_id: String,
    pub actor_username: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}
