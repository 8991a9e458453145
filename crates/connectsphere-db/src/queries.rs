use crate::Database;
use crate::models::{CommentRow, FeedPostRow, NewPost, NotificationRow, PostRow, UserRow};
use anyhow::Result;
use rusqlite::Connection;

impl Database {
    // -- Users --

    pub fn create_user(&self, id: &str, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO users (id, username, password) VALUES (?1, ?2, ?3)",
                (id, username, password_hash),
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "username", username))
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", id))
    }

    // -- Posts --

    pub fn create_post(&self, post: &NewPost<'_>) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO posts (id, user_id, image, description, status, art_type,
                                    price_cents, min_trade_value_cents)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    post.id,
                    post.user_id,
                    post.image,
                    post.description,
                    post.status,
                    post.art_type,
                    post.price_cents,
                    post.min_trade_value_cents,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_post(&self, post_id: &str) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, image, description, status, art_type,
                        price_cents, min_trade_value_cents, sold, created_at
                 FROM posts WHERE id = ?1",
            )?;
            stmt.query_row([post_id], map_post).optional()
        })
    }

    /// The feed: every post newest-first, each joined with its author
    /// and interaction counts in a single query (no N+1), with
    /// `viewer_liked` resolved for the requesting user. Pass an
    /// `art_type` to filter.
    pub fn feed(&self, viewer_id: &str, art_type: Option<&str>) -> Result<Vec<FeedPostRow>> {
        self.with_conn(|conn| {
            let base = "SELECT p.id, p.user_id, p.image, p.description, p.status, p.art_type,
                               p.price_cents, p.min_trade_value_cents, p.sold, p.created_at,
                               u.username, u.profile_photo,
                               (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count,
                               (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
                               (SELECT COUNT(*) FROM likes l
                                WHERE l.post_id = p.id AND l.user_id = ?1) AS viewer_liked
                        FROM posts p
                        LEFT JOIN users u ON p.user_id = u.id";

            let map = |row: &rusqlite::Row<'_>| {
                Ok(FeedPostRow {
                    post: map_post(row)?,
                    author_username: row
                        .get::<_, Option<String>>(10)?
                        .unwrap_or_else(|| "unknown".to_string()),
                    author_photo: row.get(11)?,
                    like_count: row.get(12)?,
                    comment_count: row.get(13)?,
                    viewer_liked: row.get::<_, i64>(14)? > 0,
                })
            };

            let rows = if let Some(art_type) = art_type {
                let sql = format!(
                    "{} WHERE p.art_type = ?2 ORDER BY p.created_at DESC, p.id DESC",
                    base
                );
                let mut stmt = conn.prepare(&sql)?;
                stmt.query_map(rusqlite::params![viewer_id, art_type], map)?
                    .collect::<std::result::Result<Vec<_>, _>>()?
            } else {
                let sql = format!("{} ORDER BY p.created_at DESC, p.id DESC", base);
                let mut stmt = conn.prepare(&sql)?;
                stmt.query_map([viewer_id], map)?
                    .collect::<std::result::Result<Vec<_>, _>>()?
            };

            Ok(rows)
        })
    }

    pub fn posts_by_user(&self, user_id: &str) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, image, description, status, art_type,
                        price_cents, min_trade_value_cents, sold, created_at
                 FROM posts
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt
                .query_map([user_id], map_post)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Comments / likers --

    pub fn comments_for_post(&self, post_id: &str) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.post_id, c.user_id, u.username, u.profile_photo,
                        c.body, c.created_at
                 FROM comments c
                 LEFT JOIN users u ON c.user_id = u.id
                 WHERE c.post_id = ?1
                 ORDER BY c.created_at ASC, c.id ASC",
            )?;
            let rows = stmt
                .query_map([post_id], |row| {
                    Ok(CommentRow {
                        id: row.get(0)?,
                        post_id: row.get(1)?,
                        user_id: row.get(2)?,
                        author_username: row
                            .get::<_, Option<String>>(3)?
                            .unwrap_or_else(|| "unknown".to_string()),
                        author_photo: row.get(4)?,
                        body: row.get(5)?,
                        created_at: row.get(6)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn likers_for_post(&self, post_id: &str) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.username
                 FROM likes l
                 JOIN users u ON l.user_id = u.id
                 WHERE l.post_id = ?1
                 ORDER BY l.created_at ASC",
            )?;
            let rows = stmt
                .query_map([post_id], |row| row.get(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Notifications --

    pub fn notifications_for_user(&self, user_id: &str) -> Result<Vec<NotificationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT n.id, n.user_id, n.kind, n.post_id, n.actor_id,
                        u.username, n.message, n.is_read, n.created_at
                 FROM notifications n
                 LEFT JOIN users u ON n.actor_id = u.id
                 WHERE n.user_id = ?1
                 ORDER BY n.created_at DESC, n.id DESC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(NotificationRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        kind: row.get(2)?,
                        post_id: row.get(3)?,
                        actor_id: row.get(4)?,
                        actor_username: row
                            .get::<_, Option<String>>(5)?
                            .unwrap_or_else(|| "unknown".to_string()),
                        message: row.get(6)?,
                        is_read: row.get::<_, i64>(7)? != 0,
                        created_at: row.get(8)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Flip `is_read` on one of the user's own notifications. Returns
    /// false when the row does not exist or belongs to someone else.
    pub fn mark_notification_read(&self, notification_id: &str, user_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let updated = conn.execute(
                "UPDATE notifications SET is_read = 1 WHERE id = ?1 AND user_id = ?2",
                (notification_id, user_id),
            )?;
            Ok(updated > 0)
        })
    }
}

fn query_user(conn: &Connection, column: &str, value: &str) -> Result<Option<UserRow>> {
    // `column` is one of two fixed identifiers, never user input.
    let sql = format!(
        "SELECT id, username, password, bio, profile_photo, created_at FROM users WHERE {} = ?1",
        column
    );
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt
        .query_row([value], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                bio: row.get(3)?,
                profile_photo: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn map_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        image: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        art_type: row.get(5)?,
        price_cents: row.get(6)?,
        min_trade_value_cents: row.get(7)?,
        sold: row.get::<_, i64>(8)? != 0,
        created_at: row.get(9)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn test_db() -> Database {
        Database::open(Path::new(":memory:")).unwrap()
    }

    fn seed(db: &Database) {
        db.create_user("u-a", "alice", "hash").unwrap();
        db.create_user("u-b", "bob", "hash").unwrap();
        db.create_post(&NewPost {
            id: "p-paint",
            user_id: "u-a",
            image: "https://img.example/1.jpg",
            description: Some("Sunset oil"),
            status: "sell",
            art_type: Some("Paintings"),
            price_cents: Some(5000),
            min_trade_value_cents: None,
        })
        .unwrap();
        db.create_post(&NewPost {
            id: "p-photo",
            user_id: "u-b",
            image: "https://img.example/2.jpg",
            description: None,
            status: "share",
            art_type: Some("Photography"),
            price_cents: None,
            min_trade_value_cents: None,
        })
        .unwrap();
    }

    #[test]
    fn feed_carries_counts_and_viewer_liked() {
        let db = test_db();
        seed(&db);
        db.toggle_like("l1", "p-paint", "u-b", "bob").unwrap();
        db.add_comment("c1", "p-paint", "u-b", "bob", "lovely").unwrap();

        let feed = db.feed("u-b", None).unwrap();
        assert_eq!(feed.len(), 2);

        let painting = feed.iter().find(|f| f.post.id == "p-paint").unwrap();
        assert_eq!(painting.author_username, "alice");
        assert_eq!(painting.like_count, 1);
        assert_eq!(painting.comment_count, 1);
        assert!(painting.viewer_liked);

        // Same feed through the owner's eyes: not liked by her.
        let feed = db.feed("u-a", None).unwrap();
        let painting = feed.iter().find(|f| f.post.id == "p-paint").unwrap();
        assert!(!painting.viewer_liked);
    }

    #[test]
    fn feed_filters_by_art_type() {
        let db = test_db();
        seed(&db);

        let feed = db.feed("u-a", Some("Photography")).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].post.id, "p-photo");

        let feed = db.feed("u-a", Some("Drawings")).unwrap();
        assert!(feed.is_empty());
    }

    #[test]
    fn comments_listed_oldest_first() {
        let db = test_db();
        seed(&db);
        db.add_comment("c1", "p-paint", "u-b", "bob", "first").unwrap();
        db.add_comment("c2", "p-paint", "u-b", "bob", "second").unwrap();

        let comments = db.comments_for_post("p-paint").unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].body, "first");
        assert_eq!(comments[1].body, "second");
        assert_eq!(comments[0].author_username, "bob");
    }

    #[test]
    fn mark_read_is_scoped_to_the_recipient() {
        let db = test_db();
        seed(&db);
        db.toggle_like("l1", "p-paint", "u-b", "bob").unwrap();

        let notifications = db.notifications_for_user("u-a").unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(!notifications[0].is_read);
        let id = notifications[0].id.clone();

        // The actor cannot mark the owner's notification.
        assert!(!db.mark_notification_read(&id, "u-b").unwrap());
        assert!(db.mark_notification_read(&id, "u-a").unwrap());

        let notifications = db.notifications_for_user("u-a").unwrap();
        assert!(notifications[0].is_read);
    }

    #[test]
    fn likers_listed_by_username() {
        let db = test_db();
        seed(&db);
        db.toggle_like("l1", "p-paint", "u-b", "bob").unwrap();

        assert_eq!(db.likers_for_post("p-paint").unwrap(), vec!["bob"]);
        assert!(db.likers_for_post("p-photo").unwrap().is_empty());
    }
}
