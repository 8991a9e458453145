//! The transactional mutators behind every state-changing user action.
//!
//! Each action runs begin -> writes -> commit on the shared connection;
//! the primary write and its derived notification land together or the
//! whole transaction rolls back. Early `?`/`return` paths drop the
//! transaction, which rolls it back.

use rusqlite::{Connection, OptionalExtension, params};

use crate::Database;
use crate::error::ActionError;
use crate::models::PostRow;
use crate::notify::{self, NotificationKind};

const COMMENT_PREVIEW_CHARS: usize = 50;

/// Shipping fields from the checkout form, borrowed from the request.
pub struct ShippingAddress<'a> {
    pub street: &'a str,
    pub city: &'a str,
    pub state: &'a str,
    pub zip_code: &'a str,
    pub country: &'a str,
}

impl<'a> ShippingAddress<'a> {
    fn validated(&self) -> Result<ShippingAddress<'a>, ActionError> {
        let trimmed = ShippingAddress {
            street: self.street.trim(),
            city: self.city.trim(),
            state: self.state.trim(),
            zip_code: self.zip_code.trim(),
            country: self.country.trim(),
        };
        for (value, name) in [
            (trimmed.street, "street address"),
            (trimmed.city, "city"),
            (trimmed.state, "state"),
            (trimmed.zip_code, "zip code"),
            (trimmed.country, "country"),
        ] {
            if value.is_empty() {
                return Err(ActionError::Validation(format!("{} is required", name)));
            }
        }
        Ok(trimmed)
    }

    fn formatted(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.zip_code, self.country
        )
    }
}

/// Entity loader: existence only. Business preconditions (sold, listed
/// for sale, ...) are the caller's to check against the returned row.
fn load_post(conn: &Connection, post_id: &str) -> Result<PostRow, ActionError> {
    let row = conn
        .query_row(
            "SELECT id, user_id, image, description, status, art_type,
                    price_cents, min_trade_value_cents, sold, created_at
             FROM posts WHERE id = ?1",
            [post_id],
            |row| {
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
            },
        )
        .optional()?;

    row.ok_or(ActionError::NotFound)
}

fn comment_preview(body: &str) -> String {
    let mut preview: String = body.chars().take(COMMENT_PREVIEW_CHARS).collect();
    if body.chars().count() > COMMENT_PREVIEW_CHARS {
        preview.push_str("...");
    }
    preview
}

impl Database {
    /// Toggle a like: removes if present (silently), inserts plus a
    /// `like` notification to the post owner if not. Returns the new
    /// liked state. This is a toggle, not a set — calling twice flips
    /// state twice.
    pub fn toggle_like(
        &self,
        like_id: &str,
        post_id: &str,
        actor_id: &str,
        actor_name: &str,
    ) -> Result<bool, ActionError> {
        self.with_action(|conn| {
            let tx = conn.transaction()?;
            let post = load_post(&tx, post_id)?;

            let existing: Option<String> = tx
                .query_row(
                    "SELECT id FROM likes WHERE post_id = ?1 AND user_id = ?2",
                    params![post_id, actor_id],
                    |row| row.get(0),
                )
                .optional()?;

            let liked = if let Some(existing_id) = existing {
                // Unlike is silent: no notification.
                tx.execute("DELETE FROM likes WHERE id = ?1", [&existing_id])?;
                false
            } else {
                tx.execute(
                    "INSERT INTO likes (id, post_id, user_id) VALUES (?1, ?2, ?3)",
                    params![like_id, post_id, actor_id],
                )?;
                notify::insert(
                    &tx,
                    &post.user_id,
                    post_id,
                    actor_id,
                    actor_name,
                    &notify::post_label(post.description.as_deref(), post_id),
                    &NotificationKind::Like,
                )?;
                true
            };

            tx.commit()?;
            Ok(liked)
        })
    }

    /// Append a comment plus a `comment` notification carrying a
    /// bounded preview of the body.
    pub fn add_comment(
        &self,
        comment_id: &str,
        post_id: &str,
        actor_id: &str,
        actor_name: &str,
        body: &str,
    ) -> Result<(), ActionError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(ActionError::Validation(
                "comment cannot be empty".to_string(),
            ));
        }

        self.with_action(|conn| {
            let tx = conn.transaction()?;
            let post = load_post(&tx, post_id)?;

            tx.execute(
                "INSERT INTO comments (id, post_id, user_id, body) VALUES (?1, ?2, ?3, ?4)",
                params![comment_id, post_id, actor_id, body],
            )?;
            notify::insert(
                &tx,
                &post.user_id,
                post_id,
                actor_id,
                actor_name,
                &notify::post_label(post.description.as_deref(), post_id),
                &NotificationKind::Comment {
                    preview: comment_preview(body),
                },
            )?;

            tx.commit()?;
            Ok(())
        })
    }

    /// Finalize a sale: insert the order, mark the post sold, notify
    /// the seller — one atomic unit. The mark-sold update is
    /// conditional on `sold = 0`, so of two racing checkouts exactly
    /// one commits and the loser fails with `PreconditionFailed`.
    pub fn submit_checkout_address(
        &self,
        order_id: &str,
        post_id: &str,
        buyer_id: &str,
        buyer_name: &str,
        address: &ShippingAddress<'_>,
    ) -> Result<(), ActionError> {
        let address = address.validated()?;

        self.with_action(|conn| {
            let tx = conn.transaction()?;
            let post = load_post(&tx, post_id)?;

            if post.status != "sell" {
                return Err(ActionError::PreconditionFailed(
                    "this post is not listed for sale".to_string(),
                ));
            }
            if post.sold {
                return Err(ActionError::PreconditionFailed(
                    "this item has already been sold".to_string(),
                ));
            }

            tx.execute(
                "INSERT INTO orders (id, post_id, user_id, street, city, state, zip_code, country)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    order_id,
                    post_id,
                    buyer_id,
                    address.street,
                    address.city,
                    address.state,
                    address.zip_code,
                    address.country,
                ],
            )?;

            // Conditional update: re-checks `sold` inside the same
            // transaction so two racing checkouts cannot both succeed.
            let updated = tx.execute(
                "UPDATE posts SET sold = 1 WHERE id = ?1 AND sold = 0",
                [post_id],
            )?;
            if updated == 0 {
                return Err(ActionError::PreconditionFailed(
                    "this item has already been sold".to_string(),
                ));
            }

            notify::insert(
                &tx,
                &post.user_id,
                post_id,
                buyer_id,
                buyer_name,
                &notify::post_label(post.description.as_deref(), post_id),
                &NotificationKind::Purchase {
                    price_cents: post.price_cents.unwrap_or(0),
                    address: address.formatted(),
                },
            )?;

            tx.commit()?;
            Ok(())
        })
    }

    /// Post-auction winners submit a shipping address for an
    /// already-sold post. One address per (post, user); a second
    /// submission is a `Conflict`.
    pub fn submit_bid_address(
        &self,
        bid_id: &str,
        post_id: &str,
        actor_id: &str,
        actor_name: &str,
        address: &str,
    ) -> Result<(), ActionError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ActionError::Validation(
                "address cannot be empty".to_string(),
            ));
        }

        self.with_action(|conn| {
            let tx = conn.transaction()?;
            let post = load_post(&tx, post_id)?;

            if !post.sold {
                return Err(ActionError::PreconditionFailed(
                    "this post has not been sold yet".to_string(),
                ));
            }

            let existing: Option<String> = tx
                .query_row(
                    "SELECT id FROM bid_addresses WHERE post_id = ?1 AND user_id = ?2",
                    params![post_id, actor_id],
                    |row| row.get(0),
                )
                .optional()?;
            if existing.is_some() {
                return Err(ActionError::Conflict(
                    "you have already submitted an address for this post".to_string(),
                ));
            }

            tx.execute(
                "INSERT INTO bid_addresses (id, post_id, user_id, address) VALUES (?1, ?2, ?3, ?4)",
                params![bid_id, post_id, actor_id, address],
            )?;
            notify::insert(
                &tx,
                &post.user_id,
                post_id,
                actor_id,
                actor_name,
                &notify::post_label(post.description.as_deref(), post_id),
                &NotificationKind::AddressSubmitted {
                    address: address.to_string(),
                },
            )?;

            tx.commit()?;
            Ok(())
        })
    }
}
