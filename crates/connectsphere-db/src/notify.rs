//! Notification construction. Messages are rendered from templates
//! keyed by notification kind and appended inside the caller's
//! transaction, so a mutation and its notification land together or
//! not at all.

use rusqlite::Transaction;
use uuid::Uuid;

/// What happened, plus the action-specific details the message embeds.
pub enum NotificationKind {
    Like,
    Comment { preview: String },
    Purchase { price_cents: i64, address: String },
    AddressSubmitted { address: String },
}

impl NotificationKind {
    pub fn tag(&self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Comment { .. } => "comment",
            NotificationKind::Purchase { .. } => "purchase",
            NotificationKind::AddressSubmitted { .. } => "address_submitted",
        }
    }

    pub fn message(&self, actor: &str, post_label: &str) -> String {
        match self {
            NotificationKind::Like => {
                format!("{} liked your post: {}", actor, post_label)
            }
            NotificationKind::Comment { preview } => {
                format!("{} commented on your post: {}", actor, preview)
            }
            NotificationKind::Purchase {
                price_cents,
                address,
            } => format!(
                "{} purchased your post: {} for ${}. Shipping address: {}",
                actor,
                post_label,
                format_price(*price_cents),
                address
            ),
            NotificationKind::AddressSubmitted { address } => {
                format!(
                    "{} has submitted their address for your post: {}",
                    actor, address
                )
            }
        }
    }
}

/// How a post is referred to in messages: its description, or a
/// placeholder when the description is empty.
pub fn post_label(description: Option<&str>, post_id: &str) -> String {
    match description {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ => format!("Post {}", post_id),
    }
}

/// Dollars with two decimals, e.g. 5000 -> "50.00".
pub fn format_price(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Append a notification row addressed to `recipient_id` within the
/// caller's transaction.
pub fn insert(
    tx: &Transaction<'_>,
    recipient_id: &str,
    post_id: &str,
    actor_id: &str,
    actor_name: &str,
    post_label: &str,
    kind: &NotificationKind,
) -> rusqlite::Result<()> {
    tx.execute(
        "INSERT INTO notifications (id, user_id, kind, post_id, actor_id, message)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            Uuid::new_v4().to_string(),
            recipient_id,
            kind.tag(),
            post_id,
            actor_id,
            kind.message(actor_name, post_label),
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(5000), "50.00");
        assert_eq!(format_price(5), "0.05");
        assert_eq!(format_price(199), "1.99");
        assert_eq!(format_price(120050), "1200.50");
    }

    #[test]
    fn post_label_falls_back_to_id() {
        assert_eq!(post_label(Some("Sunset oil"), "p1"), "Sunset oil");
        assert_eq!(post_label(Some("   "), "p1"), "Post p1");
        assert_eq!(post_label(None, "p1"), "Post p1");
    }

    #[test]
    fn purchase_message_embeds_price_and_address() {
        let kind = NotificationKind::Purchase {
            price_cents: 5000,
            address: "1 Main St, Springfield, IL 62701, USA".to_string(),
        };
        let msg = kind.message("bob", "Sunset oil");
        assert_eq!(
            msg,
            "bob purchased your post: Sunset oil for $50.00. \
             Shipping address: 1 Main St, Springfield, IL 62701, USA"
        );
    }
}
