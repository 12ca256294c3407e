//! This module defines the `Post` struct, a single entry on the wall.

use crate::{constant, WallError, WallResult};
use chrono::{DateTime, Local};
use std::fmt::{Display, Formatter};
use textwrap::core::display_width;
use textwrap::{self, wrap};
use uuid::Uuid;

const CARD_WIDTH: usize = 50;

/// Every time the profile owner shares something, this is the struct
/// that stores all the necessary data. Posts are never modified after
/// creation, so all fields are private and only exposed by reference.
///
/// The serialized field names are the ones stored under
/// [`constant::POSTS_KEY`], so they must not change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "StoredPost")]
pub struct Post {
    id: String,
    #[serde(rename = "name")]
    author: String,
    #[serde(rename = "message")]
    body: String,
    #[serde(rename = "timestamp")]
    created_at: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
}

/// A post as read back from storage, before its invariants are checked.
#[derive(serde::Deserialize)]
struct StoredPost {
    id: String,
    name: String,
    message: String,
    timestamp: String,
    #[serde(rename = "imageUrl", default)]
    image_url: Option<String>,
}

impl TryFrom<StoredPost> for Post {
    type Error = WallError;

    fn try_from(stored: StoredPost) -> Result<Self, Self::Error> {
        verify_body(&stored.message)?;
        if stored.name != constant::AUTHOR {
            return Err(WallError::custom_error(format!(
                "Unknown author: {}",
                stored.name
            )));
        }
        Ok(Post {
            id: stored.id,
            author: stored.name,
            body: stored.message,
            created_at: stored.timestamp,
            image_url: stored.image_url,
        })
    }
}

impl Post {
    /// Create a new post authored by the wall owner. The `body` is trimmed
    /// before validation, and `image_url` is the resolved public address of
    /// an already uploaded image.
    pub fn new(body: &str, image_url: Option<String>) -> WallResult<Self> {
        Self::new_at(body, image_url, Local::now())
    }

    pub(crate) fn new_at(
        body: &str,
        image_url: Option<String>,
        now: DateTime<Local>,
    ) -> WallResult<Self> {
        let body = body.trim();
        verify_body(body)?;
        Ok(Post {
            id: Uuid::new_v4().to_string(),
            author: constant::AUTHOR.to_string(),
            body: body.to_string(),
            created_at: format_timestamp(now),
            image_url,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// The image address, only when one was attached and it is non-empty.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Format `time` the way an en-US locale prints a local date and time,
/// e.g. `10/15/2026, 9:04:12 AM`.
pub(crate) fn format_timestamp(time: DateTime<Local>) -> String {
    time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Some necessary checks for post's body.
fn verify_body(body: &str) -> Result<(), WallError> {
    if body.trim().is_empty() {
        return Err(WallError::EmptyPost);
    }
    // Lengths are counted in characters, not bytes.
    let curr_size = body.chars().count();
    if curr_size > constant::MAX_POST_LEN {
        return Err(WallError::InvalidPostLength {
            max_size: constant::MAX_POST_LEN,
            curr_size,
        });
    }
    Ok(())
}

/// Writes `text` wrapped inside the card borders. `count` keeps the
/// alternating border pattern going across calls.
fn write_wrapped(f: &mut Formatter<'_>, text: &str, count: &mut u8) -> std::fmt::Result {
    let wrapping_config = textwrap::Options::new(CARD_WIDTH).break_words(true);
    for line in wrap(text, wrapping_config) {
        let (left_closure, right_closure) = if *count % 2 == 0 {
            ("\\ ", " /")
        } else {
            ("/ ", " \\")
        };
        let whitespace = CARD_WIDTH.saturating_sub(display_width(&line));
        writeln!(
            f,
            "{left_closure}{}{}{right_closure}",
            line,
            " ".repeat(whitespace)
        )?;
        *count = count.wrapping_add(1);
    }
    Ok(())
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-<54}", "")?;
        let mut count = 0u8;
        write_wrapped(f, &self.author, &mut count)?;
        write_wrapped(f, &self.body, &mut count)?;
        if let Some(url) = self.image_url() {
            write_wrapped(f, &format!("[image] {url}"), &mut count)?;
        }
        write_wrapped(f, &self.created_at, &mut count)?;
        write!(f, "{:-<54}", "")
    }
}
