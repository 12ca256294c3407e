use std::sync::Arc;

use tokio::sync::watch;

use crate::{post::Post, WallResult};

/// Renders every post as a card, newest first. No paging: the whole list
/// is drawn each time.
pub fn render(posts: &[Post]) -> String {
    if posts.is_empty() {
        return String::from("No posts yet.");
    }
    posts
        .iter()
        .map(|post| post.to_string())
        .collect::<Vec<String>>()
        .join("\n")
}

/// The stored representation of `posts`, pretty printed.
pub fn render_json(posts: &[Post]) -> WallResult<String> {
    Ok(serde_json::to_string_pretty(posts)?)
}

/// A feed bound to a [`PostStore`](crate::store::PostStore) subscription.
/// It redraws whenever the store publishes a new list.
pub struct FeedView {
    rx: watch::Receiver<Arc<Vec<Post>>>,
}

impl FeedView {
    pub fn new(rx: watch::Receiver<Arc<Vec<Post>>>) -> Self {
        Self { rx }
    }

    /// Renders the latest published list and marks it as seen.
    pub fn current(&mut self) -> String {
        render(&self.rx.borrow_and_update())
    }

    /// Waits for the next list and renders it. Returns `None` once the
    /// store is gone.
    pub async fn changed(&mut self) -> Option<String> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{storage::MemoryStorage, store::PostStore};

    #[test]
    fn empty_feed_has_placeholder() {
        assert_eq!(render(&[]), "No posts yet.");
    }

    #[test]
    fn cards_follow_list_order() {
        let older = Post::new("older post", None).unwrap();
        let newer = Post::new("newer post", Some("https://cdn.test/1.png".into())).unwrap();
        let feed = render(&[newer, older]);

        let newer_at = feed.find("newer post").unwrap();
        let older_at = feed.find("older post").unwrap();
        assert!(newer_at < older_at);
        assert_eq!(feed.matches("[image]").count(), 1);
        assert_eq!(feed.matches("Robert").count(), 2);
    }

    #[test]
    fn json_matches_stored_shape() {
        let post = Post::new("hi", None).unwrap();
        let json = render_json(&[post.clone()]).unwrap();
        let parsed: Vec<Post> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, [post]);
    }

    #[tokio::test]
    async fn view_redraws_after_append() {
        let mut store = PostStore::load(MemoryStorage::new());
        let mut view = FeedView::new(store.subscribe());
        assert_eq!(view.current(), "No posts yet.");

        store.append(Post::new("fresh", None).unwrap()).unwrap();
        let frame = view.changed().await.unwrap();
        assert!(frame.contains("fresh"));
        assert_eq!(frame.matches("Robert").count(), 1);

        drop(store);
        assert!(view.changed().await.is_none());
    }
}
