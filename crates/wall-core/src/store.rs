use std::sync::Arc;

use tokio::sync::watch;

use crate::{constant::POSTS_KEY, post::Post, storage::KeyValueStore, WallResult};

/// The wall's posts, newest first, mirrored to a [`KeyValueStore`] on every
/// change. Every successfully persisted list is published to subscribers.
pub struct PostStore<S> {
    posts: Vec<Post>,
    storage: S,
    publisher: watch::Sender<Arc<Vec<Post>>>,
}

impl<S: KeyValueStore> PostStore<S> {
    /// Reads the persisted list. A missing, unreadable or corrupt value
    /// gives an empty wall; the failure is only logged.
    pub fn load(storage: S) -> Self {
        let posts = match storage.get(POSTS_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<Post>>(&raw).unwrap_or_else(|err| {
                tracing::warn!(key = POSTS_KEY, %err, "failed to parse stored posts");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(key = POSTS_KEY, %err, "failed to read stored posts");
                Vec::new()
            }
        };
        tracing::debug!(count = posts.len(), "loaded posts");

        let (publisher, _) = watch::channel(Arc::new(posts.clone()));
        Self {
            posts,
            storage,
            publisher,
        }
    }

    /// Puts `post` at the top of the wall and writes the full list back.
    ///
    /// # Errors
    ///
    /// If serialization or the write fails, the post is taken off the list
    /// again so that memory and storage stay equal, and the error is
    /// returned. Subscribers are not notified in that case.
    pub fn append(&mut self, post: Post) -> WallResult<()> {
        self.posts.insert(0, post);
        if let Err(err) = self.persist() {
            self.posts.remove(0);
            return Err(err);
        }
        self.publisher.send_replace(Arc::new(self.posts.clone()));
        Ok(())
    }

    fn persist(&mut self) -> WallResult<()> {
        let raw = serde_json::to_string(&self.posts)?;
        self.storage.set(POSTS_KEY, &raw)?;
        tracing::debug!(count = self.posts.len(), "persisted posts");
        Ok(())
    }

    /// Current posts, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// A handle that always holds the latest published list.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Post>>> {
        self.publisher.subscribe()
    }
}
