//! The whole screen: a fixed profile sidebar next to the composer and the
//! feed.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::{
    composer::{Composer, ImageAttachment, Notifier, SubmitOutcome},
    constant,
    feed::FeedView,
    storage::{KeyValueStore, ObjectStore},
    store::PostStore,
};

/// Static sidebar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub photo: String,
    pub tagline: String,
    pub networks: String,
    pub current_city: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: constant::AUTHOR.to_string(),
            photo: constant::PROFILE_PHOTO.to_string(),
            tagline: String::from("wall"),
            networks: String::from("Stanford Alum"),
            current_city: String::from("Palo Alto, CA"),
        }
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[photo: {}]", self.photo)?;
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", self.tagline)?;
        writeln!(f, "Networks: {}", self.networks)?;
        write!(f, "Current City: {}", self.current_city)
    }
}

pub struct Shell<S> {
    profile: Profile,
    store: PostStore<S>,
    composer: Composer,
    feed: FeedView,
}

impl<S: KeyValueStore> Shell<S> {
    /// Loads the wall from `storage` and wires the composer and feed to it.
    pub fn new(
        storage: S,
        bucket: impl Into<String>,
        uploader: Arc<dyn ObjectStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let store = PostStore::load(storage);
        let feed = FeedView::new(store.subscribe());
        Self {
            profile: Profile::default(),
            store,
            composer: Composer::new(bucket, uploader, notifier),
            feed,
        }
    }

    /// Fills the composer and submits it.
    pub async fn share(&mut self, body: &str, image: Option<ImageAttachment>) -> SubmitOutcome {
        self.composer.set_body(body);
        match image {
            Some(image) => self.composer.attach_image(image),
            None => self.composer.clear_image(),
        }
        self.composer.submit(&mut self.store).await
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &PostStore<S> {
        &self.store
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    /// Sidebar, composer status and the feed, stacked.
    pub fn render(&mut self) -> String {
        let draft = self.composer.body();
        let draft_line = if draft.is_empty() {
            String::from("What's on your mind?")
        } else {
            draft.to_string()
        };
        let share = if self.composer.can_submit() {
            "[Share]"
        } else {
            "[Share (disabled)]"
        };
        let image = self
            .composer
            .image()
            .map(|image| format!(" [image: {}]", image.filename()))
            .unwrap_or_default();

        format!(
            "{profile}\n{rule}\n> {draft_line}\n  {count}/{max}{image} {share}\n{rule}\n{feed}",
            profile = self.profile,
            rule = "=".repeat(54),
            count = draft.chars().count(),
            max = constant::MAX_POST_LEN,
            feed = self.feed.current(),
        )
    }
}
