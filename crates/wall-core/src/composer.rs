//! The input side of the wall: a draft message, an optional image and the
//! submit flow that turns them into a [`Post`].

use std::{path::Path, sync::Arc};

use chrono::Utc;

use crate::{
    constant::MAX_POST_LEN,
    post::Post,
    storage::{KeyValueStore, ObjectStore},
    store::PostStore,
    WallError, WallResult,
};

/// Blocking, user facing notification. Used when a submission has to be
/// abandoned.
pub trait Notifier: Send + Sync {
    fn alert(&self, msg: &str);
}

/// An image picked for the next post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    filename: String,
    bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Reads the whole file at `path`.
    pub fn from_path(path: &Path) -> WallResult<Self> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                WallError::custom_error(format!("Not a file name: {}", path.display()))
            })?
            .to_string();
        let bytes = std::fs::read(path)?;
        Ok(Self { filename, bytes })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whatever follows the last '.' of the file name, so `.png` gives
    /// `png` too.
    pub fn extension(&self) -> Option<&str> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }

    /// Object key for an upload started at `millis` since the epoch.
    fn object_key(&self, millis: i64) -> String {
        match self.extension() {
            Some(ext) => format!("{millis}.{ext}"),
            None => millis.to_string(),
        }
    }
}

/// What a call to [`Composer::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to post (empty text) or a submission is already running.
    Ignored,
    /// The post is on the wall and the draft was cleared.
    Posted(Post),
    /// The user was alerted and the draft was kept for a retry.
    Aborted,
}

pub struct Composer {
    body: String,
    image: Option<ImageAttachment>,
    busy: bool,
    bucket: String,
    uploader: Arc<dyn ObjectStore>,
    notifier: Arc<dyn Notifier>,
}

impl Composer {
    /// Images are uploaded to `bucket` through `uploader`.
    pub fn new(
        bucket: impl Into<String>,
        uploader: Arc<dyn ObjectStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            body: String::new(),
            image: None,
            busy: false,
            bucket: bucket.into(),
            uploader,
            notifier,
        }
    }

    /// Replaces the draft. Anything past the character limit is dropped,
    /// like an input with a max length.
    pub fn set_body(&mut self, text: &str) {
        self.body = text.chars().take(MAX_POST_LEN).collect();
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.image = Some(image);
    }

    pub fn clear_image(&mut self) {
        self.image = None;
    }

    pub fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }

    /// True while an image upload is pending.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the share control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.body.trim().is_empty()
    }

    /// Uploads the image if one is attached, then puts a new post on top of
    /// `store`. Text is mandatory; an image alone is ignored.
    pub async fn submit<S: KeyValueStore>(&mut self, store: &mut PostStore<S>) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Ignored;
        }

        let image_url = match self.image.clone() {
            Some(image) => {
                self.busy = true;
                let result = self.upload(&image).await;
                self.busy = false;
                match result {
                    Ok(url) => Some(url),
                    Err(err) => {
                        tracing::warn!(%err, filename = image.filename(), "image upload failed");
                        self.notifier
                            .alert(&format!("Error uploading image: {err}"));
                        return SubmitOutcome::Aborted;
                    }
                }
            }
            None => None,
        };

        let post = match Post::new(&self.body, image_url) {
            Ok(post) => post,
            Err(err) => {
                self.notifier.alert(&format!("Unable to create post: {err}"));
                return SubmitOutcome::Aborted;
            }
        };

        if let Err(err) = store.append(post.clone()) {
            tracing::warn!(%err, "post was not saved");
            self.notifier.alert(&format!("Unable to save post: {err}"));
            return SubmitOutcome::Aborted;
        }

        self.body.clear();
        self.image = None;
        SubmitOutcome::Posted(post)
    }

    async fn upload(&self, image: &ImageAttachment) -> WallResult<String> {
        let key = image.object_key(Utc::now().timestamp_millis());
        self.uploader
            .upload(&self.bucket, &key, image.bytes().to_vec())
            .await?;
        Ok(self.uploader.public_url(&self.bucket, &key))
    }
}
