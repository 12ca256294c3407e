use thiserror::Error;

pub type WallResult<T> = anyhow::Result<T>;

#[derive(Error, Debug)]
pub enum WallError {
    /// An empty (or whitespace only) message was provided for the post.
    #[error("Post cannot be empty")]
    EmptyPost,
    /// The post length exceeds the maximum length.
    #[error("Max allowed size of post: {max_size}, current size: {curr_size}")]
    InvalidPostLength { max_size: usize, curr_size: usize },
    /// The hosted object store refused or failed the upload.
    #[error("Upload failed: {msg}")]
    Upload { msg: String },
    /// The local key-value store failed to read or write.
    #[error("Storage error: {msg}")]
    Storage { msg: String },
    #[error("Config error: {msg}")]
    Config { msg: String },
    /// Custom Error type for errors not covered by the above errors.
    #[error("{msg}")]
    CustomError { msg: String },
}

impl WallError {
    pub fn custom_error(msg: String) -> Self {
        Self::CustomError { msg }
    }

    pub fn upload_error(msg: String) -> Self {
        Self::Upload { msg }
    }

    pub fn storage_error(msg: String) -> Self {
        Self::Storage { msg }
    }

    pub fn config_error(msg: String) -> Self {
        Self::Config { msg }
    }
}
