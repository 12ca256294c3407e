//! Welcome to the documentation of Wall. A single profile shares short
//! posts, optionally with an image, and reads them back newest first.
//!
//! The pieces, leaves first: [`storage`] adapters, the [`store::PostStore`]
//! that mirrors the list into local storage, the [`composer::Composer`]
//! that turns a draft into a post, the [`feed`] renderer, and the
//! [`shell::Shell`] that puts them on one screen.
mod error;
pub mod composer;
pub mod config;
pub mod feed;
pub mod post;
pub mod shell;
pub mod storage;
pub mod store;

pub use error::{WallError, WallResult};

pub mod constant {
    /// Maximum post length, in characters.
    pub const MAX_POST_LEN: usize = 280;
    /// The wall has exactly one author.
    pub const AUTHOR: &str = "Robert";
    pub const PROFILE_PHOTO: &str = "/placeholder.jpg";
    /// Local storage key holding the serialized post list.
    pub const POSTS_KEY: &str = "wall-posts";
    /// Hosted storage project. Only the access key comes from deployment.
    pub const DEFAULT_STORAGE_URL: &str = "https://xqsoqsuvjvfidxxnggsc.supabase.co";
    pub const DEFAULT_BUCKET: &str = "images";
    pub const CONFIG_DIR: &str = ".wall";
    pub const CONFIG_FILE: &str = "wall.toml";
    pub const CONFIG_ENV: &str = "WALLCONF";
    pub const STORAGE_KEY_ENV: &str = "WALL_STORAGE_KEY";
    pub const DATA_DIR: &str = "data";
    pub const DATA_FILE: &str = "wall.db";
}
