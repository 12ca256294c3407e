use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    /// The submission was abandoned after the user was alerted.
    #[error("Post was not shared")]
    Aborted,
}
