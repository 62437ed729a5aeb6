use crate::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum ChannelError {
    #[error("operation was cancelled")]
    Cancelled,
    #[error("operation deadline exceeded")]
    DeadlineExceeded,
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}
impl std::fmt::Debug for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
