use thiserror::Error as ThisError;

pub type Result<T, E = MessageError> = ::core::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum MessageError {
    #[error(transparent)]
    Encoding(#[from] dataset_abi_packed::Error),

    #[error("owners and tags must be paired: got {owners} owners and {tags} tags")]
    LengthMismatch { owners: usize, tags: usize },
}
