use gpu_mem::{AccessError, DmaError, MapError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SubctxError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubctxError {
    #[error("failed to allocate subctx header: {0}")]
    Allocation(#[from] DmaError),

    #[error("failed to map subctx header: {0}")]
    Mapping(#[from] MapError),

    #[error("failed to open device memory access window: {0}")]
    Access(#[from] AccessError),

    #[error("invalid channel state: {0}")]
    InvalidState(&'static str),

    #[error("invalid subctx configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_subctx_count {count} outside 1..={limit}")]
    SubctxCountOutOfRange { count: u32, limit: u32 },

    #[error("header size {size} bytes is smaller than the {required}-byte record")]
    HeaderTooSmall { size: u64, required: u64 },

    #[error("subctx id {id} outside 0..{max}")]
    SubctxIdOutOfRange { id: u32, max: u32 },
}
