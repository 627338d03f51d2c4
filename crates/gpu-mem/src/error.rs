use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DmaError {
    #[error("out of memory allocating {size} bytes")]
    OutOfMemory { size: u64 },

    #[error("invalid allocation size {size}")]
    InvalidSize { size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("GPU virtual address space exhausted mapping {size} bytes")]
    VaExhausted { size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("failed to create a CPU mapping for buffer {handle}")]
    CpuMapFailed { handle: u64 },
}
