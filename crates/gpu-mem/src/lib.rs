//! Device-memory collaborator contracts.
//!
//! The subcontext code never talks to a concrete allocator or page-table implementation. Instead it
//! is handed objects implementing the traits in this crate:
//! - [`DmaAllocator`] for backing storage,
//! - [`Vm`] for mapping buffers into a channel's GPU virtual address space (and reporting the
//!   address space's page directory base),
//! - [`MemAccess`] for CPU reads/writes of device memory, with [`AccessWindow`] as the scoped
//!   `begin`/`end` handle, and
//! - [`L2Cache`] for the flush that orders CPU writes against GPU reads.
//!
//! With the `test-utils` feature, [`testing`] provides in-memory implementations that record every
//! call so tests can assert on ordering and call counts.
#![forbid(unsafe_code)]

pub mod access;
pub mod addr;
pub mod aperture;
pub mod cache;
pub mod dma;
pub mod error;
pub mod vm;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use access::{AccessWindow, MemAccess, WordWriter};
pub use addr::{hi32, join_lo_hi, lo32};
pub use aperture::Aperture;
pub use cache::L2Cache;
pub use dma::{DmaAllocator, DmaFlags, GpuMem};
pub use error::{AccessError, DmaError, MapError};
pub use vm::{MapAttrs, PageDirectory, Vm};
