use bitflags::bitflags;

use crate::{Aperture, DmaError};

bitflags! {
    /// Allocation flags understood by [`DmaAllocator`] implementations.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
    pub struct DmaFlags: u32 {
        /// Require physically contiguous backing.
        const FORCE_CONTIGUOUS = 1 << 1;
    }
}

/// Descriptor for a DMA buffer.
///
/// `handle` is an allocator-defined cookie; two live buffers never share one. `gpu_va` is filled in
/// by the owner once the buffer has been mapped into an address space.
#[derive(Debug, PartialEq, Eq)]
pub struct GpuMem {
    pub handle: u64,
    pub size: u64,
    pub aperture: Aperture,
    pub flags: DmaFlags,
    pub gpu_va: Option<u64>,
}

/// Backing-store allocator.
pub trait DmaAllocator {
    /// Allocate `size` bytes of system memory.
    fn alloc_sys(&mut self, flags: DmaFlags, size: u64) -> Result<GpuMem, DmaError>;

    /// Release a buffer. The buffer must no longer be mapped.
    fn free(&mut self, mem: GpuMem);
}
