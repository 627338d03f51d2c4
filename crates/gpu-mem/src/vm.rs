use crate::{Aperture, GpuMem, MapError};

/// Root of an address space's page tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDirectory {
    pub addr: u64,
    pub aperture: Aperture,
}

/// Attributes for a GMMU mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapAttrs {
    pub size: u64,
    /// Whether the GPU may cache the mapping in L2.
    pub cacheable: bool,
    /// Only privileged engines (e.g. context-switch firmware) may access the mapping.
    pub privileged: bool,
    pub aperture: Aperture,
}

/// A channel's GPU virtual address space.
pub trait Vm {
    fn pdb(&self) -> PageDirectory;

    /// Map `mem` and return the GPU virtual address of its first byte.
    fn map(&mut self, mem: &GpuMem, attrs: MapAttrs) -> Result<u64, MapError>;

    fn unmap(&mut self, mem: &GpuMem, gpu_va: u64);
}
