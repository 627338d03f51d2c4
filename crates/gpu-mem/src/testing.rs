//! Recording implementations of the collaborator traits.
//!
//! [`RecordingGpu`] backs every buffer with a `Vec<u8>` and appends a [`GpuEvent`] for each call, so
//! tests can assert on both final memory contents and the order operations were issued in.
//! [`RecordingVm`] does the same for address-space operations. Both panic on misuse (double free,
//! unmapping something that is not mapped, out-of-bounds access) rather than returning errors, since
//! such misuse is a bug in the code under test.

use std::collections::BTreeMap;

use crate::{
    AccessError, Aperture, DmaAllocator, DmaError, DmaFlags, GpuMem, L2Cache, MapAttrs, MapError,
    MemAccess, PageDirectory, Vm,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuEvent {
    Alloc { handle: u64, size: u64, flags: DmaFlags },
    Free { handle: u64 },
    Begin { handle: u64 },
    End { handle: u64 },
    Write { handle: u64, offset: u32, value: u32 },
    Memset { handle: u64, offset: u32, byte: u8, len: u64 },
    L2Flush { invalidate: bool },
}

#[derive(Debug)]
pub struct RecordingGpu {
    events: Vec<GpuEvent>,
    buffers: BTreeMap<u64, Vec<u8>>,
    windows: BTreeMap<u64, usize>,
    next_handle: u64,
    alloc_fill: u8,
    alloc_aperture: Aperture,
    /// Fail every `alloc_sys` with [`DmaError::OutOfMemory`].
    pub fail_alloc: bool,
    /// Fail every `begin` with [`AccessError::CpuMapFailed`].
    pub fail_begin: bool,
}

impl Default for RecordingGpu {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            buffers: BTreeMap::new(),
            windows: BTreeMap::new(),
            next_handle: 1,
            alloc_fill: 0,
            alloc_aperture: Aperture::SysmemNonCoherent,
            fail_alloc: false,
            fail_begin: false,
        }
    }

    /// Fill new allocations with `byte` instead of zero, to catch code that relies on fresh DMA
    /// memory being cleared.
    pub fn with_alloc_fill(mut self, byte: u8) -> Self {
        self.alloc_fill = byte;
        self
    }

    pub fn with_alloc_aperture(mut self, aperture: Aperture) -> Self {
        self.alloc_aperture = aperture;
        self
    }

    pub fn events(&self) -> &[GpuEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn count(&self, pred: impl Fn(&GpuEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// `(offset, value)` of every recorded write to `mem`, in issue order.
    pub fn writes<'a>(&'a self, mem: &GpuMem) -> impl Iterator<Item = (u32, u32)> + 'a {
        let handle = mem.handle;
        self.events.iter().filter_map(move |e| match *e {
            GpuEvent::Write {
                handle: h,
                offset,
                value,
            } if h == handle => Some((offset, value)),
            _ => None,
        })
    }

    pub fn is_window_open(&self, mem: &GpuMem) -> bool {
        self.windows.get(&mem.handle).copied().unwrap_or(0) > 0
    }

    pub fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub fn bytes(&self, mem: &GpuMem) -> &[u8] {
        self.buffers
            .get(&mem.handle)
            .unwrap_or_else(|| panic!("buffer {} is not live", mem.handle))
    }

    fn range(&mut self, mem: &GpuMem, offset: u32, len: u64) -> &mut [u8] {
        let buf = self
            .buffers
            .get_mut(&mem.handle)
            .unwrap_or_else(|| panic!("access to buffer {} which is not live", mem.handle));
        let start = offset as usize;
        let end = start + len as usize;
        assert!(
            end <= buf.len(),
            "access out of bounds: handle={} offset=0x{offset:x} len={len} size={}",
            mem.handle,
            buf.len()
        );
        &mut buf[start..end]
    }
}

impl DmaAllocator for RecordingGpu {
    fn alloc_sys(&mut self, flags: DmaFlags, size: u64) -> Result<GpuMem, DmaError> {
        if self.fail_alloc {
            return Err(DmaError::OutOfMemory { size });
        }
        if size == 0 {
            return Err(DmaError::InvalidSize { size });
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        self.buffers
            .insert(handle, vec![self.alloc_fill; size as usize]);
        self.events.push(GpuEvent::Alloc {
            handle,
            size,
            flags,
        });
        Ok(GpuMem {
            handle,
            size,
            aperture: self.alloc_aperture,
            flags,
            gpu_va: None,
        })
    }

    fn free(&mut self, mem: GpuMem) {
        assert!(
            self.buffers.remove(&mem.handle).is_some(),
            "double free of buffer {}",
            mem.handle
        );
        assert!(
            !self.is_window_open(&mem),
            "buffer {} freed with an open access window",
            mem.handle
        );
        self.events.push(GpuEvent::Free { handle: mem.handle });
    }
}

impl MemAccess for RecordingGpu {
    fn begin(&mut self, mem: &GpuMem) -> Result<(), AccessError> {
        if self.fail_begin {
            return Err(AccessError::CpuMapFailed { handle: mem.handle });
        }
        *self.windows.entry(mem.handle).or_insert(0) += 1;
        self.events.push(GpuEvent::Begin { handle: mem.handle });
        Ok(())
    }

    fn end(&mut self, mem: &GpuMem) {
        let depth = self
            .windows
            .get_mut(&mem.handle)
            .filter(|d| **d > 0)
            .unwrap_or_else(|| panic!("end without begin on buffer {}", mem.handle));
        *depth -= 1;
        self.events.push(GpuEvent::End { handle: mem.handle });
    }

    fn rd(&mut self, mem: &GpuMem, offset: u32) -> u32 {
        let mut word = [0u8; 4];
        word.copy_from_slice(self.range(mem, offset, 4));
        u32::from_le_bytes(word)
    }

    fn wr(&mut self, mem: &GpuMem, offset: u32, value: u32) {
        self.range(mem, offset, 4)
            .copy_from_slice(&value.to_le_bytes());
        self.events.push(GpuEvent::Write {
            handle: mem.handle,
            offset,
            value,
        });
    }

    fn memset(&mut self, mem: &GpuMem, offset: u32, byte: u8, len: u64) {
        self.range(mem, offset, len).fill(byte);
        self.events.push(GpuEvent::Memset {
            handle: mem.handle,
            offset,
            byte,
            len,
        });
    }
}

impl L2Cache for RecordingGpu {
    fn l2_flush(&mut self, invalidate: bool) {
        self.events.push(GpuEvent::L2Flush { invalidate });
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VmEvent {
    Map { handle: u64, gpu_va: u64, attrs: MapAttrs },
    Unmap { handle: u64, gpu_va: u64 },
}

#[derive(Debug)]
pub struct RecordingVm {
    pdb: PageDirectory,
    events: Vec<VmEvent>,
    mapped: BTreeMap<u64, u64>,
    next_va: u64,
    /// Fail every `map` with [`MapError::VaExhausted`].
    pub fail_map: bool,
}

impl RecordingVm {
    pub const VA_BASE: u64 = 0x1_0000_0000;
    const VA_ALIGN: u64 = 0x1000;

    pub fn new(pdb: PageDirectory) -> Self {
        Self {
            pdb,
            events: Vec::new(),
            mapped: BTreeMap::new(),
            next_va: Self::VA_BASE,
            fail_map: false,
        }
    }

    pub fn events(&self) -> &[VmEvent] {
        &self.events
    }

    pub fn is_mapped(&self, mem: &GpuMem) -> bool {
        self.mapped.contains_key(&mem.handle)
    }

    pub fn mapping_count(&self) -> usize {
        self.mapped.len()
    }
}

impl Vm for RecordingVm {
    fn pdb(&self) -> PageDirectory {
        self.pdb
    }

    fn map(&mut self, mem: &GpuMem, attrs: MapAttrs) -> Result<u64, MapError> {
        if self.fail_map {
            return Err(MapError::VaExhausted { size: attrs.size });
        }
        assert!(
            !self.mapped.contains_key(&mem.handle),
            "buffer {} mapped twice",
            mem.handle
        );
        let gpu_va = self.next_va;
        self.next_va += attrs.size.max(1).div_ceil(Self::VA_ALIGN) * Self::VA_ALIGN;
        self.mapped.insert(mem.handle, gpu_va);
        self.events.push(VmEvent::Map {
            handle: mem.handle,
            gpu_va,
            attrs,
        });
        Ok(gpu_va)
    }

    fn unmap(&mut self, mem: &GpuMem, gpu_va: u64) {
        assert_eq!(
            self.mapped.remove(&mem.handle),
            Some(gpu_va),
            "unmap of buffer {} at 0x{gpu_va:x} which is not mapped there",
            mem.handle
        );
        self.events.push(VmEvent::Unmap {
            handle: mem.handle,
            gpu_va,
        });
    }
}
