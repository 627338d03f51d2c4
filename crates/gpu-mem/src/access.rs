use crate::{hi32, lo32, AccessError, GpuMem};

/// CPU access to device memory.
///
/// Buffers allocated without a permanent kernel mapping must be bracketed by [`MemAccess::begin`]
/// and [`MemAccess::end`]; prefer [`AccessWindow`], which pairs them automatically. Offsets are
/// byte offsets into the buffer unless the method name says otherwise.
pub trait MemAccess {
    /// Make `mem` CPU-accessible. May block while a mapping is created.
    fn begin(&mut self, mem: &GpuMem) -> Result<(), AccessError>;

    /// Release the CPU access set up by `begin`, making prior writes visible to the device.
    fn end(&mut self, mem: &GpuMem);

    fn rd(&mut self, mem: &GpuMem, offset: u32) -> u32;

    fn wr(&mut self, mem: &GpuMem, offset: u32, value: u32);

    fn memset(&mut self, mem: &GpuMem, offset: u32, byte: u8, len: u64);

    /// Read the 32-bit word at word index `word`.
    fn rd32(&mut self, mem: &GpuMem, word: u32) -> u32 {
        self.rd(mem, word * 4)
    }

    /// Write the 32-bit word at word index `word`.
    fn wr32(&mut self, mem: &GpuMem, word: u32, value: u32) {
        self.wr(mem, word * 4, value);
    }

    /// Write a 64-bit little-endian value as two words, low word first.
    fn wr64(&mut self, mem: &GpuMem, offset: u32, value: u64) {
        self.wr(mem, offset, lo32(value));
        self.wr(mem, offset + 4, hi32(value));
    }
}

/// Sink for 32-bit writes into a single buffer.
///
/// Generation-specific writers take this instead of a concrete window type so they can be used as
/// trait objects.
pub trait WordWriter {
    fn write_word(&mut self, offset: u32, value: u32);
}

/// An open CPU access window on one buffer.
///
/// `end` is called when the window is dropped, so every exit path (including `?`) closes it.
pub struct AccessWindow<'a, A: MemAccess + ?Sized> {
    access: &'a mut A,
    mem: &'a GpuMem,
}

impl<'a, A: MemAccess + ?Sized> AccessWindow<'a, A> {
    pub fn open(access: &'a mut A, mem: &'a GpuMem) -> Result<Self, AccessError> {
        access.begin(mem)?;
        Ok(Self { access, mem })
    }

    pub fn wr(&mut self, offset: u32, value: u32) {
        self.access.wr(self.mem, offset, value);
    }

    /// Zero the whole buffer.
    pub fn clear(&mut self) {
        let size = self.mem.size;
        self.access.memset(self.mem, 0, 0, size);
    }
}

impl<A: MemAccess + ?Sized> WordWriter for AccessWindow<'_, A> {
    fn write_word(&mut self, offset: u32, value: u32) {
        self.wr(offset, value);
    }
}

impl<A: MemAccess + ?Sized> Drop for AccessWindow<'_, A> {
    fn drop(&mut self) {
        self.access.end(self.mem);
    }
}
