//! Helpers for splitting 64-bit device addresses into the 32-bit halves most hardware structures
//! store them as.

/// Low 32 bits of `value`.
#[inline]
pub const fn lo32(value: u64) -> u32 {
    value as u32
}

/// High 32 bits of `value`.
#[inline]
pub const fn hi32(value: u64) -> u32 {
    (value >> 32) as u32
}

/// Inverse of [`lo32`]/[`hi32`].
#[inline]
pub const fn join_lo_hi(lo: u32, hi: u32) -> u64 {
    ((hi as u64) << 32) | lo as u64
}
