/// Memory domain backing a buffer.
///
/// The aperture selects the path hardware uses to reach the memory, so every structure that stores
/// a device address also stores a target field derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aperture {
    /// System memory, snooped by the CPU caches.
    SysmemCoherent,
    /// System memory, not snooped.
    SysmemNonCoherent,
    /// Video memory local to the GPU.
    Vidmem,
}

impl Aperture {
    /// Pick the hardware encoding for this aperture out of a per-register triple.
    pub fn mask(self, sysmem_ncoh: u32, sysmem_coh: u32, vidmem: u32) -> u32 {
        match self {
            Self::SysmemNonCoherent => sysmem_ncoh,
            Self::SysmemCoherent => sysmem_coh,
            Self::Vidmem => vidmem,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_selects_matching_encoding() {
        assert_eq!(Aperture::SysmemNonCoherent.mask(3, 2, 0), 3);
        assert_eq!(Aperture::SysmemCoherent.mask(3, 2, 0), 2);
        assert_eq!(Aperture::Vidmem.mask(3, 2, 0), 0);
    }
}
