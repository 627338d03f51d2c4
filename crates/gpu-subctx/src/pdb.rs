//! Encoding of one subcontext PDB table entry.

use gpu_mem::{hi32, lo32, Aperture, PageDirectory};

use crate::field::{pack, FieldSpec};
use crate::regs::ram_in;

/// Hardware target encoding for a page directory living in `aperture`.
///
/// Subcontext PDBs in system memory are always reached non-coherently, whatever the aperture of
/// the page directory buffer itself.
pub fn aperture_target(aperture: Aperture) -> u32 {
    aperture.mask(
        ram_in::SC_PAGE_DIR_BASE_TARGET_SYS_MEM_NONCOHERENT,
        ram_in::SC_PAGE_DIR_BASE_TARGET_SYS_MEM_NONCOHERENT,
        ram_in::SC_PAGE_DIR_BASE_TARGET_VID_MEM,
    )
}

fn target(pdb: &PageDirectory) -> u32 {
    aperture_target(pdb.aperture)
}

fn page_dir_base_lo(pdb: &PageDirectory) -> u32 {
    lo32(pdb.addr >> ram_in::BASE_SHIFT)
}

/// Layout of the per-slot format word.
pub const SC_PDB_FORMAT: [FieldSpec<PageDirectory>; 7] = [
    FieldSpec::computed(ram_in::SC_PAGE_DIR_BASE_TARGET, target),
    FieldSpec::fixed(ram_in::SC_PAGE_DIR_BASE_VOL, ram_in::SC_PAGE_DIR_BASE_VOL_TRUE),
    FieldSpec::fixed(ram_in::SC_PAGE_DIR_BASE_FAULT_REPLAY_TEX, 1),
    FieldSpec::fixed(ram_in::SC_PAGE_DIR_BASE_FAULT_REPLAY_GCC, 1),
    FieldSpec::fixed(ram_in::SC_USE_VER2_PT_FORMAT, 1),
    FieldSpec::fixed(ram_in::SC_BIG_PAGE_SIZE, 1),
    FieldSpec::computed(ram_in::SC_PAGE_DIR_BASE_LO, page_dir_base_lo),
];

/// The two words written for every subcontext slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubctxPdbEntry {
    pub format_word: u32,
    pub addr_hi: u32,
}

impl SubctxPdbEntry {
    pub fn new(pdb: &PageDirectory) -> Self {
        Self {
            format_word: pack(&SC_PDB_FORMAT, pdb),
            addr_hi: hi32(pdb.addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(addr: u64, aperture: Aperture) -> SubctxPdbEntry {
        SubctxPdbEntry::new(&PageDirectory { addr, aperture })
    }

    #[test]
    fn sysmem_coherent_entry() {
        let e = entry(0x0000_0001_2345_6000, Aperture::SysmemCoherent);
        assert_eq!(e.format_word, 0x2345_6C37);
        assert_eq!(
            ram_in::SC_PAGE_DIR_BASE_TARGET.decode(e.format_word),
            ram_in::SC_PAGE_DIR_BASE_TARGET_SYS_MEM_NONCOHERENT
        );
        assert_eq!(e.addr_hi, 0x1);
    }

    #[test]
    fn all_sysmem_targets_are_noncoherent() {
        let addr = 0x0000_0001_2345_6000;
        assert_eq!(aperture_target(Aperture::SysmemCoherent), 3);
        assert_eq!(aperture_target(Aperture::SysmemNonCoherent), 3);
        assert_eq!(aperture_target(Aperture::Vidmem), 0);
        assert_eq!(
            entry(addr, Aperture::SysmemNonCoherent).format_word,
            entry(addr, Aperture::SysmemCoherent).format_word
        );
        assert_eq!(entry(addr, Aperture::Vidmem).format_word, 0x2345_6C34);
    }

    #[test]
    fn fixed_flags_present_for_zero_address() {
        let e = entry(0, Aperture::Vidmem);
        assert_eq!(e.format_word, 0x0000_0C34);
        assert_eq!(e.addr_hi, 0);
        assert_eq!(ram_in::SC_PAGE_DIR_BASE_VOL.decode(e.format_word), 1);
        assert_eq!(ram_in::SC_USE_VER2_PT_FORMAT.decode(e.format_word), 1);
        assert_eq!(ram_in::SC_BIG_PAGE_SIZE.decode(e.format_word), 1);
    }

    #[test]
    fn low_field_keeps_address_bits_12_to_31() {
        let e = entry(0xFFFF_FFFF_FFFF_F000, Aperture::Vidmem);
        assert_eq!(e.format_word & ram_in::SC_PAGE_DIR_BASE_LO.mask(), 0xFFFF_F000);
        assert_eq!(e.addr_hi, 0xFFFF_FFFF);
    }
}
