//! Hardware layout of the structures this crate programs.
//!
//! [`ram_in`] covers the channel instance block (word indices, 4 bytes per word). [`ctxsw_prog`]
//! covers the per-channel context header consumed by the FECS context-switch firmware (byte
//! offsets).

pub mod ram_in {
    use crate::field::Field;

    /// PDB addresses are stored right-shifted by this amount.
    pub const BASE_SHIFT: u32 = 12;

    pub const ENGINE_WFI_VEID_W: u32 = 132;
    pub const ENGINE_WFI_VEID: Field = Field::new("engine_wfi_veid", 0, 6);

    /// First of the two 32-bit subcontext PDB valid-mask words.
    pub const SC_PDB_VALID_W: u32 = 166;
    pub const SC_PDB_VALID_WORDS: u32 = 2;

    /// Word index of slot 0's format word; slot `i` lives at `+ SC_PAGE_DIR_BASE_STRIDE_W * i`.
    pub const SC_PAGE_DIR_BASE_VOL_0_W: u32 = 168;
    /// Word index of slot 0's PDB high word.
    pub const SC_PAGE_DIR_BASE_HI_0_W: u32 = 169;
    pub const SC_PAGE_DIR_BASE_STRIDE_W: u32 = 4;

    pub const SC_PAGE_DIR_BASE_TARGET: Field = Field::new("target", 0, 2);
    pub const SC_PAGE_DIR_BASE_TARGET_VID_MEM: u32 = 0;
    pub const SC_PAGE_DIR_BASE_TARGET_SYS_MEM_NONCOHERENT: u32 = 3;

    pub const SC_PAGE_DIR_BASE_VOL: Field = Field::new("vol", 2, 1);
    pub const SC_PAGE_DIR_BASE_VOL_TRUE: u32 = 1;
    pub const SC_PAGE_DIR_BASE_FAULT_REPLAY_TEX: Field = Field::new("fault_replay_tex", 4, 1);
    pub const SC_PAGE_DIR_BASE_FAULT_REPLAY_GCC: Field = Field::new("fault_replay_gcc", 5, 1);
    pub const SC_USE_VER2_PT_FORMAT: Field = Field::new("use_ver2_pt_format", 10, 1);
    pub const SC_BIG_PAGE_SIZE: Field = Field::new("big_page_size", 11, 1);
    pub const SC_PAGE_DIR_BASE_LO: Field = Field::new("page_dir_base_lo", 12, 20);
}

pub mod ctxsw_prog {
    /// Size of the FECS header record.
    pub const FECS_HEADER_SIZE_BYTES: u64 = 0x100;

    pub const MAIN_IMAGE_CTL: u32 = 0x0c;
    pub const MAIN_IMAGE_CTL_TYPE_PER_VEID_HEADER: u32 = 0x21;

    pub const MAIN_IMAGE_PATCH_ADR_LO: u32 = 0x14;
    pub const MAIN_IMAGE_PATCH_ADR_HI: u32 = 0x18;

    pub const MAIN_IMAGE_ZCULL_PTR: u32 = 0x20;
    pub const MAIN_IMAGE_PM_PTR: u32 = 0x2c;

    pub const MAIN_IMAGE_CONTEXT_BUFFER_PTR_HI: u32 = 0x5c;
    pub const MAIN_IMAGE_CONTEXT_BUFFER_PTR: u32 = 0x60;

    pub const MAIN_IMAGE_ZCULL_PTR_HI: u32 = 0x64;
    pub const MAIN_IMAGE_PM_PTR_HI: u32 = 0x94;

    pub const MAIN_IMAGE_PRIV_ACCESS_MAP_ADDR_LO: u32 = 0xa0;
    pub const MAIN_IMAGE_PRIV_ACCESS_MAP_ADDR_HI: u32 = 0xa4;

    /// PM and zcull buffers are 256-byte aligned; their pointers are stored `>> 8`.
    pub const CTX_PTR_ALIGN_SHIFT: u32 = 8;

    /// One past the last byte the populator writes.
    pub const MAIN_IMAGE_USED_BYTES: u64 = MAIN_IMAGE_PRIV_ACCESS_MAP_ADDR_HI as u64 + 4;

    const _: () = {
        assert!(MAIN_IMAGE_USED_BYTES <= FECS_HEADER_SIZE_BYTES);
        assert!(MAIN_IMAGE_PM_PTR_HI as u64 + 4 <= MAIN_IMAGE_USED_BYTES);
        assert!(MAIN_IMAGE_ZCULL_PTR_HI as u64 + 4 <= MAIN_IMAGE_USED_BYTES);
    };
}
