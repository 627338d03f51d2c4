//! Instance-block subcontext state: the per-slot PDB table, the valid mask and the engine-WFI
//! VEID field.
//!
//! Context-switch hardware reads these directly, so a channel is only dispatchable once
//! [`commit_pdb`], [`commit_valid_mask`] and then [`bind_veid`] have run in that order.

use gpu_mem::{GpuMem, MemAccess, PageDirectory};
use tracing::{debug, info};

use crate::channel::SubctxId;
use crate::pdb::SubctxPdbEntry;
use crate::regs::ram_in;

/// Word indices of slot `index`'s format word and PDB high word.
pub fn slot_words(index: u32) -> (u32, u32) {
    let step = ram_in::SC_PAGE_DIR_BASE_STRIDE_W * index;
    (
        ram_in::SC_PAGE_DIR_BASE_VOL_0_W + step,
        ram_in::SC_PAGE_DIR_BASE_HI_0_W + step,
    )
}

/// Point every slot in `0..slots` at `pdb`.
pub fn commit_pdb<A: MemAccess + ?Sized>(
    mem: &mut A,
    inst_block: &GpuMem,
    pdb: &PageDirectory,
    slots: u32,
) -> SubctxPdbEntry {
    let entry = SubctxPdbEntry::new(pdb);
    debug!(
        format_word = entry.format_word,
        addr_hi = entry.addr_hi,
        slots,
        "subctx pdb info"
    );
    for index in 0..slots {
        let (lo, hi) = slot_words(index);
        mem.wr32(inst_block, lo, entry.format_word);
        mem.wr32(inst_block, hi, entry.addr_hi);
    }
    entry
}

/// Mark every subcontext PDB slot valid.
pub fn commit_valid_mask<A: MemAccess + ?Sized>(mem: &mut A, inst_block: &GpuMem) {
    for word in 0..ram_in::SC_PDB_VALID_WORDS {
        mem.wr32(inst_block, ram_in::SC_PDB_VALID_W + word, u32::MAX);
    }
}

pub fn bind_veid<A: MemAccess + ?Sized>(mem: &mut A, inst_block: &GpuMem, id: SubctxId) {
    info!(subctx_id = id.get(), "subctx instblk set");
    mem.wr32(
        inst_block,
        ram_in::ENGINE_WFI_VEID_W,
        ram_in::ENGINE_WFI_VEID.encode(id.get()),
    );
}

/// One-time subcontext initialisation of an instance block.
pub fn init_subctx_pdb<A: MemAccess + ?Sized>(
    mem: &mut A,
    inst_block: &GpuMem,
    pdb: &PageDirectory,
    slots: u32,
    id: SubctxId,
) {
    commit_pdb(mem, inst_block, pdb, slots);
    commit_valid_mask(mem, inst_block);
    bind_veid(mem, inst_block, id);
}
