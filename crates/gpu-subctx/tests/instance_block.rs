mod common;

use common::{Harness, FILL_WORD};
use gpu_mem::testing::GpuEvent;
use gpu_mem::{Aperture, PageDirectory};
use gpu_subctx::inst_block::slot_words;
use gpu_subctx::regs::ram_in;
use gpu_subctx::SubctxConfig;
use pretty_assertions::assert_eq;

fn config(slots: u32) -> SubctxConfig {
    SubctxConfig {
        max_subctx_count: slots,
        ..Default::default()
    }
}

#[test]
fn eight_slots_share_one_sysmem_pdb() {
    let mut h = Harness::new(config(8), 2);
    h.alloc().unwrap();

    for index in 0..8 {
        let (lo, hi) = slot_words(index);
        assert_eq!(h.inst_word(lo), 0x2345_6C37, "format word of slot {index}");
        assert_eq!(h.inst_word(hi), 0x0000_0001, "pdb hi word of slot {index}");
    }
    assert_eq!(h.inst_word(ram_in::SC_PDB_VALID_W), 0xFFFF_FFFF);
    assert_eq!(h.inst_word(ram_in::SC_PDB_VALID_W + 1), 0xFFFF_FFFF);
    assert_eq!(h.inst_word(ram_in::ENGINE_WFI_VEID_W), 2);

    // Nothing past the last configured slot is touched.
    let (lo, hi) = slot_words(8);
    assert_eq!(h.inst_word(lo), FILL_WORD);
    assert_eq!(h.inst_word(hi), FILL_WORD);
}

#[test]
fn every_slot_is_identical_at_full_width() {
    let pdb = PageDirectory {
        addr: 0x0000_00AB_CDEF_1000,
        aperture: Aperture::Vidmem,
    };
    let mut h = Harness::with_pdb(config(64), 63, pdb);
    h.alloc().unwrap();

    let (lo0, hi0) = slot_words(0);
    let format_word = h.inst_word(lo0);
    let addr_hi = h.inst_word(hi0);
    assert_eq!(format_word, 0xCDEF_1C34);
    assert_eq!(addr_hi, 0xAB);

    for index in 1..64 {
        let (lo, hi) = slot_words(index);
        assert_eq!(h.inst_word(lo), format_word, "format word of slot {index}");
        assert_eq!(h.inst_word(hi), addr_hi, "pdb hi word of slot {index}");
    }
    assert_eq!(h.inst_word(ram_in::ENGINE_WFI_VEID_W), 63);
}

#[test]
fn single_slot_table() {
    let mut h = Harness::new(config(1), 0);
    h.alloc().unwrap();

    let (lo, hi) = slot_words(0);
    assert_eq!(h.inst_word(lo), 0x2345_6C37);
    assert_eq!(h.inst_word(hi), 1);
    let (lo, _) = slot_words(1);
    assert_eq!(h.inst_word(lo), FILL_WORD);
    assert_eq!(h.inst_word(ram_in::SC_PDB_VALID_W), 0xFFFF_FFFF);
    assert_eq!(h.inst_word(ram_in::SC_PDB_VALID_W + 1), 0xFFFF_FFFF);
}

#[test]
fn veid_bind_follows_table_and_mask_which_follow_header_clear() {
    let mut h = Harness::new(config(4), 1);
    h.alloc().unwrap();

    let inst = h.ch.inst_block().handle;
    let header = h.ch.ctx_header().mem().unwrap().handle;
    let events = h.gpu.events();

    let header_end = events
        .iter()
        .position(|e| *e == GpuEvent::End { handle: header })
        .unwrap();
    let inst_words: Vec<(usize, u32)> = events
        .iter()
        .enumerate()
        .filter_map(|(i, e)| match *e {
            GpuEvent::Write { handle, offset, .. } if handle == inst => Some((i, offset / 4)),
            _ => None,
        })
        .collect();

    assert!(inst_words.iter().all(|&(i, _)| i > header_end));

    let words: Vec<u32> = inst_words.iter().map(|&(_, w)| w).collect();
    let mut expected = Vec::new();
    for index in 0..4 {
        let (lo, hi) = slot_words(index);
        expected.extend([lo, hi]);
    }
    expected.extend([166, 167, 132]);
    assert_eq!(words, expected);
}

#[test]
fn one_time_init_not_repeated_on_second_alloc() {
    let mut h = Harness::new(config(4), 1);
    h.alloc().unwrap();
    let writes = h.gpu.writes(h.ch.inst_block()).count();

    h.alloc().unwrap();

    assert_eq!(h.gpu.writes(h.ch.inst_block()).count(), writes);
}
