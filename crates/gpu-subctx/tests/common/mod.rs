#![allow(dead_code)]

use std::sync::Arc;

use gpu_mem::testing::{RecordingGpu, RecordingVm};
use gpu_mem::{Aperture, DmaAllocator, DmaFlags, PageDirectory};
use gpu_subctx::{Channel, GrCtx, Result, Subctx, SubctxConfig, Tsg};

pub const INST_BLOCK_SIZE: u64 = 0x1000;
/// Byte pattern fresh allocations are filled with, so tests can tell written words from untouched
/// ones.
pub const FILL: u8 = 0xCD;
pub const FILL_WORD: u32 = 0xCDCD_CDCD;
pub const CHID: u32 = 3;

pub const PDB: PageDirectory = PageDirectory {
    addr: 0x0000_0001_2345_6000,
    aperture: Aperture::SysmemCoherent,
};

pub const GR_CTX: GrCtx = GrCtx {
    priv_access_map_va: 0x1_0000_2000,
    patch_ctx_va: 0x2_0000_3000,
    pm_ctx_va: 0x3_0000_4000,
    zcull_ctx_va: 0x4_0000_5000,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub struct Harness {
    pub gpu: RecordingGpu,
    pub vm: RecordingVm,
    pub subctx: Subctx,
    pub ch: Channel,
}

impl Harness {
    pub fn new(config: SubctxConfig, subctx_id: u32) -> Self {
        Self::with_pdb(config, subctx_id, PDB)
    }

    pub fn with_pdb(config: SubctxConfig, subctx_id: u32, pdb: PageDirectory) -> Self {
        Self::build(config, subctx_id, pdb, RecordingGpu::new())
    }

    /// Use `gpu` as the device, e.g. one allocating from a non-default aperture.
    pub fn with_gpu(config: SubctxConfig, subctx_id: u32, gpu: RecordingGpu) -> Self {
        Self::build(config, subctx_id, PDB, gpu)
    }

    fn build(config: SubctxConfig, subctx_id: u32, pdb: PageDirectory, gpu: RecordingGpu) -> Self {
        init_tracing();

        let mut gpu = gpu.with_alloc_fill(FILL);
        let inst_block = gpu
            .alloc_sys(DmaFlags::empty(), INST_BLOCK_SIZE)
            .expect("instance block allocation");
        gpu.clear_events();

        let subctx = Subctx::new(config).expect("valid config");
        let ch = subctx
            .new_channel(CHID, subctx_id, inst_block)
            .expect("valid subctx id");

        Self {
            gpu,
            vm: RecordingVm::new(pdb),
            subctx,
            ch,
        }
    }

    pub fn bind_tsg(&mut self) {
        self.ch.bind_tsg(Arc::new(Tsg {
            tsgid: 1,
            gr_ctx: GR_CTX,
        }));
    }

    pub fn alloc(&mut self) -> Result<()> {
        self.subctx
            .alloc_header(&mut self.gpu, &mut self.vm, &mut self.ch)
    }

    pub fn free(&mut self) {
        self.subctx
            .free_header(&mut self.gpu, &mut self.vm, &mut self.ch);
    }

    pub fn update(&mut self, gpu_va: u64) -> Result<()> {
        self.subctx.update_header(&mut self.gpu, &self.ch, gpu_va)
    }

    pub fn inst_word(&self, word: u32) -> u32 {
        let bytes = self.gpu.bytes(self.ch.inst_block());
        let off = word as usize * 4;
        u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap())
    }

    pub fn header_word(&self, offset: u32) -> u32 {
        let mem = self.ch.ctx_header().mem().expect("header allocated");
        let bytes = self.gpu.bytes(mem);
        let off = offset as usize;
        u32::from_le_bytes(bytes[off..off + 4].try_into().unwrap())
    }
}
