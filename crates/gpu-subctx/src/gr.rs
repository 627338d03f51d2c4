//! Graphics context state referenced from the context header.

use gpu_mem::{hi32, lo32, WordWriter};

use crate::regs::ctxsw_prog;

/// GPU virtual addresses of a TSG's graphics context buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrCtx {
    pub priv_access_map_va: u64,
    pub patch_ctx_va: u64,
    pub pm_ctx_va: u64,
    pub zcull_ctx_va: u64,
}

/// Time-slice group: the set of channels sharing one graphics context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tsg {
    pub tsgid: u32,
    pub gr_ctx: GrCtx,
}

/// Generation-specific encodings of the PM and zcull pointers.
pub trait GrCtxOps: Send + Sync {
    fn write_pm_ptr(&self, hdr: &mut dyn WordWriter, gpu_va: u64);
    fn write_zcull_ptr(&self, hdr: &mut dyn WordWriter, gpu_va: u64);
}

/// Maxwell/Pascal layout: 32-bit pointers in 256-byte units.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gm20bGrCtxOps;

impl GrCtxOps for Gm20bGrCtxOps {
    fn write_pm_ptr(&self, hdr: &mut dyn WordWriter, gpu_va: u64) {
        let va = gpu_va >> ctxsw_prog::CTX_PTR_ALIGN_SHIFT;
        hdr.write_word(ctxsw_prog::MAIN_IMAGE_PM_PTR, lo32(va));
    }

    fn write_zcull_ptr(&self, hdr: &mut dyn WordWriter, gpu_va: u64) {
        let va = gpu_va >> ctxsw_prog::CTX_PTR_ALIGN_SHIFT;
        hdr.write_word(ctxsw_prog::MAIN_IMAGE_ZCULL_PTR, lo32(va));
    }
}

/// Volta layout: pointers in 256-byte units, split across a low and a high word.
#[derive(Debug, Default, Clone, Copy)]
pub struct Gv11bGrCtxOps;

impl GrCtxOps for Gv11bGrCtxOps {
    fn write_pm_ptr(&self, hdr: &mut dyn WordWriter, gpu_va: u64) {
        let va = gpu_va >> ctxsw_prog::CTX_PTR_ALIGN_SHIFT;
        hdr.write_word(ctxsw_prog::MAIN_IMAGE_PM_PTR, lo32(va));
        hdr.write_word(ctxsw_prog::MAIN_IMAGE_PM_PTR_HI, hi32(va));
    }

    fn write_zcull_ptr(&self, hdr: &mut dyn WordWriter, gpu_va: u64) {
        let va = gpu_va >> ctxsw_prog::CTX_PTR_ALIGN_SHIFT;
        hdr.write_word(ctxsw_prog::MAIN_IMAGE_ZCULL_PTR, lo32(va));
        hdr.write_word(ctxsw_prog::MAIN_IMAGE_ZCULL_PTR_HI, hi32(va));
    }
}
