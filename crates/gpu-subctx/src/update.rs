//! Context-switch setup: rewriting the context header for a new context buffer.

use gpu_mem::{hi32, lo32, AccessWindow, MemAccess};
use tracing::{error, trace};

use crate::channel::Channel;
use crate::error::{Result, SubctxError};
use crate::regs::ctxsw_prog;
use crate::subctx::{GpuOps, Subctx};

fn write_lo_hi<A: MemAccess + ?Sized>(
    hdr: &mut AccessWindow<'_, A>,
    lo_offset: u32,
    hi_offset: u32,
    gpu_va: u64,
) {
    hdr.wr(lo_offset, lo32(gpu_va));
    hdr.wr(hi_offset, hi32(gpu_va));
}

impl Subctx {
    /// Point the channel's context header at `gpu_va` and at its TSG's graphics context buffers.
    ///
    /// L2 is flushed before the header is touched. Every field is rewritten on each call, so a
    /// failed update can be retried directly.
    pub fn update_header<G>(&self, g: &mut G, ch: &Channel, gpu_va: u64) -> Result<()>
    where
        G: GpuOps + ?Sized,
    {
        let chid = ch.chid;
        trace!(chid, gpu_va, "update subctx header");

        let tsg = ch
            .tsg()
            .ok_or(SubctxError::InvalidState("channel is not bound to a TSG"))?;
        let mem = ch
            .ctx_header
            .mem()
            .ok_or(SubctxError::InvalidState("subctx header is not allocated"))?;
        let gr_ctx = &tsg.gr_ctx;
        let gr_ops = self.config.generation.gr_ctx_ops();

        g.l2_flush(true);

        let mut hdr = AccessWindow::open(g, mem).map_err(|err| {
            error!(chid, %err, "failed to open ctx header");
            SubctxError::from(err)
        })?;

        write_lo_hi(
            &mut hdr,
            ctxsw_prog::MAIN_IMAGE_PRIV_ACCESS_MAP_ADDR_LO,
            ctxsw_prog::MAIN_IMAGE_PRIV_ACCESS_MAP_ADDR_HI,
            gr_ctx.priv_access_map_va,
        );
        write_lo_hi(
            &mut hdr,
            ctxsw_prog::MAIN_IMAGE_PATCH_ADR_LO,
            ctxsw_prog::MAIN_IMAGE_PATCH_ADR_HI,
            gr_ctx.patch_ctx_va,
        );

        gr_ops.write_pm_ptr(&mut hdr, gr_ctx.pm_ctx_va);
        gr_ops.write_zcull_ptr(&mut hdr, gr_ctx.zcull_ctx_va);

        hdr.wr(ctxsw_prog::MAIN_IMAGE_CONTEXT_BUFFER_PTR_HI, hi32(gpu_va));
        hdr.wr(ctxsw_prog::MAIN_IMAGE_CONTEXT_BUFFER_PTR, lo32(gpu_va));

        hdr.wr(
            ctxsw_prog::MAIN_IMAGE_CTL,
            ctxsw_prog::MAIN_IMAGE_CTL_TYPE_PER_VEID_HEADER,
        );
        Ok(())
    }
}
