//! Per-channel context header allocation.

use gpu_mem::{AccessWindow, DmaAllocator, DmaFlags, GpuMem, MapAttrs, Vm};
use tracing::{error, trace};

use crate::channel::Channel;
use crate::error::{Result, SubctxError};
use crate::inst_block;
use crate::subctx::{GpuOps, Subctx};

/// The context header buffer of one channel. Valid once allocated and mapped.
#[derive(Debug, Default)]
pub struct SubctxHeader {
    pub(crate) mem: Option<GpuMem>,
}

impl SubctxHeader {
    pub fn is_valid(&self) -> bool {
        self.mem.is_some()
    }

    pub fn mem(&self) -> Option<&GpuMem> {
        self.mem.as_ref()
    }

    pub fn gpu_va(&self) -> Option<u64> {
        self.mem.as_ref().and_then(|m| m.gpu_va)
    }
}

impl Subctx {
    /// Allocate, map and zero the channel's context header, then initialise the instance block's
    /// subcontext state.
    ///
    /// Does nothing if the header is already valid. If the buffer cannot be mapped it is freed
    /// before returning. If it cannot be opened for CPU access it stays allocated and mapped and
    /// the instance block is left untouched. Recover with [`Subctx::free_header`] followed by a
    /// fresh allocation: calling this again without freeing first returns `Ok` because the header
    /// is valid, but the instance block is still uninitialised and the channel cannot be
    /// dispatched.
    pub fn alloc_header<G, V>(&self, g: &mut G, vm: &mut V, ch: &mut Channel) -> Result<()>
    where
        G: GpuOps + ?Sized,
        V: Vm + ?Sized,
    {
        let chid = ch.chid;
        trace!(chid, "alloc subctx header");

        if ch.ctx_header.is_valid() {
            return Ok(());
        }

        let mut mem = g
            .alloc_sys(DmaFlags::empty(), self.config.header_size_bytes)
            .map_err(|err| {
                error!(chid, %err, "failed to allocate sub ctx header");
                SubctxError::from(err)
            })?;

        let attrs = MapAttrs {
            size: mem.size,
            cacheable: false,
            privileged: true,
            aperture: mem.aperture,
        };
        let gpu_va = match vm.map(&mem, attrs) {
            Ok(gpu_va) => gpu_va,
            Err(err) => {
                error!(chid, %err, "failed to map ctx header");
                g.free(mem);
                return Err(err.into());
            }
        };
        mem.gpu_va = Some(gpu_va);
        let mem: &GpuMem = ch.ctx_header.mem.insert(mem);

        AccessWindow::open(g, mem)
            .map_err(|err| {
                error!(chid, %err, "failed to open ctx header for clearing");
                SubctxError::from(err)
            })?
            .clear();

        inst_block::init_subctx_pdb(
            g,
            &ch.inst_block,
            &vm.pdb(),
            self.config.max_subctx_count,
            ch.subctx_id,
        );
        Ok(())
    }

    /// Unmap and free the channel's context header. Safe to call on a channel without one.
    pub fn free_header<G, V>(&self, g: &mut G, vm: &mut V, ch: &mut Channel)
    where
        G: DmaAllocator + ?Sized,
        V: Vm + ?Sized,
    {
        trace!(chid = ch.chid, "free subctx header");

        let Some(mem) = ch.ctx_header.mem.take() else {
            return;
        };
        if let Some(gpu_va) = mem.gpu_va {
            vm.unmap(&mem, gpu_va);
        }
        g.free(mem);
    }
}
