use gpu_mem::{DmaAllocator, GpuMem, L2Cache, MemAccess};

use crate::channel::{Channel, SubctxId};
use crate::config::SubctxConfig;
use crate::error::Result;

/// Device collaborators needed by the header paths.
pub trait GpuOps: DmaAllocator + MemAccess + L2Cache {}

impl<T: DmaAllocator + MemAccess + L2Cache + ?Sized> GpuOps for T {}

/// Per-device subcontext support.
///
/// Holds the validated device configuration; all per-channel state lives in [`Channel`]. The
/// header lifecycle is implemented in [`crate::header`] and the context-switch update path in
/// [`crate::update`].
#[derive(Debug, Clone)]
pub struct Subctx {
    pub(crate) config: SubctxConfig,
}

impl Subctx {
    pub fn new(config: SubctxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SubctxConfig {
        &self.config
    }

    pub fn new_channel(&self, chid: u32, subctx_id: u32, inst_block: GpuMem) -> Result<Channel> {
        let id = SubctxId::new(subctx_id, &self.config)?;
        Ok(Channel::new(chid, id, inst_block))
    }
}
