use std::sync::Arc;

use gpu_mem::GpuMem;
use tracing::warn;

use crate::config::SubctxConfig;
use crate::error::ConfigError;
use crate::gr::Tsg;
use crate::header::SubctxHeader;

/// Subcontext (VEID) slot assigned to a channel. Always below the configured slot count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubctxId(u32);

impl SubctxId {
    pub fn new(id: u32, config: &SubctxConfig) -> Result<Self, ConfigError> {
        if id >= config.max_subctx_count {
            return Err(ConfigError::SubctxIdOutOfRange {
                id,
                max: config.max_subctx_count,
            });
        }
        Ok(Self(id))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// The parts of a hardware channel this crate programs.
///
/// The instance block is allocated by whoever creates the channel and handed in; the context
/// header is created and destroyed through [`crate::Subctx`].
#[derive(Debug)]
pub struct Channel {
    pub chid: u32,
    pub(crate) subctx_id: SubctxId,
    pub(crate) inst_block: GpuMem,
    pub(crate) ctx_header: SubctxHeader,
    tsg: Option<Arc<Tsg>>,
}

impl Channel {
    pub fn new(chid: u32, subctx_id: SubctxId, inst_block: GpuMem) -> Self {
        Self {
            chid,
            subctx_id,
            inst_block,
            ctx_header: SubctxHeader::default(),
            tsg: None,
        }
    }

    pub fn subctx_id(&self) -> SubctxId {
        self.subctx_id
    }

    pub fn inst_block(&self) -> &GpuMem {
        &self.inst_block
    }

    pub fn ctx_header(&self) -> &SubctxHeader {
        &self.ctx_header
    }

    pub fn tsg(&self) -> Option<&Arc<Tsg>> {
        self.tsg.as_ref()
    }

    pub fn bind_tsg(&mut self, tsg: Arc<Tsg>) {
        self.tsg = Some(tsg);
    }

    pub fn unbind_tsg(&mut self) -> Option<Arc<Tsg>> {
        self.tsg.take()
    }

    /// Give the instance block back to its owner.
    ///
    /// Fails while the context header is still allocated, returning the channel unchanged so the
    /// header can be released with [`crate::Subctx::free_header`] first.
    pub fn into_inst_block(self) -> Result<GpuMem, Self> {
        if self.ctx_header.is_valid() {
            warn!(chid = self.chid, "channel torn down with a live subctx header");
            return Err(self);
        }
        Ok(self.inst_block)
    }
}
