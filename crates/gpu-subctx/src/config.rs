use crate::error::ConfigError;
use crate::gr::{Gm20bGrCtxOps, GrCtxOps, Gv11bGrCtxOps};
use crate::regs::{ctxsw_prog, ram_in};

/// Largest slot count the two-word valid mask can enable.
pub const MAX_SUBCTX_COUNT_LIMIT: u32 = ram_in::SC_PDB_VALID_WORDS * 32;

/// Selects the generation-specific graphics context pointer encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpuGeneration {
    Gm20b,
    #[default]
    Gv11b,
}

impl GpuGeneration {
    pub fn gr_ctx_ops(self) -> &'static dyn GrCtxOps {
        match self {
            Self::Gm20b => &Gm20bGrCtxOps,
            Self::Gv11b => &Gv11bGrCtxOps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubctxConfig {
    /// Number of subcontext slots in every instance block.
    pub max_subctx_count: u32,
    /// Size of the per-channel context header allocation.
    pub header_size_bytes: u64,
    pub generation: GpuGeneration,
}

impl Default for SubctxConfig {
    fn default() -> Self {
        Self {
            max_subctx_count: MAX_SUBCTX_COUNT_LIMIT,
            header_size_bytes: ctxsw_prog::FECS_HEADER_SIZE_BYTES,
            generation: GpuGeneration::default(),
        }
    }
}

impl SubctxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_subctx_count == 0 || self.max_subctx_count > MAX_SUBCTX_COUNT_LIMIT {
            return Err(ConfigError::SubctxCountOutOfRange {
                count: self.max_subctx_count,
                limit: MAX_SUBCTX_COUNT_LIMIT,
            });
        }
        if self.header_size_bytes < ctxsw_prog::MAIN_IMAGE_USED_BYTES {
            return Err(ConfigError::HeaderTooSmall {
                size: self.header_size_bytes,
                required: ctxsw_prog::MAIN_IMAGE_USED_BYTES,
            });
        }
        Ok(())
    }
}
