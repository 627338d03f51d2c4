//! Channel subcontext (VEID) support.
//!
//! A channel with subcontexts needs two hardware structures programmed:
//! - a per-channel context header, holding the graphics context pointers the FECS context-switch
//!   firmware loads for each subcontext, and
//! - the subcontext section of the channel's instance block: one page directory base per slot, a
//!   valid mask covering all slots, and the channel's own VEID.
//!
//! [`Subctx::alloc_header`] creates the header and performs the one-time instance block setup,
//! [`Subctx::update_header`] rewrites the header on every context-switch setup and
//! [`Subctx::free_header`] tears it down. Device memory is only reached through the
//! collaborator traits in [`gpu_mem`]; callers serialise operations per channel.
#![forbid(unsafe_code)]

pub mod channel;
pub mod config;
pub mod error;
pub mod field;
pub mod gr;
pub mod header;
pub mod inst_block;
pub mod pdb;
pub mod regs;
pub mod subctx;
pub mod update;

pub use channel::{Channel, SubctxId};
pub use config::{GpuGeneration, SubctxConfig, MAX_SUBCTX_COUNT_LIMIT};
pub use error::{ConfigError, Result, SubctxError};
pub use gr::{Gm20bGrCtxOps, GrCtx, GrCtxOps, Gv11bGrCtxOps, Tsg};
pub use header::SubctxHeader;
pub use pdb::SubctxPdbEntry;
pub use subctx::{GpuOps, Subctx};
