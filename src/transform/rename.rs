//! Renaming for sub-container table generation.
//!
//! A sub-container filling a lookup table is emitted as code that runs against
//! an instance bound to `dsp` in the surrounding scope. Every `sig*` address is
//! redirected to that name and the `sig*` declarations are dropped so the
//! instance is not declared twice.

use tracing::debug;

use crate::ir::{AddrId, AddressTable, Block, Stmt};
use crate::visit::{walk_clone_stmt, CloneVisitor};

pub const SIG_PREFIX: &str = "sig";
pub const DSP_NAME: &str = "dsp";

#[derive(Debug, Clone)]
pub struct DspRenamer {
    prefix: String,
    canonical: String,
    pub renamed: usize,
    pub elided: usize,
}

impl Default for DspRenamer {
    fn default() -> Self {
        Self::with_names(SIG_PREFIX, DSP_NAME)
    }
}

impl DspRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_names(prefix: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            canonical: canonical.into(),
            renamed: 0,
            elided: 0,
        }
    }

    pub fn get_code(&mut self, src: &Block, addrs: &mut AddressTable) -> Block {
        let out = self.clone_block(src, addrs);
        debug!(renamed = self.renamed, elided = self.elided, "renamed sub-container code");
        out
    }
}

impl CloneVisitor for DspRenamer {
    fn clone_address(&mut self, address: AddrId, addrs: &mut AddressTable) -> AddrId {
        if addrs.name(address).starts_with(&self.prefix) {
            self.renamed += 1;
            let access = addrs.access(address);
            addrs.alloc(self.canonical.as_str(), access)
        } else {
            address
        }
    }

    fn clone_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) -> Stmt {
        match stmt {
            Stmt::DeclareVar { address, .. } if addrs.name(*address).starts_with(&self.prefix) => {
                self.elided += 1;
                Stmt::nop()
            }
            _ => walk_clone_stmt(self, stmt, addrs),
        }
    }
}
