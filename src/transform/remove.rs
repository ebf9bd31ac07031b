use tracing::debug;

use crate::ir::{Access, AddressTable, Block, Stmt};
use crate::visit::{walk_clone_stmt, CloneVisitor};

/// Replaces every declaration tombstoned with `Access::Link` by a no-op.
///
/// Must run against the same [`AddressTable`] the promotion pass mutated;
/// the tombstone lives on the declaration's address node, not on its name.
#[derive(Debug, Default)]
pub struct RemoverCloneVisitor {
    pub removed: usize,
}

impl RemoverCloneVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_code(&mut self, src: &Block, addrs: &mut AddressTable) -> Block {
        self.clone_block(src, addrs)
    }
}

impl CloneVisitor for RemoverCloneVisitor {
    fn clone_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) -> Stmt {
        match stmt {
            Stmt::DeclareVar { address, .. } if addrs.access(*address) == Access::Link => {
                debug!(var = %addrs.name(*address), "removing tombstoned declaration");
                self.removed += 1;
                Stmt::nop()
            }
            _ => walk_clone_stmt(self, stmt, addrs),
        }
    }
}
