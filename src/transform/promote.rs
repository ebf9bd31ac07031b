//! Stack-to-struct promotion.
//!
//! Turns per-invocation locals whose name contains a pattern into persistent
//! fields of the container. Runs in two steps:
//!
//! 1. [`Stack2StructAnalyser1`] over the compute body: queues a struct
//!    declaration (and an initializer store) for every matching stack
//!    declaration, tombstones the declaration with `Access::Link`, and flips
//!    matching references it meets to `Access::Struct`.
//! 2. [`Stack2StructAnalyser`] over the whole DAG: flips every remaining
//!    matching stack reference to `Access::Struct`.
//!
//! The tombstoned declarations stay in the tree until
//! [`RemoverCloneVisitor`](super::remove::RemoverCloneVisitor) runs.
//!
//! Matching is by substring, not by exact name.

use tracing::debug;

use crate::container::CodeContainer;
use crate::ir::{builder, Access, AddrId, AddressTable, Stmt};
use crate::visit::{walk_stmt, BasicCloner, CloneVisitor, Visitor};

fn matches_stack(addrs: &AddressTable, address: AddrId, pattern: &str) -> bool {
    let a = addrs.get(address);
    a.access == Access::Stack && a.name.contains(pattern)
}

/// Flips matching stack references to struct access.
pub struct Stack2StructAnalyser {
    pattern: String,
    pub flipped: usize,
}

impl Stack2StructAnalyser {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            flipped: 0,
        }
    }
}

impl Visitor for Stack2StructAnalyser {
    fn visit_address(&mut self, address: AddrId, addrs: &mut AddressTable) {
        if matches_stack(addrs, address, &self.pattern) {
            addrs.set_access(address, Access::Struct);
            self.flipped += 1;
        }
    }
}

/// Decides promotion for matching stack declarations.
///
/// The container cannot be borrowed while its compute body is being visited,
/// so the new field declarations and initializer stores are queued here and
/// handed over by [`VariableMover`].
pub struct Stack2StructAnalyser1 {
    pattern: String,
    pub declarations: Vec<Stmt>,
    pub initializers: Vec<Stmt>,
    pub promoted: Vec<String>,
    pub flipped: usize,
}

impl Stack2StructAnalyser1 {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            declarations: Vec::new(),
            initializers: Vec::new(),
            promoted: Vec::new(),
            flipped: 0,
        }
    }
}

impl Visitor for Stack2StructAnalyser1 {
    fn visit_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) {
        if let Stmt::DeclareVar { address, ty, value } = stmt {
            if matches_stack(addrs, *address, &self.pattern) {
                let name = addrs.name(*address).to_string();

                self.declarations
                    .push(builder::dec_struct_var(addrs, &name, ty.clone()));

                // Struct storage is not reset per invocation, so the initializer
                // becomes a store that runs on every compute call.
                if let Some(value) = value {
                    let init = BasicCloner.clone_expr(value, addrs);
                    self.initializers
                        .push(builder::store_struct_var(addrs, &name, init));
                }

                addrs.set_access(*address, Access::Link);
                debug!(var = %name, relocated_init = value.is_some(), "promoting stack variable");
                self.promoted.push(name);
            }
        }

        // Keep going so references in the initializer are flipped as well.
        walk_stmt(self, stmt, addrs);
    }

    fn visit_address(&mut self, address: AddrId, addrs: &mut AddressTable) {
        if matches_stack(addrs, address, &self.pattern) {
            addrs.set_access(address, Access::Struct);
            self.flipped += 1;
        }
    }
}

/// Outcome of one [`VariableMover::move_vars`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionReport {
    /// Names of promoted variables, in declaration order.
    pub promoted: Vec<String>,
    /// How many of them carried an initializer that was relocated.
    pub relocated_initializers: usize,
    /// References flipped from stack to struct access, both steps combined.
    pub flipped: usize,
    /// Declarations removed by elimination (filled in by the pipeline).
    pub removed: usize,
}

impl PromotionReport {
    pub fn merge(&mut self, other: PromotionReport) {
        self.promoted.extend(other.promoted);
        self.relocated_initializers += other.relocated_initializers;
        self.flipped += other.flipped;
        self.removed += other.removed;
    }
}

pub struct VariableMover;

impl VariableMover {
    /// Promote every stack variable of `container` whose name contains `pattern`.
    ///
    /// Step A runs over the compute body; its queued field declarations are
    /// appended to the container and its initializer stores are placed, in
    /// declaration order, at the start of the compute body. Step B then
    /// propagates the struct access over the whole DAG.
    pub fn move_vars(
        container: &mut CodeContainer,
        addrs: &mut AddressTable,
        pattern: &str,
    ) -> PromotionReport {
        let mut analyser1 = Stack2StructAnalyser1::new(pattern);
        container.visit_compute(&mut analyser1, addrs);

        let relocated_initializers = analyser1.initializers.len();
        for decl in analyser1.declarations {
            container.push_declare(decl);
        }
        container.prepend_compute_block(analyser1.initializers);

        let mut analyser2 = Stack2StructAnalyser::new(pattern);
        container.visit_dag(&mut analyser2, addrs);

        debug!(
            container = %container.name,
            pattern,
            promoted = analyser1.promoted.len(),
            flipped = analyser1.flipped + analyser2.flipped,
            "variable move finished"
        );

        PromotionReport {
            promoted: analyser1.promoted,
            relocated_initializers,
            flipped: analyser1.flipped + analyser2.flipped,
            removed: 0,
        }
    }
}
