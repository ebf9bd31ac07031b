use std::cmp::Ordering;

use crate::ir::{AddressTable, Block, FunDecl, Stmt};
use crate::visit::{CloneVisitor, Visitor};

/// One generated compilation unit (e.g. a DSP instance's class).
///
/// Owns the persistent field declarations, the per-invocation compute body,
/// the other generated methods, and nested sub-containers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeContainer {
    pub name: String,
    declarations: Vec<Stmt>,
    compute_block: Block,
    methods: Vec<FunDecl>,
    sub_containers: Vec<CodeContainer>,
}

impl CodeContainer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a persistent field declaration.
    pub fn push_declare(&mut self, decl: Stmt) {
        self.declarations.push(decl);
    }

    pub fn push_compute_block(&mut self, stmt: Stmt) {
        self.compute_block.push(stmt);
    }

    /// Insert `stmts`, in order, before everything already in the compute body.
    pub fn prepend_compute_block(&mut self, stmts: Vec<Stmt>) {
        if stmts.is_empty() {
            return;
        }
        let rest = std::mem::take(&mut self.compute_block.stmts);
        self.compute_block.stmts = stmts;
        self.compute_block.stmts.extend(rest);
    }

    pub fn add_method(&mut self, fun: FunDecl) {
        self.methods.push(fun);
    }

    pub fn add_sub_container(&mut self, container: CodeContainer) {
        self.sub_containers.push(container);
    }

    pub fn declarations(&self) -> &[Stmt] {
        &self.declarations
    }

    pub fn compute_block(&self) -> &Block {
        &self.compute_block
    }

    pub fn methods(&self) -> &[FunDecl] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&FunDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub fn sub_containers(&self) -> &[CodeContainer] {
        &self.sub_containers
    }

    /// Run a read-only visitor over the compute body only.
    pub fn visit_compute<V: Visitor>(&self, visitor: &mut V, addrs: &mut AddressTable) {
        visitor.visit_block(&self.compute_block, addrs);
    }

    /// Run a read-only visitor over every declaration, the compute body, every
    /// method and every sub-container.
    pub fn visit_dag<V: Visitor>(&self, visitor: &mut V, addrs: &mut AddressTable) {
        for decl in &self.declarations {
            visitor.visit_stmt(decl, addrs);
        }
        visitor.visit_block(&self.compute_block, addrs);
        for method in &self.methods {
            visitor.visit_fun(method, addrs);
        }
        for sub in &self.sub_containers {
            sub.visit_dag(visitor, addrs);
        }
    }

    /// Replace every region of the DAG with its clone-rewritten copy.
    ///
    /// Declarations the rewrite turns into no-ops are dropped from the list.
    /// No-ops that were already there stay.
    pub fn rewrite_dag<C: CloneVisitor>(&mut self, cloner: &mut C, addrs: &mut AddressTable) {
        self.declarations = self
            .declarations
            .iter()
            .filter_map(|d| {
                let out = cloner.clone_stmt(d, addrs);
                (d.is_nop() || !out.is_nop()).then_some(out)
            })
            .collect();
        self.compute_block = cloner.clone_block(&self.compute_block, addrs);
        self.methods = self
            .methods
            .iter()
            .map(|m| cloner.clone_fun(m, addrs))
            .collect();
        for sub in &mut self.sub_containers {
            sub.rewrite_dag(cloner, addrs);
        }
    }

    /// Stable reorder of the persistent declarations.
    pub fn sort_declarations<F>(&mut self, order: F)
    where
        F: FnMut(&Stmt, &Stmt) -> Ordering,
    {
        self.declarations.sort_by(order);
    }
}
