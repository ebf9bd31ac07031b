//! IR traversal infrastructure
//!
//! This module provides the two traversal capabilities every rewrite pass is
//! built on:
//!
//! - `Visitor`: read-only dispatch. Never changes tree shape, but receives the
//!   `AddressTable` mutably so a pass can flip storage classes in place.
//! - `CloneVisitor`: clone rewrite. Produces a new tree; an override may return
//!   a replacement or a no-op in place of the visited node.
//!
//! ## Usage
//!
//! Implement the trait for your pass, overriding only the methods you need.
//! Call the corresponding `walk_*` function inside your override to get the
//! default behavior for the node.
//!
//! ```rust
//! use firpass::ir::{Access, AddrId, AddressTable};
//! use firpass::visit::Visitor;
//!
//! struct StackCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for StackCounter {
//!     fn visit_address(&mut self, address: AddrId, addrs: &mut AddressTable) {
//!         if addrs.access(address) == Access::Stack {
//!             self.count += 1;
//!         }
//!     }
//! }
//! ```

pub mod composers;

use crate::ir::{AddrId, AddressTable, Block, Expr, FunDecl, Stmt};

// ============================================================================
// Visitor Trait (Read-Only Dispatch)
// ============================================================================

/// Read-only IR visitor. Default implementations recurse into all children.
///
/// Omit the `walk_*` call in an override to prune traversal at that node.
pub trait Visitor: Sized {
    fn visit_block(&mut self, block: &Block, addrs: &mut AddressTable) {
        walk_block(self, block, addrs);
    }

    fn visit_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) {
        walk_stmt(self, stmt, addrs);
    }

    fn visit_expr(&mut self, expr: &Expr, addrs: &mut AddressTable) {
        walk_expr(self, expr, addrs);
    }

    fn visit_fun(&mut self, fun: &FunDecl, addrs: &mut AddressTable) {
        walk_fun(self, fun, addrs);
    }

    /// Addresses are leaves; the default does nothing.
    fn visit_address(&mut self, _address: AddrId, _addrs: &mut AddressTable) {}
}

// ============================================================================
// Walk Functions (Read-Only)
// ============================================================================

pub fn walk_block<V: Visitor>(v: &mut V, block: &Block, addrs: &mut AddressTable) {
    for stmt in &block.stmts {
        v.visit_stmt(stmt, addrs);
    }
}

pub fn walk_fun<V: Visitor>(v: &mut V, fun: &FunDecl, addrs: &mut AddressTable) {
    v.visit_block(&fun.body, addrs);
}

pub fn walk_stmt<V: Visitor>(v: &mut V, stmt: &Stmt, addrs: &mut AddressTable) {
    match stmt {
        Stmt::DeclareVar { address, value, .. } => {
            v.visit_address(*address, addrs);
            if let Some(value) = value {
                v.visit_expr(value, addrs);
            }
        }
        Stmt::Store { address, value } => {
            v.visit_address(*address, addrs);
            v.visit_expr(value, addrs);
        }
        Stmt::Drop(Some(expr)) | Stmt::Ret(Some(expr)) => v.visit_expr(expr, addrs),
        Stmt::Drop(None) | Stmt::Ret(None) => {}
        Stmt::If {
            cond,
            then_block,
            else_block,
        } => {
            v.visit_expr(cond, addrs);
            v.visit_block(then_block, addrs);
            if let Some(eb) = else_block {
                v.visit_block(eb, addrs);
            }
        }
        Stmt::Loop {
            counter,
            count,
            body,
        } => {
            v.visit_address(*counter, addrs);
            v.visit_expr(count, addrs);
            v.visit_block(body, addrs);
        }
        Stmt::Block(block) => v.visit_block(block, addrs),
        Stmt::DeclareFun(fun) => v.visit_fun(fun, addrs),
    }
}

pub fn walk_expr<V: Visitor>(v: &mut V, expr: &Expr, addrs: &mut AddressTable) {
    match expr {
        // Leaves
        Expr::Int(_) | Expr::Float(_) | Expr::Bool(_) => {}

        Expr::Load(address) => v.visit_address(*address, addrs),
        Expr::Binary { lhs, rhs, .. } => {
            v.visit_expr(lhs, addrs);
            v.visit_expr(rhs, addrs);
        }
        Expr::Cast { expr: inner, .. } => v.visit_expr(inner, addrs),
        Expr::FunCall { args, .. } => {
            for arg in args {
                v.visit_expr(arg, addrs);
            }
        }
    }
}

// ============================================================================
// CloneVisitor Trait (Clone Rewrite)
// ============================================================================

/// Clone-rewrite IR visitor. Default implementations return a structurally
/// identical deep copy; address handles are shared with the source tree.
pub trait CloneVisitor: Sized {
    fn clone_block(&mut self, block: &Block, addrs: &mut AddressTable) -> Block {
        walk_clone_block(self, block, addrs)
    }

    fn clone_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) -> Stmt {
        walk_clone_stmt(self, stmt, addrs)
    }

    fn clone_expr(&mut self, expr: &Expr, addrs: &mut AddressTable) -> Expr {
        walk_clone_expr(self, expr, addrs)
    }

    fn clone_fun(&mut self, fun: &FunDecl, addrs: &mut AddressTable) -> FunDecl {
        walk_clone_fun(self, fun, addrs)
    }

    fn clone_address(&mut self, address: AddrId, _addrs: &mut AddressTable) -> AddrId {
        address
    }
}

/// The identity clone.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicCloner;

impl CloneVisitor for BasicCloner {}

/// Clone that gives every address reference in the copy its own node, so
/// later access flips on the copy do not reach the source tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct FreshCloner;

impl CloneVisitor for FreshCloner {
    fn clone_address(&mut self, address: AddrId, addrs: &mut AddressTable) -> AddrId {
        addrs.duplicate(address)
    }
}

// ============================================================================
// Walk Functions (Clone Rewrite)
// ============================================================================

pub fn walk_clone_block<C: CloneVisitor>(c: &mut C, block: &Block, addrs: &mut AddressTable) -> Block {
    Block {
        stmts: block.stmts.iter().map(|s| c.clone_stmt(s, addrs)).collect(),
    }
}

pub fn walk_clone_fun<C: CloneVisitor>(c: &mut C, fun: &FunDecl, addrs: &mut AddressTable) -> FunDecl {
    FunDecl {
        name: fun.name.clone(),
        params: fun.params.clone(),
        result: fun.result.clone(),
        body: c.clone_block(&fun.body, addrs),
    }
}

pub fn walk_clone_stmt<C: CloneVisitor>(c: &mut C, stmt: &Stmt, addrs: &mut AddressTable) -> Stmt {
    match stmt {
        Stmt::DeclareVar { address, ty, value } => Stmt::DeclareVar {
            address: c.clone_address(*address, addrs),
            ty: ty.clone(),
            value: value.as_ref().map(|v| c.clone_expr(v, addrs)),
        },
        Stmt::Store { address, value } => Stmt::Store {
            address: c.clone_address(*address, addrs),
            value: c.clone_expr(value, addrs),
        },
        Stmt::Drop(expr) => Stmt::Drop(expr.as_ref().map(|e| c.clone_expr(e, addrs))),
        Stmt::Ret(expr) => Stmt::Ret(expr.as_ref().map(|e| c.clone_expr(e, addrs))),
        Stmt::If {
            cond,
            then_block,
            else_block,
        } => Stmt::If {
            cond: c.clone_expr(cond, addrs),
            then_block: c.clone_block(then_block, addrs),
            else_block: else_block.as_ref().map(|b| c.clone_block(b, addrs)),
        },
        Stmt::Loop {
            counter,
            count,
            body,
        } => Stmt::Loop {
            counter: c.clone_address(*counter, addrs),
            count: c.clone_expr(count, addrs),
            body: c.clone_block(body, addrs),
        },
        Stmt::Block(block) => Stmt::Block(c.clone_block(block, addrs)),
        Stmt::DeclareFun(fun) => Stmt::DeclareFun(c.clone_fun(fun, addrs)),
    }
}

pub fn walk_clone_expr<C: CloneVisitor>(c: &mut C, expr: &Expr, addrs: &mut AddressTable) -> Expr {
    match expr {
        Expr::Int(_) | Expr::Float(_) | Expr::Bool(_) => expr.clone(),
        Expr::Load(address) => Expr::Load(c.clone_address(*address, addrs)),
        Expr::Binary { op, lhs, rhs } => Expr::Binary {
            op: *op,
            lhs: Box::new(c.clone_expr(lhs, addrs)),
            rhs: Box::new(c.clone_expr(rhs, addrs)),
        },
        Expr::Cast { ty, expr: inner } => Expr::Cast {
            ty: ty.clone(),
            expr: Box::new(c.clone_expr(inner, addrs)),
        },
        Expr::FunCall {
            name,
            args,
            is_method,
        } => Expr::FunCall {
            name: name.clone(),
            args: args.iter().map(|a| c.clone_expr(a, addrs)).collect(),
            is_method: *is_method,
        },
    }
}
