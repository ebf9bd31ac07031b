//! Composition utilities for common visitor queries.
//!
//! Small helpers built on [`Visitor`] so passes and tests can ask questions of
//! a tree without writing a visitor each time.
//!
//! # Examples
//!
//! ```
//! use firpass::ir::{builder, AddressTable, Block, Stmt};
//! use firpass::visit::composers::count_stmts;
//!
//! let mut addrs = AddressTable::new();
//! let body = Block::new(vec![Stmt::nop(), builder::ret_void()]);
//! assert_eq!(count_stmts(&body, &mut addrs, |s| s.is_nop()), 1);
//! ```

use crate::ir::{Access, AddrId, AddressTable, Block, Stmt};
use crate::visit::{walk_stmt, Visitor};
use std::collections::BTreeSet;

/// Check if a block contains any statement matching a predicate.
///
/// Short-circuits on first match.
pub fn contains_stmt<F>(block: &Block, addrs: &mut AddressTable, predicate: F) -> bool
where
    F: Fn(&Stmt) -> bool,
{
    struct Detector<F> {
        predicate: F,
        found: bool,
    }

    impl<F> Visitor for Detector<F>
    where
        F: Fn(&Stmt) -> bool,
    {
        fn visit_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) {
            if self.found {
                return;
            }
            if (self.predicate)(stmt) {
                self.found = true;
                return;
            }
            walk_stmt(self, stmt, addrs);
        }
    }

    let mut detector = Detector {
        predicate,
        found: false,
    };
    detector.visit_block(block, addrs);
    detector.found
}

/// Count all statements (at any depth) matching a predicate.
pub fn count_stmts<F>(block: &Block, addrs: &mut AddressTable, predicate: F) -> usize
where
    F: Fn(&Stmt) -> bool,
{
    struct Counter<F> {
        predicate: F,
        count: usize,
    }

    impl<F> Visitor for Counter<F>
    where
        F: Fn(&Stmt) -> bool,
    {
        fn visit_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) {
            if (self.predicate)(stmt) {
                self.count += 1;
            }
            walk_stmt(self, stmt, addrs);
        }
    }

    let mut counter = Counter {
        predicate,
        count: 0,
    };
    counter.visit_block(block, addrs);
    counter.count
}

/// Count declarations of `name` with the given storage class.
pub fn count_decls(block: &Block, addrs: &mut AddressTable, name: &str, access: Access) -> usize {
    // The predicate only sees the statement, so resolve names up front.
    let matching: BTreeSet<AddrId> = addrs
        .iter()
        .filter(|(_, a)| a.name == name && a.access == access)
        .map(|(id, _)| id)
        .collect();
    count_stmts(block, addrs, |s| match s {
        Stmt::DeclareVar { address, .. } => matching.contains(address),
        _ => false,
    })
}

/// Collect every address referenced in a block as `(name, access)` pairs.
pub fn collect_addresses(block: &Block, addrs: &mut AddressTable) -> Vec<(String, Access)> {
    struct Collector {
        found: Vec<(String, Access)>,
    }

    impl Visitor for Collector {
        fn visit_address(&mut self, address: AddrId, addrs: &mut AddressTable) {
            let a = addrs.get(address);
            self.found.push((a.name.clone(), a.access));
        }
    }

    let mut collector = Collector { found: Vec::new() };
    collector.visit_block(block, addrs);
    collector.found
}

/// Collect the distinct names of every address referenced in a block.
pub fn collect_address_names(block: &Block, addrs: &mut AddressTable) -> BTreeSet<String> {
    collect_addresses(block, addrs)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}
