//! Property-based tests for the rewrite passes.
//!
//! Random statement trees are generated as plain descriptions and then built
//! against a fresh address table, so every case owns its own handles.

use proptest::prelude::*;

use firpass::container::CodeContainer;
use firpass::ir::builder::*;
use firpass::ir::{Access, AddressTable, Block, Expr, Stmt, Type};
use firpass::transform::{DspRenamer, RemoverCloneVisitor, VariableMover};
use firpass::visit::composers::{collect_addresses, count_stmts};
use firpass::visit::{walk_stmt, Visitor};

#[derive(Debug, Clone)]
enum StmtSpec {
    Decl(String, bool),
    Store(String, String),
    Call(String),
    Nested(Vec<StmtSpec>),
}

fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("sig0"),
        Just("sig1"),
        Just("fRec0"),
        Just("iRec1"),
        Just("fTemp0"),
        Just("fSlow0"),
    ]
    .prop_map(|s| s.to_string())
}

fn arb_stmt() -> impl Strategy<Value = StmtSpec> {
    let leaf = prop_oneof![
        (arb_name(), any::<bool>()).prop_map(|(n, init)| StmtSpec::Decl(n, init)),
        (arb_name(), arb_name()).prop_map(|(dst, src)| StmtSpec::Store(dst, src)),
        arb_name().prop_map(StmtSpec::Call),
    ];
    leaf.prop_recursive(3, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(StmtSpec::Nested)
    })
}

fn arb_block() -> impl Strategy<Value = Vec<StmtSpec>> {
    prop::collection::vec(arb_stmt(), 0..8)
}

fn build_stmt(spec: &StmtSpec, addrs: &mut AddressTable) -> Stmt {
    match spec {
        StmtSpec::Decl(name, init) => {
            let value = if *init { Some(float(1.0)) } else { None };
            dec_stack_var(addrs, name, Type::Float, value)
        }
        StmtSpec::Store(dst, src) => {
            let value = load_stack_var(addrs, src);
            store_stack_var(addrs, dst, add(value, float(0.5)))
        }
        StmtSpec::Call(receiver) => {
            let receiver = load_stack_var(addrs, receiver);
            drop_call(method_call("fill", receiver, vec![int(8)]))
        }
        StmtSpec::Nested(inner) => Stmt::Block(build_block(inner, addrs)),
    }
}

fn build_block(specs: &[StmtSpec], addrs: &mut AddressTable) -> Block {
    let mut b = Block::default();
    for spec in specs {
        let stmt = build_stmt(spec, addrs);
        b.push(stmt);
    }
    b
}

/// Marks every declaration whose name contains `pattern` as `Link`.
struct Tombstoner<'a> {
    pattern: &'a str,
}

impl Visitor for Tombstoner<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) {
        if let Stmt::DeclareVar { address, .. } = stmt {
            if addrs.name(*address).contains(self.pattern) {
                addrs.set_access(*address, Access::Link);
            }
        }
        walk_stmt(self, stmt, addrs);
    }
}

fn count_decls_with(block: &Block, addrs: &mut AddressTable, access: Access) -> usize {
    let ids: Vec<_> = addrs
        .iter()
        .filter(|(_, a)| a.access == access)
        .map(|(id, _)| id)
        .collect();
    count_stmts(block, addrs, |s| match s {
        Stmt::DeclareVar { address, .. } => ids.contains(address),
        _ => false,
    })
}

proptest! {
    /// Property: no address name starting with the reserved prefix survives renaming
    #[test]
    fn renaming_is_total(specs in arb_block()) {
        let mut addrs = AddressTable::new();
        let src = build_block(&specs, &mut addrs);

        let out = DspRenamer::new().get_code(&src, &mut addrs);

        for (name, _) in collect_addresses(&out, &mut addrs) {
            prop_assert!(!name.starts_with("sig"), "'{}' survived in {:?}", name, specs);
        }
    }

    /// Property: elimination without tombstones is the identity
    #[test]
    fn elimination_without_tombstones_is_identity(specs in arb_block()) {
        let mut addrs = AddressTable::new();
        let src = build_block(&specs, &mut addrs);

        let out = RemoverCloneVisitor::new().get_code(&src, &mut addrs);

        prop_assert_eq!(out, src);
    }

    /// Property: every tombstoned declaration is removed and no other one is
    #[test]
    fn elimination_is_complete(specs in arb_block()) {
        let mut addrs = AddressTable::new();
        let src = build_block(&specs, &mut addrs);
        Tombstoner { pattern: "Rec" }.visit_block(&src, &mut addrs);
        let live_before = count_decls_with(&src, &mut addrs, Access::Stack);
        let dead_before = count_decls_with(&src, &mut addrs, Access::Link);

        let mut remover = RemoverCloneVisitor::new();
        let out = remover.get_code(&src, &mut addrs);

        prop_assert_eq!(count_decls_with(&out, &mut addrs, Access::Link), 0);
        prop_assert_eq!(count_decls_with(&out, &mut addrs, Access::Stack), live_before);
        prop_assert_eq!(remover.removed, dead_before);
    }

    /// Property: after promotion no matching reference keeps stack access
    #[test]
    fn promotion_leaves_no_matching_stack_reference(specs in arb_block()) {
        let mut addrs = AddressTable::new();
        let mut c = CodeContainer::new("mydsp");
        for stmt in build_block(&specs, &mut addrs).stmts {
            c.push_compute_block(stmt);
        }

        VariableMover::move_vars(&mut c, &mut addrs, "Rec");

        for (name, access) in collect_addresses(c.compute_block(), &mut addrs) {
            if name.contains("Rec") {
                prop_assert!(access == Access::Struct || access == Access::Link, "{} is {}", name, access);
            }
        }
        for decl in c.declarations() {
            if let Stmt::DeclareVar { address, value, .. } = decl {
                prop_assert_eq!(addrs.access(*address), Access::Struct);
                prop_assert!(value.is_none());
            }
        }
    }

    /// Property: the relocated initializers lead the compute body
    #[test]
    fn promotion_places_initializers_first(specs in arb_block()) {
        let mut addrs = AddressTable::new();
        let mut c = CodeContainer::new("mydsp");
        for stmt in build_block(&specs, &mut addrs).stmts {
            c.push_compute_block(stmt);
        }

        let report = VariableMover::move_vars(&mut c, &mut addrs, "Rec");

        for stmt in &c.compute_block().stmts[..report.relocated_initializers] {
            match stmt {
                Stmt::Store { address, value } => {
                    prop_assert!(addrs.name(*address).contains("Rec"));
                    prop_assert_eq!(value, &Expr::Float(1.0));
                }
                other => prop_assert!(false, "expected store, got {:?}", other),
            }
        }
    }
}
