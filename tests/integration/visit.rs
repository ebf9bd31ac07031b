//! Traversal protocol tests over whole containers.
//!
//! These build IR with the node factory and check what the read-only and
//! clone traversals reach, without running any rewrite pass.
use firpass::container::CodeContainer;
use firpass::ir::builder::*;
use firpass::ir::{Access, AddrId, AddressTable, Expr, Stmt, Type};
use firpass::visit::composers::{collect_address_names, collect_addresses, contains_stmt, count_decls};
use firpass::visit::{walk_clone_expr, walk_expr, BasicCloner, CloneVisitor, Visitor};

fn sample_container(addrs: &mut AddressTable) -> CodeContainer {
    let mut c = CodeContainer::new("mydsp");
    c.push_declare(dec_struct_var(addrs, "fSampleRate", Type::Int32));

    let counter = addrs.alloc("i0", Access::Loop);
    let input = load_stack_var(addrs, "fInput0");
    c.push_compute_block(dec_stack_var(addrs, "fTemp0", Type::Float, Some(input)));
    let temp = load_stack_var(addrs, "fTemp0");
    let body = block(vec![store_stack_var(addrs, "fOutput0", mul(temp, float(0.5)))]);
    c.push_compute_block(Stmt::Loop {
        counter,
        count: int(64),
        body,
    });

    let init = block(vec![store_struct_var(addrs, "fSampleRate", int(48000))]);
    c.add_method(fun_decl("instanceInit", vec![param("sample_rate", Type::Int32)], Type::Void, init));

    let mut sub = CodeContainer::new("mydspSIG0");
    sub.push_compute_block(store_stack_var(addrs, "iRec0", int(0)));
    c.add_sub_container(sub);
    c
}

#[test]
fn test_visit_dag_reaches_methods_and_sub_containers() {
    let mut addrs = AddressTable::new();
    let c = sample_container(&mut addrs);

    struct NameCollector {
        names: Vec<String>,
    }

    impl Visitor for NameCollector {
        fn visit_address(&mut self, address: AddrId, addrs: &mut AddressTable) {
            self.names.push(addrs.name(address).to_string());
        }
    }

    let mut collector = NameCollector { names: vec![] };
    c.visit_dag(&mut collector, &mut addrs);

    for name in ["fSampleRate", "fTemp0", "fInput0", "i0", "fOutput0", "iRec0"] {
        assert!(collector.names.iter().any(|n| n == name), "missing {name}");
    }
}

#[test]
fn test_visit_compute_skips_other_regions() {
    let mut addrs = AddressTable::new();
    let c = sample_container(&mut addrs);

    let names = collect_address_names(c.compute_block(), &mut addrs);
    assert!(names.contains("fTemp0"));
    assert!(!names.contains("iRec0"));
    assert!(!names.contains("fSampleRate"));
}

#[test]
fn test_visitor_counts_expressions_in_nested_loop() {
    let mut addrs = AddressTable::new();
    let c = sample_container(&mut addrs);

    struct ExprCounter {
        count: usize,
    }

    impl Visitor for ExprCounter {
        fn visit_expr(&mut self, expr: &Expr, addrs: &mut AddressTable) {
            self.count += 1;
            walk_expr(self, expr, addrs);
        }
    }

    let mut counter = ExprCounter { count: 0 };
    c.visit_compute(&mut counter, &mut addrs);

    // fInput0, 64, (fTemp0 * 0.5), fTemp0, 0.5
    assert_eq!(counter.count, 5);
}

#[test]
fn test_composers_over_compute_body() {
    let mut addrs = AddressTable::new();
    let c = sample_container(&mut addrs);

    assert!(contains_stmt(c.compute_block(), &mut addrs, |s| matches!(s, Stmt::Loop { .. })));
    assert_eq!(count_decls(c.compute_block(), &mut addrs, "fTemp0", Access::Stack), 1);
    assert_eq!(count_decls(c.compute_block(), &mut addrs, "fTemp0", Access::Struct), 0);

    let pairs = collect_addresses(c.compute_block(), &mut addrs);
    assert!(pairs.contains(&("i0".to_string(), Access::Loop)));
}

#[test]
fn test_identity_clone_of_dag_is_structurally_equal() {
    let mut addrs = AddressTable::new();
    let mut c = sample_container(&mut addrs);
    let before = c.clone();
    let table_size = addrs.len();

    c.rewrite_dag(&mut BasicCloner, &mut addrs);

    assert_eq!(c, before);
    assert_eq!(addrs.len(), table_size);
}

#[test]
fn test_clone_override_rewrites_constants_everywhere() {
    struct DoubleInts;

    impl CloneVisitor for DoubleInts {
        fn clone_expr(&mut self, expr: &Expr, addrs: &mut AddressTable) -> Expr {
            match expr {
                Expr::Int(v) => Expr::Int(v * 2),
                _ => walk_clone_expr(self, expr, addrs),
            }
        }
    }

    let mut addrs = AddressTable::new();
    let mut c = sample_container(&mut addrs);
    c.rewrite_dag(&mut DoubleInts, &mut addrs);

    match &c.compute_block().stmts[1] {
        Stmt::Loop { count, .. } => assert_eq!(count, &int(128)),
        other => panic!("expected loop, got {:?}", other),
    }
    let init = c.method("instanceInit").unwrap();
    match &init.body.stmts[0] {
        Stmt::Store { value, .. } => assert_eq!(value, &int(96000)),
        other => panic!("expected store, got {:?}", other),
    }
}

#[test]
fn test_access_flip_is_seen_through_shared_clone() {
    let mut addrs = AddressTable::new();
    let c = sample_container(&mut addrs);
    let copy = BasicCloner.clone_block(c.compute_block(), &mut addrs);

    struct ToGlobal;
    impl Visitor for ToGlobal {
        fn visit_address(&mut self, address: AddrId, addrs: &mut AddressTable) {
            if addrs.name(address) == "fTemp0" {
                addrs.set_access(address, Access::Global);
            }
        }
    }
    c.visit_compute(&mut ToGlobal, &mut addrs);

    assert_eq!(count_decls(&copy, &mut addrs, "fTemp0", Access::Global), 1);
}
