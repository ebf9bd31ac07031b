//! Node construction helpers.
//!
//! Every helper that produces an address allocates a fresh reference site in
//! the given [`AddressTable`].

use super::address::{Access, AddrId, AddressTable};
use super::inst::{BinOp, Block, Expr, FunDecl, NamedTyped, Stmt, Type};

pub fn nop() -> Stmt {
    Stmt::nop()
}

pub fn named_address(addrs: &mut AddressTable, name: &str, access: Access) -> AddrId {
    addrs.alloc(name, access)
}

pub fn dec_var(
    addrs: &mut AddressTable,
    name: &str,
    access: Access,
    ty: Type,
    value: Option<Expr>,
) -> Stmt {
    Stmt::DeclareVar {
        address: addrs.alloc(name, access),
        ty,
        value,
    }
}

pub fn dec_stack_var(addrs: &mut AddressTable, name: &str, ty: Type, value: Option<Expr>) -> Stmt {
    dec_var(addrs, name, Access::Stack, ty, value)
}

pub fn dec_struct_var(addrs: &mut AddressTable, name: &str, ty: Type) -> Stmt {
    dec_var(addrs, name, Access::Struct, ty, None)
}

pub fn store_var(addrs: &mut AddressTable, name: &str, access: Access, value: Expr) -> Stmt {
    Stmt::Store {
        address: addrs.alloc(name, access),
        value,
    }
}

pub fn store_stack_var(addrs: &mut AddressTable, name: &str, value: Expr) -> Stmt {
    store_var(addrs, name, Access::Stack, value)
}

pub fn store_struct_var(addrs: &mut AddressTable, name: &str, value: Expr) -> Stmt {
    store_var(addrs, name, Access::Struct, value)
}

pub fn load_var(addrs: &mut AddressTable, name: &str, access: Access) -> Expr {
    Expr::Load(addrs.alloc(name, access))
}

pub fn load_stack_var(addrs: &mut AddressTable, name: &str) -> Expr {
    load_var(addrs, name, Access::Stack)
}

pub fn load_struct_var(addrs: &mut AddressTable, name: &str) -> Expr {
    load_var(addrs, name, Access::Struct)
}

pub fn int(value: i64) -> Expr {
    Expr::Int(value)
}

pub fn float(value: f64) -> Expr {
    Expr::Float(value)
}

pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub fn add(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Add, lhs, rhs)
}

pub fn mul(lhs: Expr, rhs: Expr) -> Expr {
    binary(BinOp::Mul, lhs, rhs)
}

pub fn fun_call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::FunCall {
        name: name.to_string(),
        args,
        is_method: false,
    }
}

/// `receiver` becomes the first argument.
pub fn method_call(name: &str, receiver: Expr, args: Vec<Expr>) -> Expr {
    let mut all = Vec::with_capacity(args.len() + 1);
    all.push(receiver);
    all.extend(args);
    Expr::FunCall {
        name: name.to_string(),
        args: all,
        is_method: true,
    }
}

/// Void call statement.
pub fn drop_call(call: Expr) -> Stmt {
    Stmt::Drop(Some(call))
}

pub fn ret_void() -> Stmt {
    Stmt::Ret(None)
}

pub fn block(stmts: Vec<Stmt>) -> Block {
    Block::new(stmts)
}

pub fn param(name: &str, ty: Type) -> NamedTyped {
    NamedTyped {
        name: name.to_string(),
        ty,
    }
}

pub fn fun_decl(name: &str, params: Vec<NamedTyped>, result: Type, body: Block) -> FunDecl {
    FunDecl {
        name: name.to_string(),
        params,
        result,
        body,
    }
}
