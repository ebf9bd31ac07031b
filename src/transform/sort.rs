//! Orderings for a container's persistent declarations.
//!
//! Both comparators are meant for [`CodeContainer::sort_declarations`], which
//! sorts stably: statements that compare equal keep their relative order.
//!
//! [`CodeContainer::sort_declarations`]: crate::container::CodeContainer::sort_declarations

use std::cmp::Ordering;

use crate::ir::{Stmt, Type};

fn declared_type(stmt: &Stmt) -> Option<&Type> {
    match stmt {
        Stmt::DeclareVar { ty, .. } => Some(ty),
        _ => None,
    }
}

/// Array declarations first, larger arrays before smaller ones.
pub fn sort_array_declarations(a: &Stmt, b: &Stmt) -> Ordering {
    let size = |s: &Stmt| declared_type(s).and_then(Type::array_size);
    match (size(a), size(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) if declared_type(b).is_some() => Ordering::Less,
        (None, Some(_)) if declared_type(a).is_some() => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn type_rank(ty: &Type) -> u8 {
    match ty {
        Type::Double => 0,
        Type::Float => 1,
        Type::Int64 => 2,
        Type::Int32 => 3,
        Type::Bool => 4,
        Type::Array { .. } => 6,
        _ => 5,
    }
}

/// Scalars grouped by type (double, float, int64, int32, bool, other), arrays last.
pub fn sort_type_declarations(a: &Stmt, b: &Stmt) -> Ordering {
    match (declared_type(a), declared_type(b)) {
        (Some(x), Some(y)) => type_rank(x).cmp(&type_rank(y)),
        _ => Ordering::Equal,
    }
}
