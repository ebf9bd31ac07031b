//! Rewrite passes over the IR.

pub mod inline;
pub mod promote;
pub mod remove;
pub mod rename;
pub mod sort;

pub use inline::InlineVoidFunctionCall;
pub use promote::{PromotionReport, Stack2StructAnalyser, Stack2StructAnalyser1, VariableMover};
pub use remove::RemoverCloneVisitor;
pub use rename::DspRenamer;
pub use sort::{sort_array_declarations, sort_type_declarations};
