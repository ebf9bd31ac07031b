pub mod address;
pub mod builder;
pub mod inst;

pub use address::{Access, AddrId, AddressTable, NamedAddress};
pub use inst::{BinOp, Block, Expr, FunDecl, NamedTyped, Stmt, Type};
