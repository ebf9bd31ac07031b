use super::address::AddrId;

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Int32,
    Int64,
    Float,
    Double,
    Bool,
    Void,
    Ptr(Box<Type>),
    Array { elem: Box<Type>, size: usize },
    Named(String),
}

impl Type {
    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array { .. })
    }

    pub fn array_size(&self) -> Option<usize> {
        match self {
            Type::Array { size, .. } => Some(*size),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Bool(bool),
    Load(AddrId),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Cast {
        ty: Type,
        expr: Box<Expr>,
    },
    /// When `is_method` is set, `args[0]` is the receiver.
    FunCall {
        name: String,
        args: Vec<Expr>,
        is_method: bool,
    },
}

impl Expr {
    /// The address read by a plain variable load.
    pub fn as_load(&self) -> Option<AddrId> {
        match self {
            Expr::Load(address) => Some(*address),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedTyped {
    pub name: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunDecl {
    pub name: String,
    pub params: Vec<NamedTyped>,
    pub result: Type,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    pub fn push(&mut self, stmt: Stmt) {
        self.stmts.push(stmt);
    }

    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    /// Copy of this block with top-level no-ops removed.
    pub fn without_nops(&self) -> Block {
        Block {
            stmts: self.stmts.iter().filter(|s| !s.is_nop()).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    DeclareVar {
        address: AddrId,
        ty: Type,
        value: Option<Expr>,
    },
    Store {
        address: AddrId,
        value: Expr,
    },
    /// Evaluates the expression for its side effects. `Drop(None)` is the no-op.
    Drop(Option<Expr>),
    Ret(Option<Expr>),
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    /// `for counter in 0..count`
    Loop {
        counter: AddrId,
        count: Expr,
        body: Block,
    },
    Block(Block),
    DeclareFun(FunDecl),
}

impl Stmt {
    pub fn nop() -> Self {
        Stmt::Drop(None)
    }

    pub fn is_nop(&self) -> bool {
        matches!(self, Stmt::Drop(None))
    }
}
