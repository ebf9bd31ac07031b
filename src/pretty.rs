use crate::container::CodeContainer;
use crate::ir::{AddrId, AddressTable, Block, Expr, FunDecl, Stmt, Type};

/// Render a block as a debug listing, one statement per line.
///
/// Every address is printed with its current storage class (`fRec0@struct`),
/// so the listing shows the effect of in-place access flips.
pub fn pretty_block(block: &Block, addrs: &AddressTable) -> String {
    let mut pp = PrettyPrinter::new(addrs);
    pp.emit_stmts(block);
    pp.finish()
}

pub fn pretty_stmt(stmt: &Stmt, addrs: &AddressTable) -> String {
    let mut pp = PrettyPrinter::new(addrs);
    pp.emit_stmt(stmt);
    pp.finish()
}

pub fn pretty_expr(expr: &Expr, addrs: &AddressTable) -> String {
    let mut pp = PrettyPrinter::new(addrs);
    pp.emit_expr(expr);
    pp.buf
}

/// Render a whole container: declarations, compute body, methods, then
/// sub-containers.
pub fn pretty_container(container: &CodeContainer, addrs: &AddressTable) -> String {
    let mut pp = PrettyPrinter::new(addrs);
    pp.emit_container(container);
    pp.finish()
}

pub fn type_name(ty: &Type) -> String {
    match ty {
        Type::Int32 => "int".to_string(),
        Type::Int64 => "int64".to_string(),
        Type::Float => "float".to_string(),
        Type::Double => "double".to_string(),
        Type::Bool => "bool".to_string(),
        Type::Void => "void".to_string(),
        Type::Ptr(inner) => format!("{}*", type_name(inner)),
        Type::Array { elem, size } => format!("{}[{}]", type_name(elem), size),
        Type::Named(name) => name.clone(),
    }
}

struct PrettyPrinter<'a> {
    addrs: &'a AddressTable,
    buf: String,
    indent: usize,
}

impl<'a> PrettyPrinter<'a> {
    fn new(addrs: &'a AddressTable) -> Self {
        Self {
            addrs,
            buf: String::new(),
            indent: 0,
        }
    }

    fn finish(mut self) -> String {
        while self.buf.ends_with('\n') {
            self.buf.pop();
        }
        self.buf
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent -= 1;
    }

    fn emit_address(&mut self, address: AddrId) {
        let a = self.addrs.get(address);
        let s = format!("{}@{}", a.name, a.access);
        self.write(&s);
    }

    // ── Container ────────────────────────────────────────────────────

    fn emit_container(&mut self, container: &CodeContainer) {
        self.write_indent();
        self.write("container ");
        self.write(&container.name);
        self.write(" {");
        self.newline();
        self.indent();

        for decl in container.declarations() {
            self.emit_stmt(decl);
        }

        self.write_indent();
        self.write("compute {");
        self.newline();
        self.indent();
        self.emit_stmts(container.compute_block());
        self.dedent();
        self.write_indent();
        self.write("}");
        self.newline();

        for method in container.methods() {
            self.emit_fun(method);
        }
        for sub in container.sub_containers() {
            self.emit_container(sub);
        }

        self.dedent();
        self.write_indent();
        self.write("}");
        self.newline();
    }

    // ── Statements ───────────────────────────────────────────────────

    fn emit_stmts(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.emit_stmt(stmt);
        }
    }

    fn emit_braced(&mut self, block: &Block) {
        self.write("{");
        self.newline();
        self.indent();
        self.emit_stmts(block);
        self.dedent();
        self.write_indent();
        self.write("}");
    }

    fn emit_fun(&mut self, fun: &FunDecl) {
        self.write_indent();
        self.write(&type_name(&fun.result));
        self.write(" ");
        self.write(&fun.name);
        self.write("(");
        for (i, p) in fun.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&type_name(&p.ty));
            self.write(" ");
            self.write(&p.name);
        }
        self.write(") ");
        self.emit_braced(&fun.body);
        self.newline();
    }

    fn emit_stmt(&mut self, stmt: &Stmt) {
        if let Stmt::DeclareFun(fun) = stmt {
            self.emit_fun(fun);
            return;
        }

        self.write_indent();
        match stmt {
            Stmt::DeclareVar { address, ty, value } => {
                self.write(&type_name(ty));
                self.write(" ");
                self.emit_address(*address);
                if let Some(value) = value {
                    self.write(" = ");
                    self.emit_expr(value);
                }
                self.write(";");
            }
            Stmt::Store { address, value } => {
                self.emit_address(*address);
                self.write(" = ");
                self.emit_expr(value);
                self.write(";");
            }
            Stmt::Drop(None) => self.write("nop;"),
            Stmt::Drop(Some(expr)) => {
                self.emit_expr(expr);
                self.write(";");
            }
            Stmt::Ret(None) => self.write("return;"),
            Stmt::Ret(Some(expr)) => {
                self.write("return ");
                self.emit_expr(expr);
                self.write(";");
            }
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                self.write("if (");
                self.emit_expr(cond);
                self.write(") ");
                self.emit_braced(then_block);
                if let Some(eb) = else_block {
                    self.write(" else ");
                    self.emit_braced(eb);
                }
            }
            Stmt::Loop {
                counter,
                count,
                body,
            } => {
                self.write("for ");
                self.emit_address(*counter);
                self.write(" < ");
                self.emit_expr(count);
                self.write(" ");
                self.emit_braced(body);
            }
            Stmt::Block(block) => self.emit_braced(block),
            Stmt::DeclareFun(_) => {}
        }
        self.newline();
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn emit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Int(v) => self.write(&v.to_string()),
            Expr::Float(v) => self.write(&format!("{v:?}")),
            Expr::Bool(v) => self.write(if *v { "true" } else { "false" }),
            Expr::Load(address) => self.emit_address(*address),
            Expr::Binary { op, lhs, rhs } => {
                self.write("(");
                self.emit_expr(lhs);
                self.write(" ");
                self.write(op.symbol());
                self.write(" ");
                self.emit_expr(rhs);
                self.write(")");
            }
            Expr::Cast { ty, expr: inner } => {
                self.write(&type_name(ty));
                self.write("(");
                self.emit_expr(inner);
                self.write(")");
            }
            Expr::FunCall {
                name,
                args,
                is_method,
            } => {
                let rest = match (*is_method, args.split_first()) {
                    (true, Some((receiver, rest))) => {
                        self.emit_expr(receiver);
                        self.write(".");
                        rest
                    }
                    _ => args.as_slice(),
                };
                self.write(name);
                self.write("(");
                for (i, arg) in rest.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.emit_expr(arg);
                }
                self.write(")");
            }
        }
    }
}
