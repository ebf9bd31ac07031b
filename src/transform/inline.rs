//! Inlining of void function calls.
//!
//! A call statement `Drop(FunCall { name == f.name, .. })` is replaced by a
//! `Stmt::Block` holding a copy of `f`'s body in which every parameter has been
//! substituted by the positional argument it is bound to. For method calls the
//! first argument is the receiver and is not bound to any parameter.
//!
//! Call sites are validated before anything is rewritten, so a malformed call
//! aborts the whole pass without producing a partial tree. When the inliner is
//! driven through [`CloneVisitor`] directly, a malformed call is left as it is
//! and the first fault is kept for [`InlineVoidFunctionCall::take_error`].

use tracing::{debug, warn};

use crate::diagnostics::{TransformError, TransformWarning, WarningKind};
use crate::ir::{AddrId, AddressTable, Block, Expr, FunDecl, Stmt, Type};
use crate::visit::composers::count_stmts;
use crate::visit::{walk_clone_expr, walk_clone_stmt, walk_stmt, CloneVisitor, FreshCloner, Visitor};

/// Arguments of `expr` bound to parameters, if it is a call to `name`.
///
/// Returns `None` for calls to other functions and for non-call expressions.
fn call_site<'a>(expr: &'a Expr, name: &str) -> Option<(&'a [Expr], bool)> {
    match expr {
        Expr::FunCall {
            name: callee,
            args,
            is_method,
        } if callee == name => Some((args.as_slice(), *is_method)),
        _ => None,
    }
}

/// Check that a call site binds exactly one argument per parameter.
fn check_call_site(function: &FunDecl, args: &[Expr], is_method: bool) -> Result<(), TransformError> {
    if is_method && args.is_empty() {
        return Err(TransformError::missing_receiver(&function.name));
    }
    let found = args.len() - usize::from(is_method);
    let expected = function.params.len();
    if found != expected {
        return Err(TransformError::arity(&function.name, expected, found));
    }
    Ok(())
}

pub struct InlineVoidFunctionCall {
    function: FunDecl,
    pub inlined: usize,
    warnings: Vec<TransformWarning>,
    error: Option<TransformError>,
}

impl InlineVoidFunctionCall {
    pub fn new(function: FunDecl) -> Result<Self, TransformError> {
        if function.result != Type::Void {
            return Err(TransformError::non_void(&function.name, function.result.clone()));
        }
        Ok(Self {
            function,
            inlined: 0,
            warnings: Vec::new(),
            error: None,
        })
    }

    pub fn function(&self) -> &FunDecl {
        &self.function
    }

    pub fn warnings(&self) -> &[TransformWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<TransformWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// First malformed call site met while cloning, if any.
    pub fn take_error(&mut self) -> Option<TransformError> {
        self.error.take()
    }

    /// Inline every call to the function in `src`.
    pub fn get_code(&mut self, src: &Block, addrs: &mut AddressTable) -> Result<Block, TransformError> {
        let mut checker = CallSiteChecker {
            function: &self.function,
            error: None,
        };
        checker.visit_block(src, addrs);
        if let Some(err) = checker.error {
            return Err(err);
        }

        let out = self.clone_block(src, addrs);
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        debug!(function = %self.function.name, inlined = self.inlined, "inlined void calls");
        Ok(out)
    }

    fn replace_parameters_by_args(
        &mut self,
        args: &[Expr],
        is_method: bool,
        addrs: &mut AddressTable,
    ) -> Result<Block, TransformError> {
        check_call_site(&self.function, args, is_method)?;
        let bound = if is_method { args.get(1..).unwrap_or(&[]) } else { args };
        let mut substituter = ParamSubstituter {
            function: &self.function.name,
            bindings: self
                .function
                .params
                .iter()
                .map(|p| p.name.as_str())
                .zip(bound)
                .collect(),
            warnings: Vec::new(),
        };
        let mut body = substituter.clone_block(&self.function.body, addrs);
        let mut warnings = substituter.warnings;

        if matches!(body.stmts.last(), Some(Stmt::Ret(None))) {
            body.stmts.pop();
        }

        let returns = count_stmts(&body, addrs, |s| matches!(s, Stmt::Ret(_)));
        if returns > 0 {
            let msg = format!(
                "inlined body of '{}' keeps {} return statement(s) that now return from the caller",
                self.function.name, returns
            );
            warn!("{}", msg);
            warnings.push(TransformWarning::new(WarningKind::EarlyReturnInInlinedBody, msg));
        }

        self.warnings.extend(warnings);
        Ok(body)
    }
}

impl CloneVisitor for InlineVoidFunctionCall {
    fn clone_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) -> Stmt {
        if let Stmt::Drop(Some(expr)) = stmt {
            if let Some((args, is_method)) = call_site(expr, &self.function.name) {
                debug!(function = %self.function.name, args = args.len(), "inlining call site");
                match self.replace_parameters_by_args(args, is_method, addrs) {
                    Ok(body) => {
                        self.inlined += 1;
                        return Stmt::Block(body);
                    }
                    Err(err) => {
                        warn!("{}", err);
                        self.error.get_or_insert(err);
                    }
                }
            }
        }
        walk_clone_stmt(self, stmt, addrs)
    }
}

/// Finds the first call site whose arguments cannot be bound.
struct CallSiteChecker<'a> {
    function: &'a FunDecl,
    error: Option<TransformError>,
}

impl Visitor for CallSiteChecker<'_> {
    fn visit_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) {
        if self.error.is_some() {
            return;
        }
        if let Stmt::Drop(Some(expr)) = stmt {
            if let Some((args, is_method)) = call_site(expr, &self.function.name) {
                self.error = check_call_site(self.function, args, is_method).err();
                return;
            }
        }
        walk_stmt(self, stmt, addrs);
    }
}

/// Rewrites one copy of a function body for one call site.
///
/// Every address in the copy gets its own node, so repeated inlining of the
/// same function never shares reference sites between copies.
struct ParamSubstituter<'a> {
    function: &'a str,
    bindings: Vec<(&'a str, &'a Expr)>,
    warnings: Vec<TransformWarning>,
}

impl<'a> ParamSubstituter<'a> {
    fn binding(&self, address: AddrId, addrs: &AddressTable) -> Option<&'a Expr> {
        let name = addrs.name(address);
        self.bindings
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, arg)| *arg)
    }
}

impl CloneVisitor for ParamSubstituter<'_> {
    fn clone_address(&mut self, address: AddrId, addrs: &mut AddressTable) -> AddrId {
        addrs.duplicate(address)
    }

    fn clone_expr(&mut self, expr: &Expr, addrs: &mut AddressTable) -> Expr {
        if let Expr::Load(address) = expr {
            if let Some(arg) = self.binding(*address, addrs) {
                return FreshCloner.clone_expr(arg, addrs);
            }
        }
        walk_clone_expr(self, expr, addrs)
    }

    fn clone_stmt(&mut self, stmt: &Stmt, addrs: &mut AddressTable) -> Stmt {
        let Stmt::Store { address, value } = stmt else {
            return walk_clone_stmt(self, stmt, addrs);
        };
        let Some(arg) = self.binding(*address, addrs) else {
            return walk_clone_stmt(self, stmt, addrs);
        };

        let target = match arg.as_load() {
            Some(alias) => addrs.duplicate(alias),
            None => {
                let msg = format!(
                    "'{}' stores into parameter '{}' whose argument is not a variable",
                    self.function,
                    addrs.name(*address)
                );
                warn!("{}", msg);
                self.warnings
                    .push(TransformWarning::new(WarningKind::StoreToNonLvalueArgument, msg));

                // The stored value keeps its loads of this parameter.
                let param = addrs.name(*address).to_string();
                let mut others = ParamSubstituter {
                    function: self.function,
                    bindings: self
                        .bindings
                        .iter()
                        .filter(|(name, _)| *name != param)
                        .copied()
                        .collect(),
                    warnings: Vec::new(),
                };
                let target = addrs.duplicate(*address);
                let value = others.clone_expr(value, addrs);
                self.warnings.extend(others.warnings);
                return Stmt::Store { address: target, value };
            }
        };
        Stmt::Store {
            address: target,
            value: self.clone_expr(value, addrs),
        }
    }
}
