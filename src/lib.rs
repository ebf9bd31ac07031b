pub mod ir;
pub mod diagnostics;
pub mod visit;
pub mod container;
pub mod transform;
pub mod config;
pub mod pretty;

use tracing::debug;

use config::PassConfig;
use container::CodeContainer;
use diagnostics::{TransformError, TransformWarning};
use ir::{AddressTable, Block, FunDecl};
use transform::{DspRenamer, InlineVoidFunctionCall, PromotionReport, RemoverCloneVisitor, VariableMover};

/// Promote stack variables into struct fields and drop the superseded
/// declarations (move_vars per pattern → remove over the whole DAG).
///
/// The container is left with no `Link` declarations in any region.
pub fn promote_and_eliminate(
    container: &mut CodeContainer,
    addrs: &mut AddressTable,
    config: &PassConfig,
) -> Result<PromotionReport, TransformError> {
    config.validate()?;

    let mut report = PromotionReport::default();
    for pattern in &config.promote.patterns {
        report.merge(VariableMover::move_vars(container, addrs, pattern));
    }

    let mut remover = RemoverCloneVisitor::new();
    container.rewrite_dag(&mut remover, addrs);
    report.removed = remover.removed;

    debug!(
        container = %container.name,
        promoted = report.promoted.len(),
        removed = report.removed,
        "promotion finished"
    );
    Ok(report)
}

/// Rewrite a table-filling block to run against the surrounding instance.
pub fn rename_for_table(block: &Block, addrs: &mut AddressTable, config: &PassConfig) -> Block {
    DspRenamer::with_names(config.rename.prefix.as_str(), config.rename.canonical.as_str())
        .get_code(block, addrs)
}

/// Inline every `Drop` call of `fun` in `block`.
pub fn inline_void_call(
    block: &Block,
    fun: &FunDecl,
    addrs: &mut AddressTable,
) -> Result<(Block, Vec<TransformWarning>), TransformError> {
    let mut inliner = InlineVoidFunctionCall::new(fun.clone())?;
    let out = inliner.get_code(block, addrs)?;
    Ok((out, inliner.take_warnings()))
}
