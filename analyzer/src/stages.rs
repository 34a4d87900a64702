//! The semantic analysis stage: runs every rule over a parsed program.
use dsl::{ast::StmtKind, diagnostic::Diagnostic};

use crate::rule_use_initialized_variable::{self, Analysis};

/// Analyzes the program.
///
/// Analysis is fail-fast: the first problem ends analysis and is returned.
pub fn analyze(statements: &[StmtKind]) -> Result<Analysis, Diagnostic> {
    let analysis = rule_use_initialized_variable::apply(statements)?;

    log::debug!(
        "Analysis defined={:?} initialized={:?} used={:?} constants defined={:?} used={:?}",
        analysis.variables_defined,
        analysis.variables_initialized,
        analysis.variables_used,
        analysis.constants_defined,
        analysis.constants_used
    );

    Ok(analysis)
}
