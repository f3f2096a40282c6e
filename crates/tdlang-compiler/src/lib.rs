//! TDLang Compiler
//!
//! Unified entry point for the TDLang compilation pipeline. Consolidates
//! lexing, parsing, semantic validation, IR generation, optimization and
//! code generation into a single API.

use thiserror::Error;
use tracing::debug;

pub use tdlang_ir::IrInstruction;
pub use tdlang_parser::ParseError;
pub use tdlang_semantic::SemanticError;

/// A failure in any compilation phase.
///
/// Errors are fatal at the point of detection; the pipeline stops at the
/// first one and nothing downstream runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `gameConfig` JSON document
    #[default]
    Json,
    /// Human-readable instruction dump
    Readable,
}

/// Pipeline options.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Run the optimizer between IR generation and code generation.
    pub optimize: bool,
    pub mode: OutputMode,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            optimize: true,
            mode: OutputMode::Json,
        }
    }
}

/// The artifacts of a successful compilation.
///
/// The pre-optimization IR is always kept so callers can dump both sides
/// of the optimizer.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// IR as generated from the AST.
    pub ir: Vec<IrInstruction>,
    /// Optimized IR, when the optimizer ran.
    pub optimized: Option<Vec<IrInstruction>>,
    /// Final output text in the requested mode.
    pub output: String,
}

impl Compilation {
    /// The instructions the code generator consumed.
    pub fn final_ir(&self) -> &[IrInstruction] {
        self.optimized.as_deref().unwrap_or(&self.ir)
    }
}

/// Compile TDL source text to its output artifact.
///
/// Executes the full pipeline:
/// 1. **Lex**: source text to line-tagged tokens.
/// 2. **Parse**: tokens to the declaration AST.
/// 3. **Validate**: reference and range rules, in source order.
/// 4. **Generate**: AST to IR.
/// 5. **Optimize**: four IR passes (skippable via options).
/// 6. **Emit**: JSON or readable text.
///
/// # Returns
///
/// * `Ok(Compilation)` — the output plus both IR sequences.
/// * `Err(CompileError)` — the first error any phase produced.
pub fn compile(source: &str, options: &Options) -> Result<Compilation, CompileError> {
    let tokens = tdlang_lexer::lex(source);
    debug!("lexed {} tokens", tokens.len());

    let program = tdlang_parser::parse(&tokens)?;
    debug!("parsed {} declarations", program.decls.len());

    tdlang_semantic::analyze(&program)?;

    let ir = tdlang_ir::generate(&program);
    debug!("generated {} IR instructions", ir.len());

    let optimized = options
        .optimize
        .then(|| tdlang_ir::optimize(ir.clone()));
    if let Some(optimized) = &optimized {
        debug!("optimized to {} instructions", optimized.len());
    }

    let final_ir = optimized.as_deref().unwrap_or(&ir);
    let output = match options.mode {
        OutputMode::Json => tdlang_codegen::generate_json(final_ir),
        OutputMode::Readable => tdlang_codegen::generate_readable(final_ir),
    };

    Ok(Compilation {
        ir,
        optimized,
        output,
    })
}
