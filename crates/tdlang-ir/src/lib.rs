//! Intermediate representation for TDLang.
//!
//! The IR is the stable boundary between the compiler's front-end and
//! back-end: a flat, ordered list of tagged instructions.
//!
//! ```text
//! .tdl source ──► Lexer ──► Parser ──► Semantic ──► generate() ──► IR
//!                                                                   │
//!                                              optimize() ──► IR ───┤
//!                                                                   ▼
//!                                                               Code gen
//! ```
//!
//! Instructions pair an opcode with string operands and a typed metadata
//! map. Wave definitions are immediately followed by their spawn
//! instructions; every pass here preserves that grouping.

pub mod generate;
pub mod instruction;
pub mod optimize;

pub use generate::generate;
pub use instruction::{to_lines, IrInstruction, MetaValue, Opcode};
pub use optimize::optimize;
