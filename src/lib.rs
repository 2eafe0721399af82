//! # r-parser
//!
//! An error-tolerant lexer and parser for the R language.
//!
//! File Layout
//!
//!     The pipeline lives under `src/r`, leaves first:
//!
//!         src/r
//!           ├── token       Token kinds and the forward-only token cursor
//!           ├── lexing      Windowed tokenization (logos based)
//!           ├── parsing     Parse context, grammar helpers, scopes, statements, expressions
//!           ├── ast         Arena backed syntax tree, operators, positions, snapshots
//!           ├── data_types  Minimal runtime values (NULL and scalars)
//!           ├── evaluation  The pluggable evaluator hook
//!           ├── formats     Debug dumps (token listing, treeviz)
//!           └── config      Layered configuration for the inspection tooling
//!
//!     The two entry points consumed by editor tooling are
//!     [parse](r::parsing::parse) and [tokenize](r::lexing::tokenize).
//!
//! For testing helpers, see the [testing module](r::testing).

pub mod r;
