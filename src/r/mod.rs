//! Main module for the R parsing library

pub mod ast;
pub mod config;
pub mod data_types;
pub mod evaluation;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod testing;
pub mod text;
pub mod token;
