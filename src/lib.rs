//! # macrosub
//!
//! Flat macro substitution for C-family sources.
//!
//! Given a table of `NAME -> replacement` mappings, macrosub tokenizes a
//! source file, replaces every name or keyword token found in the table (or
//! deletes it when the replacement is empty) and rewrites the file in place
//! when its content changed. There is no macro expansion with arguments, no
//! conditional compilation and no includes: only context-free token
//! substitution.
//!
//! Layout:
//!
//!   lexing        logos-based C-family tokenizer, lossless
//!   mapping       the substitution table
//!   substitution  the engine, a pure function of table and source
//!   rewrite       skip-if-unchanged, atomic in-place rewrite of one file
//!   batch         sequential processing of many files
//!   invocation    the `-D<NAME>[=<VALUE>] [--] files` command line
//!   config        layered configuration over embedded defaults

pub mod batch;
pub mod config;
pub mod invocation;
pub mod lexing;
pub mod mapping;
pub mod rewrite;
pub mod substitution;

pub use mapping::{MappingTable, Replacement};
pub use substitution::{substitute, Substitution, SubstitutionError};
