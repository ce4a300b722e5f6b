//! Build-time generation of the ability system's editor script templates.
//!
//! Template sources (`<TypeName>/<template>.gd|.cs`) carry `meta-` comment
//! headers. This crate parses them and renders a C++ header with a static
//! table the editor module reads at startup, and can also install the parsed
//! templates straight into an editor's script templates directory.
//!
//! # Modules
//!
//! - [`template_parser`]: Meta-line extraction, indentation tokenizing, string-literal escaping
//! - [`template_generator`]: Ordered table generation and atomic header output
//! - [`discovery`]: Template file enumeration under a templates root
//! - [`template_installer`]: Writing templates back out as script files

pub mod discovery;
pub mod template_generator;
pub mod template_installer;
pub mod template_parser;

pub use template_generator::{
    generate_table, generate_to_file, inherits_label, DelimiterTable, GenerateError,
    GenerateOptions, GeneratedArtifact, TemplateSource,
};
pub use template_parser::{parse_template, ParseError, TemplateRecord};
