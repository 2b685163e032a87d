//! Core scan engine.
//!
//! `tree_walker` and `path_filter` discover files, `extract` runs the
//! `tokenizer` over each one, `catalog` merges the occurrences and `finder`
//! drives the whole pipeline.

pub mod catalog;
pub mod diagnostics;
pub mod extract;
pub mod finder;
pub mod path_filter;
pub mod tokenizer;
pub mod tree_walker;

pub use catalog::{Catalog, TemplateCatalog, TemplateEntry};
pub use diagnostics::ScanDiagnostic;
pub use extract::{NuggetExtractor, Occurrence, ReferenceContext};
pub use finder::{NuggetFinder, ScanOutcome, ScanSettings};
pub use path_filter::{Eligibility, PathFilter};
pub use tokenizer::{Nugget, NuggetMatch, NuggetParser, NuggetTokenizer, NuggetTokens};
