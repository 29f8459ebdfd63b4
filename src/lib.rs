#![deny(
    clippy::correctness,
    clippy::style,
    keyword_idents,
    macro_use_extern_crate,
    non_ascii_idents,
    nonstandard_style,
    noop_method_call,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![warn(
    clippy::cargo,
    clippy::complexity,
    clippy::perf,
    clippy::suspicious,
    rust_2018_idioms,
    unused
)]
#![allow(clippy::multiple_crate_versions)]

//! Rewrites an HTML document so it can ship a `strict-dynamic` Content-Security-Policy
//! built from hash-sources instead of `'unsafe-inline'`.
//!
//! Sourced `<script src>` tags are folded into one inline loader script, every inline
//! `<script>` (and optionally `<style>`) body is hashed, and the resulting policy is
//! injected as a `<meta http-equiv="Content-Security-Policy">` tag.

pub mod model;
pub mod utilities;

pub use model::{Directive, DirectiveParseError, DirectiveSet, HashToken};
pub use utilities::{
    Document, DocumentError, DocumentState, HtmlTransform, ProcessedDocument, StrictCsp,
    assemble_policy, hash_source, synthesize_loader,
};
