//! `rcm_core` is the core library for [rcm](https://github.com/ifiokjr/rcm).
//! It rewrites Django-style template comments into HTML comments so that they
//! show up in the browser's developer tools while a site runs in debug mode.
//!
//! ```text
//! {# greeting banner #}                    → {% verbatim %}<!-- greeting banner -->{% endverbatim %}
//! {% comment "todo" %}fix{% endcomment %}  → {% verbatim %}<!-- [todo] fix -->{% endverbatim %}
//! {# !render {{ user.name }} #}            → <!-- {{ user.name }} -->
//! {# !hide internal #}                     → {# !hide internal #}
//! ```
//!
//! ## Processing Pipeline
//!
//! ```text
//! Template source
//!   → Scanner (finds `{% comment %}` blocks, tag interiors lexed with logos)
//!   → Block converter (marker, note, escaping, guard)
//!   → Scanner (finds `{# #}` comments in the result)
//!   → Inline converter
//! ```
//!
//! Everything that is not a comment is preserved byte-for-byte. Comment syntax
//! inside string literals or `<script>` blocks is converted as well; the
//! scanner does not parse the surrounding template.
//!
//! ## Modules
//!
//! - [`config`]: `rcm.toml` loading, including the `debug` and
//!   `render_comments` switches and template search directories.
//! - [`loader`]: Template search directories, reading, and the not-found
//!   signal used to fall through to the next directory.
//! - [`scanner`]: Locating comment occurrences in source text.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use rcm_core::FilesystemSource;
//! use rcm_core::Loader;
//! use rcm_core::RcmConfig;
//!
//! let root = Path::new(".");
//! let config = RcmConfig::load(root).unwrap().unwrap_or_default();
//! let loader = Loader::new(
//! 	FilesystemSource::new(config.search_dirs(root)),
//! 	config.loader_options(),
//! );
//!
//! let template = loader.load("index.html").unwrap();
//! println!("{}", template.source);
//! ```

pub use config::*;
pub use convert::*;
pub use environment::*;
pub use error::*;
pub use escape::*;
pub use loader::*;
pub use marker::*;
pub use position::*;
pub use preprocess::*;

pub mod config;
mod convert;
mod environment;
#[allow(unused_assignments)]
mod error;
mod escape;
pub(crate) mod lexer;
pub mod loader;
mod marker;
mod position;
mod preprocess;
pub mod scanner;
