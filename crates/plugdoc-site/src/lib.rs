//! Static HTML site generation for plugin documentation.
//!
//! Turns a [`DocOutput`](plugdoc_core::DocOutput) into a browsable site:
//!
//! ```text
//! <out>/
//! ├── index.html          collection index, grouped by product area
//! ├── styles.css          shared stylesheet (omitted with inline styles)
//! └── modules/
//!     └── <full name>.html
//! ```
//!
//! Page fragments (parameters, return values, examples, sample task) are
//! exposed separately so they can be embedded elsewhere.

mod assets;
mod builder;
mod examples;
mod index;
mod page;
mod params;
mod returns;
mod sample;

pub use assets::{STYLESHEET_FILENAME, styles};
pub use builder::{BuildError, BuildReport, SiteBuilder, SkipReason};
pub use examples::render_examples;
pub use index::{IndexEntry, IndexPage, infer_group, render_index_page};
pub use page::{PluginPage, render_plugin_page};
pub use params::render_parameters;
pub use returns::render_return_values;
pub use sample::render_sample_task;
