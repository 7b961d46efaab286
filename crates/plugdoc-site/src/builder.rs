//! Static site builder.
//!
//! Writes one page per documented plugin under `modules/`, the index page and
//! (unless styles are inlined) the shared stylesheet.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use plugdoc_config::Config;
use plugdoc_core::DocOutput;

use crate::assets::{STYLESHEET_FILENAME, styles};
use crate::index::{IndexEntry, IndexPage, infer_group, render_index_page};
use crate::page::{PluginPage, render_plugin_page};

/// Directory holding plugin pages, relative to the site root.
const MODULES_DIR: &str = "modules";

/// Plugin type shown on every page.
const PLUGIN_TYPE: &str = "module";

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No documented plugins found in input")]
    NoPlugins,
}

/// Why a plugin got no page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `doc` section.
    Undocumented,
    /// The name cannot be used as a file name.
    InvalidName,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undocumented => f.write_str("no documentation"),
            Self::InvalidName => f.write_str("name is not a valid file name"),
        }
    }
}

/// Summary of a completed build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Full names of the plugins that got a page, sorted.
    pub pages: Vec<String>,
    /// Plugins left out of the site.
    pub skipped: Vec<(String, SkipReason)>,
    /// Every file written, relative to the output directory.
    pub files: Vec<PathBuf>,
}

/// Builds a static documentation site from plugin documentation.
#[derive(Debug, Default)]
pub struct SiteBuilder {
    title: String,
    description: Option<String>,
    version: Option<String>,
    inline_styles: bool,
    strip_prefix: Option<String>,
    groups: Vec<String>,
}

impl SiteBuilder {
    /// Create a builder with the given site title and no other metadata.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Create a builder from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            version: config.site.version.clone(),
            inline_styles: config.build_resolved.inline_styles,
            strip_prefix: config.index.strip_prefix.clone(),
            groups: config.index.groups.clone(),
        }
    }

    /// Embed the stylesheet in every page instead of writing `styles.css`.
    #[must_use]
    pub fn with_inline_styles(mut self, inline_styles: bool) -> Self {
        self.inline_styles = inline_styles;
        self
    }

    /// Index page grouping: prefix to strip and known group names.
    #[must_use]
    pub fn with_groups(mut self, strip_prefix: Option<String>, groups: Vec<String>) -> Self {
        self.strip_prefix = strip_prefix;
        self.groups = groups;
        self
    }

    /// Render every documented plugin and write the site to `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::NoPlugins`] if no plugin has a `doc` section, or
    /// an I/O error if writing fails.
    pub fn build(&self, docs: &DocOutput, out_dir: &Path) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport::default();

        let documented: Vec<_> = docs
            .iter()
            .filter_map(|(name, data)| {
                let doc = match &data.doc {
                    Some(doc) if is_page_name(name) => doc,
                    Some(_) => {
                        tracing::warn!(plugin = %name, "Skipping plugin with unusable name");
                        report.skipped.push((name.clone(), SkipReason::InvalidName));
                        return None;
                    }
                    None => {
                        tracing::warn!(plugin = %name, "Skipping plugin without documentation");
                        report.skipped.push((name.clone(), SkipReason::Undocumented));
                        return None;
                    }
                };
                Some((name, doc, data))
            })
            .collect();

        if documented.is_empty() {
            return Err(BuildError::NoPlugins);
        }

        fs::create_dir_all(out_dir.join(MODULES_DIR))?;

        if !self.inline_styles {
            write_file(out_dir, Path::new(STYLESHEET_FILENAME), styles(), &mut report)?;
        }

        let mut entries = Vec::with_capacity(documented.len());
        for (name, doc, data) in documented {
            let html = render_plugin_page(&PluginPage {
                full_name: name,
                plugin_type: PLUGIN_TYPE,
                doc,
                data,
                root_path: "../",
                inline_styles: self.inline_styles,
            });
            let relative = Path::new(MODULES_DIR).join(format!("{name}.html"));
            write_file(out_dir, &relative, &html, &mut report)?;

            entries.push(IndexEntry {
                full_name: name.clone(),
                short_description: doc.short_description.clone().unwrap_or_default(),
                group: infer_group(name, self.strip_prefix.as_deref(), &self.groups),
            });
            report.pages.push(name.clone());
        }

        let index = render_index_page(&IndexPage {
            title: &self.title,
            description: self.description.as_deref(),
            version: self.version.as_deref(),
            entries: &entries,
            inline_styles: self.inline_styles,
        });
        write_file(out_dir, Path::new("index.html"), &index, &mut report)?;

        tracing::info!(
            pages = report.pages.len(),
            skipped = report.skipped.len(),
            output = %out_dir.display(),
            "Site built"
        );
        Ok(report)
    }
}

/// Whether `name` stays a single file name under `modules/`.
fn is_page_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\', '\0'])
}

/// Write one site file and record it in the report.
fn write_file(
    out_dir: &Path,
    relative: &Path,
    contents: &str,
    report: &mut BuildReport,
) -> Result<(), BuildError> {
    let path = out_dir.join(relative);
    fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
    report.files.push(relative.to_path_buf());
    Ok(())
}
