//! HTML page composition
//!
//! Templates are plain HTML with `%NAME%` placeholder tokens. Substitution is
//! a single left-to-right pass: replacement text is copied verbatim and never
//! scanned again, so values that contain placeholder tokens stay intact.
//!
//! Values are not escaped. The title and manifest URL come from the tenant's
//! own asset catalogue and land in both HTML text and inline script string
//! literals as-is, so the catalogue is trusted to hold no markup or quotes.

use crate::Result;
use std::borrow::Cow;
use std::path::PathBuf;

/// Placeholder tokens understood by the bundled templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    ManifestUrl,
    Title,
    AccessToken,
    Subdomain,
}

impl Placeholder {
    pub const fn token(self) -> &'static str {
        match self {
            Placeholder::ManifestUrl => "%HLS_MANIFEST_URL%",
            Placeholder::Title => "%TITLE%",
            Placeholder::AccessToken => "%ACCESS_TOKEN%",
            Placeholder::Subdomain => "%CLIENT_SUBDOMAIN%",
        }
    }
}

/// Pages served by the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Index,
    VodDetail,
    Upload,
}

impl Page {
    /// Template file name, also used for overrides in the template directory
    pub const fn file_name(self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::VodDetail => "vod.html",
            Page::Upload => "upload.html",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            Page::Index => include_str!("../../templates/index.html"),
            Page::VodDetail => include_str!("../../templates/vod.html"),
            Page::Upload => include_str!("../../templates/upload.html"),
        }
    }
}

/// Replace every occurrence of each placeholder in one pass.
///
/// When two tokens start at the same position the longer one wins.
pub fn substitute(template: &str, values: &[(Placeholder, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(placeholder, value)| {
                let token = placeholder.token();
                rest.find(token).map(|idx| (idx, token, *value))
            })
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));

        match next {
            Some((idx, token, value)) => {
                out.push_str(&rest[..idx]);
                out.push_str(value);
                rest = &rest[idx + token.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

/// Loads page templates and fills in placeholders
#[derive(Debug, Clone, Default)]
pub struct PageComposer {
    template_dir: Option<PathBuf>,
}

impl PageComposer {
    /// Composer using only the built-in templates
    pub fn new() -> Self {
        Self::default()
    }

    /// Composer that prefers files in `dir`, falling back to built-ins for
    /// pages without an override
    pub fn with_template_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: Some(dir.into()),
        }
    }

    pub fn from_settings(pages: &crate::config::settings::PageSettings) -> Self {
        Self {
            template_dir: pages.template_dir.clone(),
        }
    }

    /// Raw template text for a page
    pub async fn load(&self, page: Page) -> Result<Cow<'static, str>> {
        let Some(dir) = &self.template_dir else {
            return Ok(Cow::Borrowed(page.builtin()));
        };

        let path = dir.join(page.file_name());
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Cow::Owned(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No override at {:?}, using built-in template", path);
                Ok(Cow::Borrowed(page.builtin()))
            }
            Err(e) => {
                tracing::error!("Failed to read template {:?}: {}", path, e);
                Err(crate::Error::template(
                    page.file_name(),
                    &format!("Failed to read {}: {}", path.display(), e),
                ))
            }
        }
    }

    /// Load a page and substitute the given values
    pub async fn render(&self, page: Page, values: &[(Placeholder, &str)]) -> Result<String> {
        let template = self.load(page).await?;
        Ok(substitute(&template, values))
    }
}
