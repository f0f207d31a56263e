// 🖼️ Presentation - HTML rendering of the record list
// Template is read and compiled once at startup; a missing or broken template is fatal

use crate::record::Record;
use anyhow::{Context, Result};
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Name of the page template inside the templates directory
pub const LAYOUT_TEMPLATE: &str = "layout.html";

/// Data handed to the page template
#[derive(Debug, Serialize)]
pub struct ViewModel<'a> {
    pub records: &'a [Record],
    pub message: Option<String>,
}

pub struct Presenter {
    env: Environment<'static>,
}

impl Presenter {
    /// Load `layout.html` from `dir`
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(LAYOUT_TEMPLATE);
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template: {:?}", path))?;

        Self::from_source(source)
    }

    /// Compile a layout template from source
    pub fn from_source(source: String) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template_owned(LAYOUT_TEMPLATE, source)
            .context("Failed to compile layout template")?;

        Ok(Presenter { env })
    }

    /// Render the page for `view`
    pub fn render(&self, view: &ViewModel<'_>) -> Result<String> {
        let template = self.env.get_template(LAYOUT_TEMPLATE)?;
        let html = template
            .render(view)
            .context("Failed to render layout template")?;

        Ok(html)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn shipped_templates() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
    }

    #[test]
    fn test_shipped_layout_renders_records() {
        let presenter = Presenter::from_dir(&shipped_templates()).unwrap();
        let records = vec![Record::new("Ana", 75.5, 1.75), Record::new("Ben", 120.0, 1.8)];

        let html = presenter
            .render(&ViewModel {
                records: &records,
                message: Some("Saved".to_string()),
            })
            .unwrap();

        assert!(html.contains("Ana"));
        assert!(html.contains("24.65"));
        assert!(html.contains("Normal Weight"));
        assert!(html.contains("Ben"));
        assert!(html.contains("Obesity"));
        assert!(html.contains("Saved"));
    }

    #[test]
    fn test_shipped_layout_escapes_names() {
        let presenter = Presenter::from_dir(&shipped_templates()).unwrap();
        let records = vec![Record::new("<script>alert(1)</script>", 70.0, 1.8)];

        let html = presenter
            .render(&ViewModel {
                records: &records,
                message: None,
            })
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_missing_template_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(Presenter::from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_invalid_template_is_error() {
        assert!(Presenter::from_source("{% for r in records %}".to_string()).is_err());
    }

    #[test]
    fn test_message_is_optional() {
        let presenter = Presenter::from_source(
            "{% if message %}[{{ message }}]{% endif %}{{ records|length }}".to_string(),
        )
        .unwrap();

        let html = presenter
            .render(&ViewModel {
                records: &[],
                message: None,
            })
            .unwrap();
        assert_eq!(html, "0");

        let html = presenter
            .render(&ViewModel {
                records: &[],
                message: Some("hi".to_string()),
            })
            .unwrap();
        assert_eq!(html, "[hi]0");
    }
}
