use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::input::InvoiceDetails;
use crate::render::RendererKind;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Render {
    renderer: Option<RendererKind>,
    engine_path: Option<PathBuf>,
    preserve_dir: Option<PathBuf>,
}

impl Render {
    #[must_use]
    pub fn renderer(&self) -> Option<RendererKind> {
        self.renderer
    }

    #[must_use]
    pub fn engine_path(&self) -> Option<&Path> {
        self.engine_path.as_deref()
    }

    #[must_use]
    pub fn preserve_dir(&self) -> Option<&Path> {
        self.preserve_dir.as_deref()
    }
}

/// Contents of the optional settings file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    invoice: InvoiceDetails,
    #[serde(default)]
    render: Render,
}

impl Settings {
    #[must_use]
    pub fn invoice(&self) -> &InvoiceDetails {
        &self.invoice
    }

    #[must_use]
    pub fn render(&self) -> &Render {
        &self.render
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_settings() {
        let settings: Settings = toml::from_str("").expect("toml should be valid");

        assert_eq!(settings.invoice(), &InvoiceDetails::default());
        assert_eq!(settings.render().renderer(), None);
    }

    #[test]
    fn test_partial_invoice() {
        let settings: Settings = toml::from_str(concat!(
            "[invoice]\n",
            "billed_to = \"ACME Corp.\"\n",
            "invoiceNumber = \"#2024-001\"\n",
            "\n",
            "[render]\n",
            "renderer = \"markup\"\n",
            "engine_path = \"/opt/wkhtmltopdf\"\n",
        ))
        .expect("toml should be valid");

        assert_eq!(settings.invoice().billed_to(), "ACME Corp.");
        assert_eq!(settings.invoice().invoice_number(), "#2024-001");
        assert_eq!(settings.invoice().pay_to(), "Your Name Here");
        assert_eq!(settings.invoice().pay_address(), "Your Address Here");
        assert_eq!(settings.render().renderer(), Some(RendererKind::Markup));
        assert_eq!(
            settings.render().engine_path(),
            Some(Path::new("/opt/wkhtmltopdf"))
        );
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<Settings>("[invoice]\ntax = 19\n").is_err());
        assert!(toml::from_str::<Settings>("[render]\nrenderer = \"latex\"\n").is_err());
    }
}
