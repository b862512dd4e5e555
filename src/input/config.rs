use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::input::toml_input::Settings;
use crate::input::InvoiceDetails;
use crate::render::{DirectLayoutRenderer, MarkupRenderer, Renderer, RendererKind};
use crate::utils;

pub const DEFAULT_INPUT: &str = "your_timesheet.csv";
pub const DEFAULT_OUTPUT: &str = "your_invoice.pdf";

pub struct Config {
    input: PathBuf,
    output: PathBuf,
    details: InvoiceDetails,
    renderer: RendererKind,
    engine_path: Option<PathBuf>,
    preserve_dir: Option<PathBuf>,
}

pub struct ConfigBuilder {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    details: InvoiceDetails,
    renderer: RendererKind,
    engine_path: Option<PathBuf>,
    preserve_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            input: None,
            output: None,
            details: InvoiceDetails::default(),
            renderer: RendererKind::default(),
            engine_path: None,
            preserve_dir: None,
        }
    }

    pub fn input(&mut self, input: impl Into<PathBuf>) -> &mut Self {
        self.input = Some(input.into());
        self
    }

    pub fn output(&mut self, output: impl Into<PathBuf>) -> &mut Self {
        self.output = Some(output.into());
        self
    }

    pub fn details(&mut self, details: InvoiceDetails) -> &mut Self {
        self.details = details;
        self
    }

    pub fn renderer(&mut self, renderer: RendererKind) -> &mut Self {
        self.renderer = renderer;
        self
    }

    pub fn engine_path(&mut self, engine_path: impl Into<PathBuf>) -> &mut Self {
        self.engine_path = Some(engine_path.into());
        self
    }

    pub fn preserve_dir(&mut self, preserve_dir: impl Into<PathBuf>) -> &mut Self {
        self.preserve_dir = Some(preserve_dir.into());
        self
    }

    /// Applies everything that is present in the settings file.
    pub fn settings(&mut self, settings: &Settings) -> &mut Self {
        self.details(settings.invoice().clone());

        let render = settings.render();
        if let Some(renderer) = render.renderer() {
            self.renderer(renderer);
        }

        if let Some(path) = render.engine_path() {
            self.engine_path(path);
        }

        if let Some(dir) = render.preserve_dir() {
            self.preserve_dir(dir);
        }

        self
    }

    #[must_use]
    pub fn build(self) -> Config {
        Config {
            input: self.input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            details: self.details,
            renderer: self.renderer,
            engine_path: self.engine_path,
            preserve_dir: self.preserve_dir,
        }
    }
}

impl Config {
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn try_from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<ConfigBuilder> {
        let path = path.as_ref();
        let settings: Settings = utils::toml_from_reader(
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?,
        )
        .with_context(|| format!("failed to parse `{}`", path.display()))?;

        let mut builder = ConfigBuilder::new();
        builder.settings(&settings);

        Ok(builder)
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn details(&self) -> &InvoiceDetails {
        &self.details
    }

    pub fn renderer_kind(&self) -> RendererKind {
        self.renderer
    }

    pub fn engine_path(&self) -> Option<&Path> {
        self.engine_path.as_deref()
    }

    pub fn preserve_dir(&self) -> Option<&Path> {
        self.preserve_dir.as_deref()
    }

    /// Creates the renderer that was selected for this run.
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self.renderer {
            RendererKind::Direct => Box::new(DirectLayoutRenderer::new()),
            RendererKind::Markup => {
                let mut renderer = MarkupRenderer::new();

                if let Some(path) = self.engine_path() {
                    renderer.engine_path(path);
                }

                if let Some(dir) = self.preserve_dir() {
                    renderer.preserve_dir(dir);
                }

                Box::new(renderer)
            }
        }
    }
}
