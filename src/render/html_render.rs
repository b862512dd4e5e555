use std::io;
use std::path::PathBuf;
use std::process::Command;

use anyhow::Context;
use log::debug;
use tempfile::TempDir;
use thiserror::Error;

use crate::render::PageGeometry;
use crate::utils;

const INPUT_FILE: &str = "invoice.html";
const OUTPUT_FILE: &str = "invoice.pdf";

#[derive(Debug, Error)]
pub enum RenderingError {
    #[error("failed to run `{}`", path.display())]
    RunError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{}` failed with status: {status:?}, stdout: {stdout}, stderr: {stderr}", path.display())]
    EngineFailed {
        path: PathBuf,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },
    #[error(transparent)]
    ReadOutputFile(io::Error),
}

fn millimeters(points: f32) -> String {
    format!("{:.2}mm", points * 25.4 / 72.0)
}

/// Converts an html document to pdf with an external engine like `wkhtmltopdf`.
pub struct HtmlRender {
    /// Path to the html to pdf engine.
    engine_path: PathBuf,
    /// Named page size understood by the engine.
    page_size: String,
    /// Top, right, bottom and left margin.
    margins: [String; 4],
    /// Temporary directory holding the document and the engine output.
    working_dir: TempDir,
    preserve_dir: Option<PathBuf>,
}

impl HtmlRender {
    pub fn from_markup(source: impl AsRef<[u8]>) -> anyhow::Result<Self> {
        let working_dir = TempDir::new()?;
        utils::write(working_dir.path().join(INPUT_FILE), source.as_ref())?;

        let mut render = Self {
            engine_path: "wkhtmltopdf".into(),
            page_size: "Letter".to_string(),
            margins: Default::default(),
            working_dir,
            preserve_dir: None,
        };
        render.page(&PageGeometry::LETTER);

        Ok(render)
    }

    pub fn engine_path(&mut self, engine_path: impl Into<PathBuf>) -> &mut Self {
        self.engine_path = engine_path.into();
        self
    }

    pub fn preserve_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.preserve_dir = Some(path.into());
        self
    }

    /// Uses the margins of `geometry`.
    pub fn page(&mut self, geometry: &PageGeometry) -> &mut Self {
        let margins = &geometry.margins;
        self.margins = [
            millimeters(margins.top),
            millimeters(margins.right),
            millimeters(margins.bottom),
            millimeters(margins.left),
        ];
        self
    }

    fn copy_to_preserve_dir(&self) -> anyhow::Result<()> {
        let Some(path) = &self.preserve_dir else {
            return Ok(());
        };

        utils::create_dir_all(path)?;
        fs_extra::dir::copy(
            self.working_dir.path(),
            path,
            &fs_extra::dir::CopyOptions {
                overwrite: true,
                skip_exist: false,
                content_only: true,
                ..Default::default()
            },
        )
        .with_context(|| {
            format!(
                "failed to copy `{}` to `{}`",
                self.working_dir.path().display(),
                path.display()
            )
        })?;

        Ok(())
    }

    pub fn render(self) -> anyhow::Result<Vec<u8>> {
        let input_file = self.working_dir.path().join(INPUT_FILE);
        let output_file = self.working_dir.path().join(OUTPUT_FILE);
        let [top, right, bottom, left] = &self.margins;

        let mut cmd = Command::new(&self.engine_path);
        cmd.args(["--quiet", "--encoding", "utf-8"])
            .args(["--page-size", self.page_size.as_str()])
            .args(["--margin-top", top.as_str()])
            .args(["--margin-right", right.as_str()])
            .args(["--margin-bottom", bottom.as_str()])
            .args(["--margin-left", left.as_str()])
            .arg(&input_file)
            .arg(&output_file)
            .current_dir(self.working_dir.path());

        debug!("running {:?}", cmd);

        let output = cmd.output().map_err(|source| RenderingError::RunError {
            path: self.engine_path.clone(),
            source,
        })?;

        if !output.status.success() {
            self.copy_to_preserve_dir()?;

            return Err(RenderingError::EngineFailed {
                path: self.engine_path.clone(),
                status: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        Ok(utils::read(output_file).map_err(RenderingError::ReadOutputFile)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_margins() {
        assert_eq!(millimeters(72.0), "25.40mm");
        assert_eq!(millimeters(18.0), "6.35mm");
    }

    #[test]
    fn test_missing_engine() {
        let mut render = HtmlRender::from_markup("<html></html>").expect("working dir");
        render.engine_path("/nonexistent/wkhtmltopdf");

        let error = render.render().expect_err("the engine does not exist");

        assert!(matches!(
            error.downcast_ref::<RenderingError>(),
            Some(RenderingError::RunError { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_engine_preserves_working_dir() {
        let preserve = tempfile::tempdir().expect("temp dir should be created");
        let preserve_dir = preserve.path().join("debug");

        let mut render = HtmlRender::from_markup("<html></html>").expect("working dir");
        render.engine_path("false").preserve_dir(&preserve_dir);

        let error = render.render().expect_err("`false` always fails");

        assert!(matches!(
            error.downcast_ref::<RenderingError>(),
            Some(RenderingError::EngineFailed { .. })
        ));
        assert_eq!(
            std::fs::read_to_string(preserve_dir.join(INPUT_FILE)).expect("html is preserved"),
            "<html></html>"
        );
    }
}
