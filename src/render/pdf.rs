use log::{debug, info};
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::{BuiltinFont, Mm, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb};

use crate::render::layout::{
    layout_invoice, Color, Element, Layout, PageGeometry, Rect, Rule, TextRun,
};
use crate::render::metrics::Font;
use crate::render::{Invoice, Renderer};

fn to_pdf_color(c: Color) -> printpdf::color::Color {
    printpdf::color::Color::Rgb(Rgb::new(
        f32::from(c.r) / 255.0,
        f32::from(c.g) / 255.0,
        f32::from(c.b) / 255.0,
        None,
    ))
}

fn builtin_font(font: Font) -> BuiltinFont {
    match font {
        Font::Helvetica => BuiltinFont::Helvetica,
        Font::HelveticaBold => BuiltinFont::HelveticaBold,
    }
}

fn point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

fn polygon(points: Vec<LinePoint>, mode: PaintMode) -> Polygon {
    Polygon {
        rings: vec![PolygonRing { points }],
        mode,
        winding_order: WindingOrder::EvenOdd,
    }
}

/// Converts the layout coordinates (origin top left) into pdf operations (origin bottom left).
struct PageOps {
    page_height: f32,
    ops: Vec<Op>,
}

impl PageOps {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            ops: Vec::new(),
        }
    }

    fn rect(&mut self, rect: &Rect) {
        let bottom = self.page_height - (rect.y + rect.height);
        let corners = || {
            vec![
                point(rect.x, bottom),
                point(rect.x + rect.width, bottom),
                point(rect.x + rect.width, bottom + rect.height),
                point(rect.x, bottom + rect.height),
            ]
        };

        if let Some(fill) = rect.fill {
            self.ops.push(Op::SetFillColor {
                col: to_pdf_color(fill),
            });
            self.ops.push(Op::DrawPolygon {
                polygon: polygon(corners(), PaintMode::Fill),
            });
        }

        if let Some(stroke) = rect.stroke {
            self.ops.push(Op::SetOutlineColor {
                col: to_pdf_color(stroke.color),
            });
            self.ops.push(Op::SetOutlineThickness {
                pt: Pt(stroke.width),
            });
            self.ops.push(Op::DrawPolygon {
                polygon: polygon(corners(), PaintMode::Stroke),
            });
        }
    }

    fn rule(&mut self, rule: &Rule) {
        let y = self.page_height - rule.y;

        self.ops.push(Op::SetOutlineColor {
            col: to_pdf_color(rule.stroke.color),
        });
        self.ops.push(Op::SetOutlineThickness {
            pt: Pt(rule.stroke.width),
        });
        self.ops.push(Op::DrawPolygon {
            polygon: polygon(vec![point(rule.x1, y), point(rule.x2, y)], PaintMode::Stroke),
        });
    }

    fn text(&mut self, text: &TextRun) {
        let baseline = self.page_height - text.baseline;

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetFillColor {
            col: to_pdf_color(text.color),
        });
        self.ops.push(Op::SetFontSizeBuiltinFont {
            size: Pt(text.size),
            font: builtin_font(text.font),
        });
        self.ops.push(Op::SetTextMatrix {
            matrix: TextMatrix::Translate(Pt(text.x), Pt(baseline)),
        });
        self.ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.text.clone())],
            font: builtin_font(text.font),
        });
        self.ops.push(Op::EndTextSection);
    }
}

fn page_size(geometry: &PageGeometry) -> (Mm, Mm) {
    (Pt(geometry.width).into(), Pt(geometry.height).into())
}

/// Writes every page of `layout` into a pdf document.
#[must_use]
pub fn write_pdf(layout: &Layout, title: &str) -> Vec<u8> {
    let geometry = layout.geometry();
    let mut document = PdfDocument::new(title);

    for page in layout.pages() {
        let mut ops = PageOps::new(geometry.height);

        for element in page.elements() {
            match element {
                Element::Rect(rect) => ops.rect(rect),
                Element::Rule(rule) => ops.rule(rule),
                Element::Text(text) => ops.text(text),
            }
        }

        let (width, height) = page_size(geometry);
        document.pages.push(PdfPage::new(width, height, ops.ops));
    }

    let mut warnings = Vec::new();
    let bytes = document.save(&PdfSaveOptions::default(), &mut warnings);
    debug!("pdf writer reported {} warnings", warnings.len());

    bytes
}

/// Lays out the invoice itself and writes the pdf with the built-in Helvetica fonts.
#[derive(Debug, Clone, Default)]
pub struct DirectLayoutRenderer {
    geometry: PageGeometry,
}

impl DirectLayoutRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&mut self, geometry: PageGeometry) -> &mut Self {
        self.geometry = geometry;
        self
    }
}

impl Renderer for DirectLayoutRenderer {
    fn render(&self, invoice: &Invoice<'_>) -> anyhow::Result<Vec<u8>> {
        let layout = layout_invoice(invoice, self.geometry);
        info!("laid out invoice on {} page(s)", layout.pages().len());

        Ok(write_pdf(
            &layout,
            &format!("Invoice {}", invoice.details().invoice_number()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::input::{InvoiceDetails, Table, Timesheet};

    #[test]
    fn test_renders_pdf() {
        let table = Table::from_reader(
            "Date,Employee,Task,Notes,Hours,Rate,Cost\n2024-01-01,A,Dev,,8,50,400\n".as_bytes(),
        )
        .expect("csv should be valid");
        let sheet = Timesheet::from_table(&table).expect("timesheet should be valid");
        let details = InvoiceDetails::default();

        let bytes = DirectLayoutRenderer::new()
            .render(&Invoice::new(&details, &sheet))
            .expect("rendering should succeed");

        assert!(bytes.starts_with(b"%PDF"));
    }
}
