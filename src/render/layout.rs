//! Page layout of the direct renderer.
//!
//! All coordinates are in points, measured from the top left corner of the page with `y`
//! growing downwards. Text is positioned by its baseline.

use log::debug;

use crate::input::COLUMN_COUNT;
use crate::render::metrics::{text_width, wrap_text, Font};
use crate::render::{Invoice, NUMERIC_COLUMNS};

const FONT_SIZE: f32 = 10.0;
const LEADING: f32 = 12.0;
const PADDING_X: f32 = 6.0;
const PADDING_Y: f32 = 3.0;

const HEADER_BLOCK_WIDTHS: [f32; 2] = [300.0, 200.0];
const TABLE_COLUMN_WIDTHS: [f32; COLUMN_COUNT] = [60.0, 70.0, 70.0, 140.0, 60.0, 60.0, 60.0];

const HEADER_BLOCK_SPACING: f32 = 20.0;
const DIVIDER_SPACE_ABOVE: f32 = 12.0;
const DIVIDER_SPACE_BELOW: f32 = 8.0;
const TOTALS_PADDING_TOP: f32 = 6.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const GREY: Self = Self::new(128, 128, 128);
    pub const STEEL_BLUE: Self = Self::new(70, 130, 180);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub baseline: f32,
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// A horizontal line.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextRun),
    Rect(Rect),
    Rule(Rule),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
}

impl PageGeometry {
    pub const LETTER: Self = Self {
        width: 612.0,
        height: 792.0,
        margins: Margins {
            left: 72.0,
            right: 72.0,
            top: 72.0,
            bottom: 18.0,
        },
    };

    #[must_use]
    pub fn frame_width(&self) -> f32 {
        self.width - self.margins.left - self.margins.right
    }

    #[must_use]
    pub fn frame_bottom(&self) -> f32 {
        self.height - self.margins.bottom
    }

    /// The left edge of a block that is horizontally centered on the frame.
    #[must_use]
    fn centered(&self, width: f32) -> f32 {
        self.margins.left + (self.frame_width() - width) / 2.0
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    elements: Vec<Element>,
}

impl Page {
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> + '_ {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(text) => Some(text),
            _ => None,
        })
    }

    #[must_use]
    pub fn find_text(&self, content: &str) -> Option<&TextRun> {
        self.texts().find(|text| text.text == content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl Layout {
    #[must_use]
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }
}

#[derive(Debug, Clone)]
struct Line {
    text: String,
    font: Font,
}

#[derive(Debug, Clone)]
struct Cell {
    lines: Vec<Line>,
    align: Align,
}

impl Cell {
    fn wrapped(text: &str, font: Font, width: f32, align: Align) -> Self {
        let lines = wrap_text(text, font, FONT_SIZE, width - 2.0 * PADDING_X)
            .into_iter()
            .map(|text| Line { text, font })
            .collect();

        Self { lines, align }
    }

    /// A bold label followed by the wrapped `value`.
    fn labelled(label: &str, value: &str, width: f32, align: Align) -> Self {
        let mut cell = Self::wrapped(value, Font::Helvetica, width, align);
        cell.lines.insert(
            0,
            Line {
                text: label.to_string(),
                font: Font::HelveticaBold,
            },
        );
        cell
    }
}

#[derive(Debug, Clone, Copy)]
struct RowStyle {
    background: Option<Color>,
    grid: Option<Stroke>,
    color: Color,
    padding_top: f32,
    padding_bottom: f32,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self {
            background: None,
            grid: None,
            color: Color::BLACK,
            padding_top: PADDING_Y,
            padding_bottom: PADDING_Y,
        }
    }
}

impl RowStyle {
    fn height(&self, cells: &[Cell]) -> f32 {
        let lines = cells.iter().map(|cell| cell.lines.len()).max().unwrap_or(0);
        self.padding_top + lines as f32 * LEADING + self.padding_bottom
    }
}

/// Places elements from top to bottom and starts new pages when the frame is full.
struct PageBuilder {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    y: f32,
}

impl PageBuilder {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            y: geometry.margins.top,
        }
    }

    fn is_at_page_start(&self) -> bool {
        self.y <= self.geometry.margins.top
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= self.geometry.frame_bottom()
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self.y = self.geometry.margins.top;
        debug!("starting page {}", self.pages.len() + 1);
    }

    /// Starts a new page if `height` does not fit on the current one.
    ///
    /// Returns whether a new page has been started. Content that is higher than a whole
    /// page is placed at the top of a page and overflows.
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.fits(height) || self.is_at_page_start() {
            return false;
        }

        self.new_page();
        true
    }

    fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    fn push(&mut self, element: Element) {
        self.current.elements.push(element);
    }

    fn draw_row(&mut self, x: f32, widths: &[f32], cells: &[Cell], style: RowStyle) -> f32 {
        let height = style.height(cells);
        let top = self.y;

        let mut cell_x = x;
        for (cell, width) in cells.iter().zip(widths) {
            if style.background.is_some() || style.grid.is_some() {
                self.push(Element::Rect(Rect {
                    x: cell_x,
                    y: top,
                    width: *width,
                    height,
                    fill: style.background,
                    stroke: style.grid,
                }));
            }

            for (i, line) in cell.lines.iter().enumerate() {
                if line.text.is_empty() {
                    continue;
                }

                let line_width = text_width(&line.text, line.font, FONT_SIZE);
                let text_x = match cell.align {
                    Align::Left => cell_x + PADDING_X,
                    Align::Center => cell_x + (width - line_width) / 2.0,
                    Align::Right => cell_x + width - PADDING_X - line_width,
                };

                self.push(Element::Text(TextRun {
                    x: text_x,
                    baseline: top + style.padding_top + FONT_SIZE + i as f32 * LEADING,
                    text: line.text.clone(),
                    font: line.font,
                    size: FONT_SIZE,
                    color: style.color,
                }));
            }

            cell_x += width;
        }

        self.advance(height);
        height
    }

    fn finish(mut self) -> Vec<Page> {
        self.pages.push(self.current);
        self.pages
    }
}

fn header_block(builder: &mut PageBuilder, invoice: &Invoice<'_>) {
    let details = invoice.details();
    let [left, right] = HEADER_BLOCK_WIDTHS;
    let x = builder.geometry.centered(left + right);

    let first = [
        Cell::labelled("BILLED TO:", details.billed_to(), left, Align::Left),
        Cell::labelled("INVOICE", details.invoice_number(), right, Align::Right),
    ];
    let second = [
        Cell::labelled("PAY TO:", details.pay_to(), left, Align::Left),
        Cell::labelled("Address:", details.pay_address(), right, Align::Right),
    ];

    let first_style = RowStyle {
        padding_bottom: 6.0,
        ..RowStyle::default()
    };
    builder.ensure_space(first_style.height(&first));
    builder.draw_row(x, &HEADER_BLOCK_WIDTHS, &first, first_style);
    builder.push(Element::Rule(Rule {
        x1: x,
        x2: x + left + right,
        y: builder.y,
        stroke: Stroke {
            width: 0.25,
            color: Color::BLACK,
        },
    }));

    builder.ensure_space(RowStyle::default().height(&second));
    builder.draw_row(x, &HEADER_BLOCK_WIDTHS, &second, RowStyle::default());
    builder.advance(HEADER_BLOCK_SPACING);
}

fn table(builder: &mut PageBuilder, invoice: &Invoice<'_>) {
    let table_width: f32 = TABLE_COLUMN_WIDTHS.iter().sum();
    let x = builder.geometry.centered(table_width);
    let grid = Some(Stroke {
        width: 0.5,
        color: Color::GREY,
    });

    let header: Vec<Cell> = invoice
        .header()
        .iter()
        .zip(TABLE_COLUMN_WIDTHS)
        .map(|(label, width)| Cell::wrapped(label, Font::HelveticaBold, width, Align::Center))
        .collect();
    let header_style = RowStyle {
        background: Some(Color::STEEL_BLUE),
        grid,
        color: Color::WHITE,
        ..RowStyle::default()
    };
    let body_style = RowStyle {
        grid,
        ..RowStyle::default()
    };

    let rows: Vec<Vec<Cell>> = invoice
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(TABLE_COLUMN_WIDTHS)
                .enumerate()
                .map(|(column, (text, width))| {
                    let align = if NUMERIC_COLUMNS.contains(&column) {
                        Align::Right
                    } else {
                        Align::Left
                    };
                    Cell::wrapped(text, Font::Helvetica, width, align)
                })
                .collect()
        })
        .collect();

    // keep the header together with the first row
    let first_row_height = rows.first().map_or(0.0, |row| body_style.height(row));
    builder.ensure_space(header_style.height(&header) + first_row_height);
    builder.draw_row(x, &TABLE_COLUMN_WIDTHS, &header, header_style);

    for row in &rows {
        if builder.ensure_space(body_style.height(row)) {
            builder.draw_row(x, &TABLE_COLUMN_WIDTHS, &header, header_style);
        }

        builder.draw_row(x, &TABLE_COLUMN_WIDTHS, row, body_style);
    }
}

fn totals(builder: &mut PageBuilder, invoice: &Invoice<'_>) {
    let frame_width = builder.geometry.frame_width();
    let x = builder.geometry.margins.left;
    let widths = [frame_width / 2.0, frame_width / 2.0];

    let cells = [
        Cell::wrapped(
            &invoice.total_hours_text(),
            Font::HelveticaBold,
            widths[0],
            Align::Left,
        ),
        Cell::wrapped(
            &invoice.total_cost_text(),
            Font::HelveticaBold,
            widths[1],
            Align::Right,
        ),
    ];
    let style = RowStyle {
        padding_top: TOTALS_PADDING_TOP,
        ..RowStyle::default()
    };

    builder.advance(DIVIDER_SPACE_ABOVE);
    // the divider always stays on the same page as the totals
    builder.ensure_space(1.0 + DIVIDER_SPACE_BELOW + style.height(&cells));
    builder.push(Element::Rule(Rule {
        x1: x,
        x2: x + frame_width,
        y: builder.y + 0.5,
        stroke: Stroke {
            width: 1.0,
            color: Color::BLACK,
        },
    }));
    builder.advance(1.0 + DIVIDER_SPACE_BELOW);

    builder.draw_row(x, &widths, &cells, style);
}

/// Lays out the header block, the table and the totals of `invoice` on pages of the
/// given size.
#[must_use]
pub fn layout_invoice(invoice: &Invoice<'_>, geometry: PageGeometry) -> Layout {
    let mut builder = PageBuilder::new(geometry);

    header_block(&mut builder, invoice);
    table(&mut builder, invoice);
    totals(&mut builder, invoice);

    Layout {
        geometry,
        pages: builder.finish(),
    }
}
