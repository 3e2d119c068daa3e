//! Printable offer document.
//!
//! The formatter lays the offer out on A4 pages (coordinates in millimetres,
//! origin top-left) and the resulting [`OfferDocument`] renders to plain text
//! for download or to JSON for a front end that draws it itself.

use crate::core::catalog::Catalog;
use crate::core::pricing::discount_percent_label;
use crate::domain::model::{Branding, ContactInfo, PriceBreakdown, SelectionState};
use crate::domain::ports::DocumentSink;
use crate::utils::error::Result;
use crate::utils::format::{format_area, format_date, format_money, format_unit_price};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Same name for every download.
pub const OFFER_FILENAME: &str = "Renovivo-Oferta.txt";

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const HEADER_BAND_MM: f32 = 36.0;
const FIRST_BODY_TOP_MM: f32 = HEADER_BAND_MM + 10.0;
const BODY_BOTTOM_MM: f32 = PAGE_HEIGHT_MM - 20.0;
const FOOTER_Y_MM: f32 = PAGE_HEIGHT_MM - 12.0;

const TITLE_HEIGHT_MM: f32 = 12.0;
const HEADING_HEIGHT_MM: f32 = 9.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const ROW_HEIGHT_MM: f32 = 7.0;
const SECTION_GAP_MM: f32 = 5.0;
const PANEL_PADDING_MM: f32 = 4.0;
const INDENT_MM: f32 = 5.0;

/// Character width of the plain-text rendering.
pub const TEXT_COLUMNS: usize = 72;
const WRAP_COLUMNS: usize = 66;

pub const DOCUMENT_TITLE: &str = "ОФЕРТА ЗА РЕМОНТ";
pub const DISCLAIMER: &str = "*Цените и сроковете в тази оферта са ориентировъчни. \
Крайната цена и срокът за изпълнение се определят след оглед на място.";

/// Printed under the pricing panel.
pub const BENEFITS: [&str; 3] = [
    "Фиксиран бюджет по договор",
    "Безплатна консултация на място",
    "5 години гаранция",
];

const CUSTOMER_HEADING: &str = "Клиент";
const PROJECT_HEADING: &str = "Детайли на проекта";
const INCLUDED_HEADING: &str = "Какво включва";
const SERVICES_HEADING: &str = "Допълнителни услуги";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Title,
    Heading,
    Body,
    Muted,
    Strong,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub y: f32,
    pub label: String,
    pub value: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Band {
        y: f32,
        height: f32,
        title: String,
        subtitle: String,
    },
    Text {
        x: f32,
        y: f32,
        indent: u8,
        text: String,
        style: TextStyle,
    },
    Row {
        x: f32,
        y: f32,
        width: f32,
        label: String,
        value: String,
    },
    /// Highlighted pricing block; never split across pages.
    Panel {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        rows: Vec<PriceRow>,
    },
    Footer {
        y: f32,
        text: String,
        page: usize,
        page_count: usize,
    },
}

impl Element {
    fn texts(&self) -> Vec<&str> {
        match self {
            Element::Band {
                title, subtitle, ..
            } => vec![title.as_str(), subtitle.as_str()],
            Element::Text { text, .. } => vec![text.as_str()],
            Element::Row { label, value, .. } => vec![label.as_str(), value.as_str()],
            Element::Panel { rows, .. } => rows
                .iter()
                .flat_map(|r| [r.label.as_str(), r.value.as_str()])
                .collect(),
            Element::Footer { text, .. } => vec![text.as_str()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub number: usize,
    pub elements: Vec<Element>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            elements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferDocument {
    pub filename: String,
    pub generated_on: NaiveDate,
    pub pages: Vec<Page>,
}

impl OfferDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every string placed on any page, in layout order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .flat_map(|e| e.texts())
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_plain_text().into_bytes()
    }

    pub fn to_plain_text(&self) -> String {
        let pages: Vec<String> = self
            .pages
            .iter()
            .map(|page| {
                let mut out = Vec::new();
                for element in &page.elements {
                    render_element(element, &mut out);
                }
                out.join("\n")
            })
            .collect();
        // 換頁字元分隔各頁
        let mut text = pages.join("\n\u{c}\n");
        text.push('\n');
        text
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(char_len(text)) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn spread(left: &str, right: &str, width: usize) -> String {
    let gap = width
        .saturating_sub(char_len(left) + char_len(right))
        .max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

fn render_element(element: &Element, out: &mut Vec<String>) {
    match element {
        Element::Band {
            title, subtitle, ..
        } => {
            out.push("=".repeat(TEXT_COLUMNS));
            out.push(center(title, TEXT_COLUMNS));
            out.push(center(subtitle, TEXT_COLUMNS));
            out.push("=".repeat(TEXT_COLUMNS));
        }
        Element::Text {
            indent, text, style, ..
        } => match style {
            TextStyle::Title => {
                out.push(String::new());
                out.push(center(text, TEXT_COLUMNS));
            }
            TextStyle::Heading => {
                out.push(String::new());
                out.push(text.clone());
                out.push("-".repeat(char_len(text)));
            }
            _ => out.push(format!("{}{}", "  ".repeat(usize::from(*indent)), text)),
        },
        Element::Row { label, value, .. } => {
            let label = if label.is_empty() {
                String::new()
            } else {
                format!("{}:", label)
            };
            out.push(spread(&label, value, TEXT_COLUMNS));
        }
        Element::Panel { rows, .. } => {
            let inner = TEXT_COLUMNS - 4;
            out.push(String::new());
            out.push(format!("+{}+", "-".repeat(TEXT_COLUMNS - 2)));
            for row in rows {
                if row.style == TextStyle::Strong {
                    out.push(format!("|{}|", "-".repeat(TEXT_COLUMNS - 2)));
                }
                out.push(format!("| {} |", spread(&row.label, &row.value, inner)));
            }
            out.push(format!("+{}+", "-".repeat(TEXT_COLUMNS - 2)));
        }
        Element::Footer {
            text,
            page,
            page_count,
            ..
        } => {
            out.push(String::new());
            out.push("-".repeat(TEXT_COLUMNS));
            out.push(spread(text, &format!("{}/{}", page, page_count), TEXT_COLUMNS));
        }
    }
}

/// Greedy word wrap on character count; words longer than `width` are cut.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while char_len(word) > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let cut = word
                .char_indices()
                .nth(width)
                .map_or(word.len(), |(i, _)| i);
            lines.push(word[..cut].to_string());
            word = &word[cut..];
        }
        if !current.is_empty() && char_len(&current) + 1 + char_len(word) > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Debug, Clone)]
enum Line {
    Title(String),
    Heading(String),
    Text {
        text: String,
        style: TextStyle,
        indent: u8,
    },
    Row {
        label: String,
        value: String,
    },
}

impl Line {
    fn text(text: impl Into<String>, style: TextStyle, indent: u8) -> Self {
        Line::Text {
            text: text.into(),
            style,
            indent,
        }
    }

    fn row(label: impl Into<String>, value: impl Into<String>) -> Self {
        Line::Row {
            label: label.into(),
            value: value.into(),
        }
    }

    fn height(&self) -> f32 {
        match self {
            Line::Title(_) => TITLE_HEIGHT_MM,
            Line::Heading(_) => HEADING_HEIGHT_MM,
            Line::Text { .. } => LINE_HEIGHT_MM,
            Line::Row { .. } => ROW_HEIGHT_MM,
        }
    }

    fn into_element(self, y: f32) -> Element {
        match self {
            Line::Title(text) => Element::Text {
                x: MARGIN_MM,
                y,
                indent: 0,
                text,
                style: TextStyle::Title,
            },
            Line::Heading(text) => Element::Text {
                x: MARGIN_MM,
                y,
                indent: 0,
                text,
                style: TextStyle::Heading,
            },
            Line::Text {
                text,
                style,
                indent,
            } => Element::Text {
                x: MARGIN_MM + f32::from(indent) * INDENT_MM,
                y,
                indent,
                text,
                style,
            },
            Line::Row { label, value } => Element::Row {
                x: MARGIN_MM,
                y,
                width: CONTENT_WIDTH_MM,
                label,
                value,
            },
        }
    }
}

/// A labelled row; long values continue on label-less rows below.
fn row_lines(label: &str, value: &str) -> Vec<Line> {
    // 標籤、冒號與至少一格空白
    let width = TEXT_COLUMNS.saturating_sub(char_len(label) + 2);
    let mut chunks = wrap(value, width);
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            if i == 0 {
                Line::row(label, chunk)
            } else {
                Line::row("", chunk)
            }
        })
        .collect()
}

fn bullet_lines(item: &str) -> Vec<Line> {
    wrap(item, WRAP_COLUMNS - 4)
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            if i == 0 {
                Line::text(format!("• {}", chunk), TextStyle::Body, 1)
            } else {
                Line::text(chunk, TextStyle::Body, 2)
            }
        })
        .collect()
}

/// Vertical cursor over a growing list of pages.
struct Layouter {
    finished: Vec<Page>,
    current: Page,
    y: f32,
}

impl Layouter {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Page::new(1),
            y: MARGIN_MM,
        }
    }

    fn break_page(&mut self) {
        let next = Page::new(self.current.number + 1);
        self.finished.push(std::mem::replace(&mut self.current, next));
        self.y = MARGIN_MM;
    }

    fn ensure(&mut self, height: f32) {
        if self.y + height > BODY_BOTTOM_MM {
            self.break_page();
        }
    }

    fn band(&mut self, title: &str, subtitle: &str) {
        self.current.elements.push(Element::Band {
            y: 0.0,
            height: HEADER_BAND_MM,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        });
        self.y = FIRST_BODY_TOP_MM;
    }

    /// Lays out a section line by line; the first line stays with the second.
    fn section(&mut self, lines: Vec<Line>) {
        let heights: Vec<f32> = lines.iter().map(Line::height).collect();
        for (i, line) in lines.into_iter().enumerate() {
            let needed = if i == 0 {
                heights.iter().take(2).sum::<f32>()
            } else {
                heights[i]
            };
            self.ensure(needed);
            let height = heights[i];
            self.current.elements.push(line.into_element(self.y));
            self.y += height;
        }
        self.y += SECTION_GAP_MM;
    }

    fn panel(&mut self, rows: Vec<(String, String, TextStyle)>) {
        let height = 2.0 * PANEL_PADDING_MM + rows.len() as f32 * ROW_HEIGHT_MM;
        self.ensure(height);

        let top = self.y;
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, (label, value, style))| PriceRow {
                y: top + PANEL_PADDING_MM + i as f32 * ROW_HEIGHT_MM,
                label,
                value,
                style,
            })
            .collect();

        self.current.elements.push(Element::Panel {
            x: MARGIN_MM,
            y: top,
            width: CONTENT_WIDTH_MM,
            height,
            rows,
        });
        self.y = top + height + SECTION_GAP_MM;
    }

    fn finish(mut self, footer: &str) -> Vec<Page> {
        self.finished.push(self.current);
        let page_count = self.finished.len();
        for page in &mut self.finished {
            page.elements.push(Element::Footer {
                y: FOOTER_Y_MM,
                text: footer.to_string(),
                page: page.number,
                page_count,
            });
        }
        self.finished
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfferDocumentFormatter {
    branding: Branding,
}

impl OfferDocumentFormatter {
    pub fn new(branding: Branding) -> Self {
        Self { branding }
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    /// Renders with today's local date.
    pub fn render(
        &self,
        state: &SelectionState,
        breakdown: &PriceBreakdown,
        catalog: &Catalog,
        contact: Option<&ContactInfo>,
    ) -> Result<OfferDocument> {
        self.render_on(state, breakdown, catalog, contact, Local::now().date_naive())
    }

    /// `contact` falls back to the contact info held in `state`.
    pub fn render_on(
        &self,
        state: &SelectionState,
        breakdown: &PriceBreakdown,
        catalog: &Catalog,
        contact: Option<&ContactInfo>,
        generated_on: NaiveDate,
    ) -> Result<OfferDocument> {
        let room = catalog.room(&state.room_type)?;
        let tier = catalog.tier(&state.renovation_tier)?;
        let contact = contact.unwrap_or(&state.contact_info);
        let b = &self.branding;

        let mut layout = Layouter::new();
        layout.band(&b.business_name, &b.tagline);

        layout.section(vec![
            Line::Title(DOCUMENT_TITLE.to_string()),
            Line::text(
                format!("Дата: {}", format_date(generated_on)),
                TextStyle::Muted,
                0,
            ),
        ]);

        // 只列出有填的欄位
        let customer: Vec<Line> = [
            ("Име", &contact.name),
            ("Телефон", &contact.phone),
            ("Имейл", &contact.email),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .flat_map(|(label, value)| row_lines(label, value.trim()))
        .collect();
        if !customer.is_empty() {
            let mut lines = vec![Line::Heading(CUSTOMER_HEADING.to_string())];
            lines.extend(customer);
            layout.section(lines);
        }

        let mut project = vec![Line::Heading(PROJECT_HEADING.to_string())];
        project.extend(row_lines("Тип помещение", &room.name));
        project.extend(row_lines("Площ", &format_area(state.area, &b.area_unit)));
        project.extend(row_lines("Вид ремонт", &tier.name));
        if let Some(duration) = &tier.duration {
            project.extend(row_lines("Срок за изпълнение", duration));
        }
        layout.section(project);

        if !tier.included.is_empty() {
            let mut lines = vec![Line::Heading(INCLUDED_HEADING.to_string())];
            lines.extend(tier.included.iter().flat_map(|item| bullet_lines(item)));
            layout.section(lines);
        }

        let services: Vec<String> = catalog
            .services
            .iter()
            .filter(|s| state.selected_service_ids.contains(&s.id))
            .map(|s| {
                format!(
                    "{} ({})",
                    s.name,
                    format_unit_price(s.price_per_sqm, &b.currency_suffix, &b.area_unit)
                )
            })
            .collect();
        if !services.is_empty() {
            let mut lines = vec![Line::Heading(SERVICES_HEADING.to_string())];
            lines.extend(services.iter().flat_map(|s| bullet_lines(s)));
            layout.section(lines);
        }

        let money = |value: i64| format_money(value, &b.currency_suffix);
        let mut rows = vec![(
            "Базова цена".to_string(),
            money(breakdown.base_price),
            TextStyle::Body,
        )];
        if breakdown.add_on_price > 0 {
            rows.push((
                SERVICES_HEADING.to_string(),
                money(breakdown.add_on_price),
                TextStyle::Body,
            ));
        }
        if breakdown.discount > 0 {
            rows.push((
                format!("Отстъпка ({})", discount_percent_label()),
                money(-breakdown.discount),
                TextStyle::Body,
            ));
        }
        rows.push((
            "ОРИЕНТИРОВЪЧНА ЦЕНА".to_string(),
            money(breakdown.total),
            TextStyle::Strong,
        ));
        layout.panel(rows);

        layout.section(
            BENEFITS
                .iter()
                .map(|benefit| Line::text(format!("✓ {}", benefit), TextStyle::Body, 0))
                .collect(),
        );

        layout.section(
            wrap(DISCLAIMER, WRAP_COLUMNS)
                .into_iter()
                .map(|chunk| Line::text(chunk, TextStyle::Muted, 0))
                .collect(),
        );

        let footer = format!("Тел.: {} | {}", b.phone, b.domain);
        let pages = layout.finish(&footer);

        tracing::info!(
            "📄 Rendered offer for {} / {} ({} page(s))",
            room.id,
            tier.id,
            pages.len()
        );

        Ok(OfferDocument {
            filename: OFFER_FILENAME.to_string(),
            generated_on,
            pages,
        })
    }
}

/// Hands the rendered offer to the device's save capability.
pub async fn save_offer<S: DocumentSink>(sink: &S, document: &OfferDocument) -> Result<String> {
    let data = document.to_bytes();
    tracing::debug!("Saving {} ({} bytes)", document.filename, data.len());
    let location = sink.save(&document.filename, &data).await?;
    tracing::info!("📁 Offer saved to: {}", location);
    Ok(location)
}
