//! Minimal PDF 1.4 writer for the document report.
//!
//! A4 portrait pages, the standard Helvetica font (WinAnsi subset, so text is
//! reduced to printable ASCII) and uncompressed RGB image XObjects.

use super::document::DocumentReport;
use crate::render::ChartImage;

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 40.0;
const TOP: f64 = PAGE_HEIGHT - 42.0;
const TITLE_SIZE: f64 = 16.0;
const HEADING_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 11.0;
const LEADING: f64 = 15.0;
const WRAP_COLUMNS: usize = 90;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_ID: usize = 3;

/// Serialize `report` into a complete PDF file.
pub fn write_pdf(report: &DocumentReport) -> Vec<u8> {
    // Catalog, page tree and font are filled in once the kids are known.
    let mut objects: Vec<Vec<u8>> = vec![Vec::new(); 3];
    let mut kids = Vec::new();

    for (index, lines) in paginate(&report.summary).into_iter().enumerate() {
        let mut content = String::new();
        let mut y = TOP;
        if index == 0 {
            content.push_str(&text_op(TITLE_SIZE, MARGIN, y, &report.title));
            y -= LEADING * 2.0;
        }
        for line in lines {
            content.push_str(&text_op(BODY_SIZE, MARGIN, y, &line));
            y -= LEADING;
        }
        let content_id = push(&mut objects, stream(b"", content.as_bytes()));
        kids.push(push(&mut objects, page(content_id, None)));
    }

    for chart in &report.pages {
        let image_id = push(&mut objects, image_object(&chart.image));
        let (width, height) = fit(&chart.image);
        let mut content = text_op(HEADING_SIZE, MARGIN, TOP, &chart.heading);
        content.push_str(&format!(
            "q {:.2} 0 0 {:.2} {:.2} {:.2} cm /Im1 Do Q\n",
            width,
            height,
            MARGIN,
            TOP - 20.0 - height
        ));
        let content_id = push(&mut objects, stream(b"", content.as_bytes()));
        kids.push(push(&mut objects, page(content_id, Some(image_id))));
    }

    objects[CATALOG_ID - 1] =
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).into_bytes();
    objects[PAGES_ID - 1] = format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" "),
        kids.len()
    )
    .into_bytes();
    objects[FONT_ID - 1] =
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec();

    serialize(&objects)
}

fn push(objects: &mut Vec<Vec<u8>>, body: Vec<u8>) -> usize {
    objects.push(body);
    objects.len()
}

fn page(content_id: usize, image_id: Option<usize>) -> Vec<u8> {
    let xobject = image_id
        .map(|id| format!(" /XObject << /Im1 {} 0 R >>", id))
        .unwrap_or_default();
    format!(
        "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 {} 0 R >>{} >> /Contents {} 0 R >>",
        PAGES_ID, PAGE_WIDTH, PAGE_HEIGHT, FONT_ID, xobject, content_id
    )
    .into_bytes()
}

fn stream(dict_extra: &[u8], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 64);
    out.extend_from_slice(b"<< ");
    out.extend_from_slice(dict_extra);
    out.extend_from_slice(format!("/Length {} >>\nstream\n", data.len()).as_bytes());
    out.extend_from_slice(data);
    out.extend_from_slice(b"\nendstream");
    out
}

fn image_object(image: &ChartImage) -> Vec<u8> {
    let dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 ",
        image.width(),
        image.height()
    );
    stream(dict.as_bytes(), image.rgb_bytes())
}

/// Scale an image to the printable width, keeping its aspect ratio.
fn fit(image: &ChartImage) -> (f64, f64) {
    let width = PAGE_WIDTH - 2.0 * MARGIN;
    let ratio = image.height() as f64 / image.width().max(1) as f64;
    (width, width * ratio)
}

fn text_op(size: f64, x: f64, y: f64, text: &str) -> String {
    format!(
        "BT /F1 {} Tf {:.2} {:.2} Td ({}) Tj ET\n",
        size,
        x,
        y,
        escape_text(&sanitize(text))
    )
}

/// Split summary lines into pages, wrapping long lines. The first page
/// leaves room for the title.
fn paginate(lines: &[String]) -> Vec<Vec<String>> {
    let per_page = ((TOP - MARGIN) / LEADING) as usize;
    let mut pages = vec![Vec::new()];
    let mut capacity = per_page - 2;

    for line in lines.iter().flat_map(|l| wrap(l, WRAP_COLUMNS)) {
        if pages.last().map_or(0, Vec::len) >= capacity {
            pages.push(Vec::new());
            capacity = per_page;
        }
        if let Some(current) = pages.last_mut() {
            current.push(line);
        }
    }
    pages
}

fn wrap(line: &str, columns: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        // Words wider than a line are hard-broken into column-sized pieces.
        for piece in chars.chunks(columns.max(1)) {
            let width = current.chars().count();
            if width > 0 && width + 1 + piece.len() > columns {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(piece);
        }
    }
    out.push(current);
    out
}

/// Reduce text to printable ASCII. Subscript digits become plain digits.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .flat_map(|c| -> Vec<char> {
            match c {
                '\u{2080}'..='\u{2089}' => {
                    vec![char::from(b'0' + (c as u32 - 0x2080) as u8)]
                }
                '\u{20B9}' => "INR".chars().collect(),
                c if c.is_ascii() && !c.is_ascii_control() => vec![c],
                _ => vec!['?'],
            }
        })
        .collect()
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn serialize(objects: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            CATALOG_ID,
            xref
        )
        .as_bytes(),
    );
    out
}
