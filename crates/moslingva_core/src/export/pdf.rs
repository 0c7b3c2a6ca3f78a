//! Minimal single-page PDF text report writer.
//!
//! Lines are set in 10pt Courier on an A4 page. Latin-1 characters are kept
//! through `WinAnsiEncoding`; anything else becomes `?`.

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 42;
const FONT_SIZE: u32 = 10;
const LEADING: u32 = 12;
const MAX_LINE_CHARS: usize = 84;
const MAX_LINES: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;
const OVERFLOW_MARKER: &str = "...";

/// Renders `lines` into a complete PDF document.
pub fn render_text_pdf(lines: &[String]) -> Vec<u8> {
    let content = page_content(lines);
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Courier /Encoding /WinAnsiEncoding >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{body}\nendobj\n", index + 1));
    }

    let xref_offset = out.len();
    out.push_str(&format!(
        "xref\n0 {}\n0000000000 65535 f \n",
        objects.len() + 1
    ));
    for offset in offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));

    out.into_bytes()
}

fn page_content(lines: &[String]) -> String {
    let mut visible = lines.iter().map(String::as_str).collect::<Vec<_>>();
    if visible.len() > MAX_LINES {
        visible.truncate(MAX_LINES - 1);
        visible.push(OVERFLOW_MARKER);
    }

    let mut content = format!(
        "BT\n/F1 {FONT_SIZE} Tf\n{LEADING} TL\n{MARGIN} {} Td\n",
        PAGE_HEIGHT - MARGIN
    );
    for line in visible {
        content.push_str(&format!("({}) Tj\nT*\n", escape_text(line)));
    }
    content.push_str("ET");
    content
}

/// Escapes one line as a PDF literal string body; output is pure ASCII.
fn escape_text(line: &str) -> String {
    let mut escaped = String::new();
    for ch in line.chars().take(MAX_LINE_CHARS) {
        match ch {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '\t' => escaped.push(' '),
            ' '..='~' => escaped.push(ch),
            '\u{a0}'..='\u{ff}' => {
                escaped.push_str(&format!("\\{:03o}", u32::from(ch)));
            }
            _ => escaped.push('?'),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_text, render_text_pdf, MAX_LINES};

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8(bytes.to_vec()).expect("pdf output should be ASCII")
    }

    #[test]
    fn document_has_header_trailer_and_valid_startxref() {
        let pdf = as_text(&render_text_pdf(&["Paradej : Bonjour".to_string()]));
        assert!(pdf.starts_with("%PDF-1.4\n"));
        assert!(pdf.ends_with("%%EOF\n"));
        assert!(pdf.contains("(Paradej : Bonjour) Tj"));

        let start = pdf.rfind("startxref\n").unwrap() + "startxref\n".len();
        let offset: usize = pdf[start..].lines().next().unwrap().parse().unwrap();
        assert!(pdf[offset..].starts_with("xref\n0 6\n"));
    }

    #[test]
    fn object_offsets_point_at_objects() {
        let pdf = as_text(&render_text_pdf(&[]));
        let xref = pdf.find("xref\n").unwrap();
        let entries = pdf[xref..].lines().skip(3).take(5).collect::<Vec<_>>();
        for (index, entry) in entries.iter().enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            assert!(pdf[offset..].starts_with(&format!("{} 0 obj", index + 1)));
        }
    }

    #[test]
    fn text_is_escaped_and_latin1_kept_as_octal() {
        assert_eq!(escape_text(r"a(b)\c"), r"a\(b\)\\c");
        assert_eq!(escape_text("zéro"), r"z\351ro");
        assert_eq!(escape_text("日"), "?");
    }

    #[test]
    fn overflowing_lines_are_cut_with_marker() {
        let lines = (0..200).map(|i| format!("line {i}")).collect::<Vec<_>>();
        let pdf = as_text(&render_text_pdf(&lines));
        assert_eq!(pdf.matches(" Tj").count(), MAX_LINES);
        assert!(pdf.contains("(...) Tj"));
        assert!(!pdf.contains("(line 199) Tj"));
    }
}
