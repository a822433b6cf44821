use std::fmt::Write as _;
use std::path::Path;
use std::process::Command;

use crate::error::{ReportError, Result};

use super::layout::{Page, PAGE_HEIGHT, PAGE_WIDTH};

/// Document preamble. Pages are laid out already, so Typst only places text.
const PREAMBLE: &str = r##"// Financial report, generated
#set page(width: PAGE_WIDTHpt, height: PAGE_HEIGHTpt, margin: 0pt)
#set text(font: "Helvetica", size: 9pt)
"##;

/// Escape a value for a Typst string literal.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' | '\r' | '\t' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Turn laid-out pages into Typst source with absolutely placed text.
pub fn render_typst(pages: &[Page]) -> String {
    let mut src = PREAMBLE
        .replace("PAGE_WIDTH", &format!("{PAGE_WIDTH:.0}"))
        .replace("PAGE_HEIGHT", &format!("{PAGE_HEIGHT:.0}"));

    for (idx, page) in pages.iter().enumerate() {
        if idx > 0 {
            src.push_str("#pagebreak()\n");
        }
        for item in &page.items {
            let weight = if item.bold { "bold" } else { "regular" };
            let _ = writeln!(
                src,
                "#place(top + left, dx: {:.1}pt, dy: {:.1}pt, text(size: {:.1}pt, weight: \"{}\", \"{}\"))",
                item.x,
                item.y,
                item.size,
                weight,
                escape(&item.text)
            );
        }
    }

    src
}

/// Compile `pages` to a PDF at `output_path` using the Typst CLI
pub fn write_pdf(pages: &[Page], output_path: &Path) -> Result<()> {
    // Check if typst is available
    let typst_check = Command::new("typst").arg("--version").output();

    if typst_check.is_err() {
        return Err(ReportError::TypstNotFound);
    }

    // Create temp directory for the source file
    let temp_dir = std::env::temp_dir().join("member-reports");
    std::fs::create_dir_all(&temp_dir)?;

    let source_path = temp_dir.join(format!("report-{}.typ", std::process::id()));
    std::fs::write(&source_path, render_typst(pages))?;

    let output = Command::new("typst")
        .arg("compile")
        .arg("--root")
        .arg(&temp_dir)
        .arg(&source_path)
        .arg(output_path)
        .output()?;

    // Clean up temp file
    let _ = std::fs::remove_file(&source_path);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReportError::PdfGeneration(stderr.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{PageLayout, TextItem};

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(escape(r#"Say "hi" \ bye"#), r#"Say \"hi\" \\ bye"#);
        assert_eq!(escape("two\nlines"), "two lines");
    }

    #[test]
    fn one_pagebreak_between_pages() {
        let mut layout = PageLayout::new();
        layout.line(12.0, true, "First");
        layout.new_page();
        layout.line(12.0, false, "Second");
        let src = render_typst(&layout.finish());

        assert_eq!(src.matches("#pagebreak()").count(), 1);
        assert!(src.contains("#set page(width: 595pt, height: 842pt, margin: 0pt)"));
        assert!(src.contains("weight: \"bold\", \"First\""));
        assert!(src.contains("\"Page 2 of 2\""));
    }

    #[test]
    fn places_items_at_their_offsets() {
        let page = Page {
            items: vec![TextItem {
                x: 110.0,
                y: 52.5,
                size: 9.0,
                bold: false,
                text: "Donor".to_string(),
            }],
        };
        let src = render_typst(&[page]);
        assert!(src.contains(
            "#place(top + left, dx: 110.0pt, dy: 52.5pt, \
             text(size: 9.0pt, weight: \"regular\", \"Donor\"))"
        ));
    }
}
