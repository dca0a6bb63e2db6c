use docx_rs::{DocumentChild, Paragraph, ParagraphChild, Run, RunChild};

use super::{ExtractionError, Extractor, JoinRule, TextFragment};

/// One fragment per top-level body paragraph via `docx-rs`.
pub struct DocxExtractor;

impl Extractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<TextFragment>, ExtractionError> {
        extract_docx(bytes)
    }

    fn join_rule(&self) -> JoinRule {
        JoinRule::Concatenate
    }
}

fn extract_docx(bytes: &[u8]) -> Result<Vec<TextFragment>, ExtractionError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(format!("{e:?}")))?;

    // Tables and other block content are not paragraphs of the body and are
    // skipped. Empty paragraphs are kept so positions match the document.
    let fragments = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(para) => Some(paragraph_text(para)),
            _ => None,
        })
        .enumerate()
        .map(|(i, text)| TextFragment::new(i, text))
        .collect();

    Ok(fragments)
}

/// Concatenate the text of every run in a paragraph, including runs nested
/// in hyperlinks.
fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&para.children, &mut text);
    text
}

fn push_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for rc in &run.children {
        match rc {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

    fn build(docx: Docx) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn one_fragment_per_paragraph() {
        let bytes = build(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Photosynthesis")))
                .add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text("Sun"))
                        .add_run(Run::new().add_text("light")),
                ),
        );
        let fragments = extract_docx(&bytes).unwrap();
        assert_eq!(
            fragments,
            vec![
                TextFragment::new(0, "Photosynthesis"),
                TextFragment::new(1, "Sunlight"),
            ]
        );
    }

    #[test]
    fn keeps_empty_paragraphs_and_tabs() {
        let bytes = build(
            Docx::new()
                .add_paragraph(Paragraph::new())
                .add_paragraph(
                    Paragraph::new().add_run(Run::new().add_text("a").add_tab().add_text("b")),
                ),
        );
        let fragments = extract_docx(&bytes).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].text, "");
        assert_eq!(fragments[1].text, "a\tb");
    }

    #[test]
    fn skips_tables() {
        let table = Table::new(vec![TableRow::new(vec![TableCell::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("cell")))])]);
        let bytes = build(
            Docx::new()
                .add_table(table)
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("body"))),
        );
        let fragments = extract_docx(&bytes).unwrap();
        assert_eq!(fragments, vec![TextFragment::new(0, "body")]);
    }
}
