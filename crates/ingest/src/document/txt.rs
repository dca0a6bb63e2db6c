use super::{ExtractionError, Extractor, JoinRule, TextFragment};

/// One fragment per line, line terminator included.
pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<Vec<TextFragment>, ExtractionError> {
        extract_txt(bytes)
    }

    fn join_rule(&self) -> JoinRule {
        JoinRule::Concatenate
    }
}

fn extract_txt(bytes: &[u8]) -> Result<Vec<TextFragment>, ExtractionError> {
    let text = String::from_utf8(bytes.to_vec())?;

    // Universal newlines: \r\n and lone \r both become \n.
    let text = text.replace("\r\n", "\n").replace('\r', "\n");

    Ok(text
        .split_inclusive('\n')
        .enumerate()
        .map(|(i, line)| TextFragment::new(i, line))
        .collect())
}
