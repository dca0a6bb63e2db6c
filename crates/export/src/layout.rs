//! Page layout: the block stream for both document sections.

use quizgen_core::config::ExportConfig;
use quizgen_core::record::ExportItem;
use quizgen_core::text::{normalize_whitespace, sanitize};

use crate::encoding;
use crate::error::RenderError;
use crate::geometry::{
    PageGeometry, ANSWER_LINE_HEIGHT, CHOICE_INDENT, CHOICE_LABEL_WIDTH, LINE_HEIGHT, SECTION_GAP,
};
use crate::wrap::wrap;

pub const ANSWER_KEY_HEADING: &str = "ANSWER KEY";
pub const CHOICE_LABELS: [char; 4] = ['a', 'b', 'c', 'd'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Questions,
    AnswerKey,
}

/// One renderable element. Text is already sanitized and wrapped.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Running page number, right-aligned.
    PageNumber(usize),
    /// Bold single-line header text (title, section heading).
    Heading(String),
    /// Regular single-line header text (signature lines).
    Line(String),
    /// Bold question text, first line prefixed with its number.
    Question { number: usize, lines: Vec<String> },
    /// Indented answer choice.
    Choice { label: char, lines: Vec<String> },
    /// `"{number}: ({letter})"` in the answer key.
    AnswerKeyEntry { number: usize, letter: char },
    /// Vertical whitespace in points.
    Spacer(f32),
}

impl Block {
    /// Vertical space the block occupies, in points.
    pub fn height(&self) -> f32 {
        match self {
            Block::PageNumber(_) | Block::Heading(_) | Block::Line(_) => LINE_HEIGHT,
            // A blank line follows the question text.
            Block::Question { lines, .. } => (lines.len() + 1) as f32 * LINE_HEIGHT,
            Block::Choice { lines, .. } => lines.len() as f32 * LINE_HEIGHT,
            Block::AnswerKeyEntry { .. } => ANSWER_LINE_HEIGHT,
            Block::Spacer(h) => *h,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based, continuous across both sections.
    pub number: usize,
    pub section: Section,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn content_height(&self) -> f32 {
        self.blocks.iter().map(Block::height).sum()
    }
}

/// Lay `items` out across pages, `per_page` items to a page.
///
/// Every page opens with `header(page_number)`; `body(index, item)` yields the
/// blocks for one item. `page_counter` holds the last page number used and is
/// advanced for each new page. An item that would run past `max_height`
/// continues on a fresh page; only an item taller than a whole page is an
/// error.
pub(crate) fn paginate<T, H, B>(
    items: &[T],
    per_page: usize,
    section: Section,
    page_counter: &mut usize,
    max_height: f32,
    header: H,
    mut body: B,
) -> Result<Vec<Page>, RenderError>
where
    H: Fn(usize) -> Vec<Block>,
    B: FnMut(usize, &T) -> Result<Vec<Block>, RenderError>,
{
    let per_page = per_page.max(1);
    let mut pages = Vec::with_capacity(items.len().div_ceil(per_page));
    let open_page = |counter: &mut usize| {
        *counter += 1;
        Page {
            number: *counter,
            section,
            blocks: header(*counter),
        }
    };

    for (group_idx, group) in items.chunks(per_page).enumerate() {
        let mut page = open_page(page_counter);
        let mut on_page = 0;
        for (offset, item) in group.iter().enumerate() {
            let index = group_idx * per_page + offset;
            let blocks = body(index, item)?;
            let height: f32 = blocks.iter().map(Block::height).sum();

            if on_page > 0 && page.content_height() + height > max_height {
                tracing::debug!(index, page = page.number, "continuing on a new page");
                pages.push(std::mem::replace(&mut page, open_page(page_counter)));
                on_page = 0;
            }

            page.blocks.extend(blocks);
            on_page += 1;
            if page.content_height() > max_height {
                return Err(RenderError::PageOverflow {
                    index,
                    page: page.number,
                });
            }
        }
        pages.push(page);
    }
    Ok(pages)
}

/// Builds the page stream for a set of records.
pub(crate) struct Layout<'a> {
    pub config: &'a ExportConfig,
    pub geometry: &'a PageGeometry,
}

impl Layout<'_> {
    /// Question pages followed by answer-key pages, numbered continuously.
    pub fn pages(&self, items: &[ExportItem]) -> Result<Vec<Page>, RenderError> {
        let title = sanitize(&self.config.title);
        encoding::encode(&title).map_err(|ch| RenderError::InvalidTitle { ch })?;

        let max_height = self.geometry.content_height();
        let mut page_counter = 0;

        let mut pages = paginate(
            items,
            self.config.questions_per_page,
            Section::Questions,
            &mut page_counter,
            max_height,
            |n| question_header(n, &title),
            |i, item| self.question_blocks(i, item),
        )?;

        let answer_pages = paginate(
            items,
            self.config.answers_per_page,
            Section::AnswerKey,
            &mut page_counter,
            max_height,
            |n| answer_key_header(n, &title),
            |i, item| answer_key_blocks(i, item),
        )?;
        pages.extend(answer_pages);
        Ok(pages)
    }

    fn question_blocks(&self, index: usize, item: &ExportItem) -> Result<Vec<Block>, RenderError> {
        let choices = item.choices();
        if choices.len() != CHOICE_LABELS.len() {
            return Err(RenderError::ChoiceCount {
                index,
                found: choices.len(),
            });
        }

        let font_size = self.config.font_size;
        let full_width = self.geometry.content_width();
        let choice_width = full_width - CHOICE_INDENT - CHOICE_LABEL_WIDTH;

        let question = encodable(index, format!("{}. {}", index + 1, item.record().question))?;
        let mut blocks = vec![Block::Question {
            number: index + 1,
            lines: wrap(&question, full_width, font_size, FontStyle::Bold),
        }];

        for (label, choice) in CHOICE_LABELS.iter().zip(choices) {
            let text = encodable(index, choice.clone())?;
            blocks.push(Block::Choice {
                label: *label,
                lines: wrap(&text, choice_width, font_size, FontStyle::Regular),
            });
        }
        blocks.push(Block::Spacer(SECTION_GAP));
        Ok(blocks)
    }
}

/// Sanitize `text`, collapse its whitespace, and confirm the PDF font can
/// encode it.
fn encodable(index: usize, text: String) -> Result<String, RenderError> {
    let text = normalize_whitespace(&sanitize(&text));
    encoding::encode(&text).map_err(|ch| RenderError::Unencodable { index, ch })?;
    Ok(text)
}

fn question_header(page_number: usize, title: &str) -> Vec<Block> {
    vec![
        Block::PageNumber(page_number),
        Block::Heading(title.to_string()),
        Block::Line("Name: _____________________".to_string()),
        Block::Line("Date: _____________________".to_string()),
        Block::Spacer(SECTION_GAP),
    ]
}

fn answer_key_header(page_number: usize, title: &str) -> Vec<Block> {
    vec![
        Block::PageNumber(page_number),
        Block::Heading(title.to_string()),
        Block::Heading(ANSWER_KEY_HEADING.to_string()),
        Block::Spacer(SECTION_GAP),
    ]
}

fn answer_key_blocks(index: usize, item: &ExportItem) -> Result<Vec<Block>, RenderError> {
    let letter = item
        .correct_index()
        .and_then(|pos| CHOICE_LABELS.get(pos).copied())
        .ok_or_else(|| RenderError::AnswerNotFound {
            index,
            answer: item.record().correct_answer.clone(),
        })?;
    Ok(vec![Block::AnswerKeyEntry {
        number: index + 1,
        letter,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizgen_core::record::QuestionRecord;

    fn item(question: &str, correct: usize) -> ExportItem {
        let choices: Vec<String> = (0..4).map(|c| format!("choice {c}")).collect();
        let record = QuestionRecord {
            question: question.to_string(),
            correct_answer: choices[correct].clone(),
            incorrect_answers: Vec::new(),
        };
        ExportItem::new(record, choices)
    }

    fn items(n: usize) -> Vec<ExportItem> {
        (0..n).map(|i| item(&format!("Question {i}?"), i % 4)).collect()
    }

    fn layout_pages(items: &[ExportItem], config: &ExportConfig) -> Result<Vec<Page>, RenderError> {
        let geometry = PageGeometry::LETTER;
        Layout {
            config,
            geometry: &geometry,
        }
        .pages(items)
    }

    fn count(pages: &[Page], section: Section) -> usize {
        pages.iter().filter(|p| p.section == section).count()
    }

    #[test]
    fn three_records_make_three_pages() {
        let pages = layout_pages(&items(3), &ExportConfig::default()).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(count(&pages, Section::Questions), 2);
        assert_eq!(count(&pages, Section::AnswerKey), 1);
    }

    #[test]
    fn section_page_counts_follow_intervals() {
        let config = ExportConfig::default();
        for n in 1..=40 {
            let pages = layout_pages(&items(n), &config).unwrap();
            assert_eq!(count(&pages, Section::Questions), n.div_ceil(2), "n={n}");
            assert_eq!(count(&pages, Section::AnswerKey), n.div_ceil(15), "n={n}");
        }
    }

    #[test]
    fn page_numbers_are_continuous_across_sections() {
        let pages = layout_pages(&items(5), &ExportConfig::default()).unwrap();
        let numbers: Vec<usize> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        for page in &pages {
            assert_eq!(page.blocks[0], Block::PageNumber(page.number));
        }
        assert_eq!(pages[3].section, Section::AnswerKey);
    }

    #[test]
    fn question_header_has_title_and_signature_lines() {
        let pages = layout_pages(&items(1), &ExportConfig::default()).unwrap();
        let q = &pages[0].blocks;
        assert_eq!(q[1], Block::Heading(quizgen_core::config::DEFAULT_TITLE.to_string()));
        assert_eq!(q[2], Block::Line("Name: _____________________".to_string()));
        assert_eq!(q[3], Block::Line("Date: _____________________".to_string()));
        assert_eq!(q[4], Block::Spacer(SECTION_GAP));

        let a = &pages[1].blocks;
        assert_eq!(a[2], Block::Heading(ANSWER_KEY_HEADING.to_string()));
    }

    #[test]
    fn questions_are_numbered_and_choices_keep_order() {
        let mut record_item = item("Which one?", 2);
        record_item.1 = vec!["d".into(), "c".into(), "b".into(), "a".into()];
        record_item.0.correct_answer = "b".into();
        let pages = layout_pages(&[record_item], &ExportConfig::default()).unwrap();
        let blocks = &pages[0].blocks[5..];
        assert_eq!(
            blocks[0],
            Block::Question {
                number: 1,
                lines: vec!["1. Which one?".to_string()]
            }
        );
        let labels: Vec<(char, String)> = blocks[1..5]
            .iter()
            .map(|b| match b {
                Block::Choice { label, lines } => (*label, lines.join(" ")),
                other => panic!("unexpected block {other:?}"),
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                ('a', "d".to_string()),
                ('b', "c".to_string()),
                ('c', "b".to_string()),
                ('d', "a".to_string()),
            ]
        );
        assert_eq!(
            pages[1].blocks.last(),
            Some(&Block::AnswerKeyEntry { number: 1, letter: 'c' })
        );
    }

    #[test]
    fn answer_key_letters_match_correct_positions() {
        let pages = layout_pages(&items(8), &ExportConfig::default()).unwrap();
        let entries: Vec<(usize, char)> = pages
            .iter()
            .filter(|p| p.section == Section::AnswerKey)
            .flat_map(|p| &p.blocks)
            .filter_map(|b| match b {
                Block::AnswerKeyEntry { number, letter } => Some((*number, *letter)),
                _ => None,
            })
            .collect();
        let expected: Vec<(usize, char)> =
            (0..8).map(|i| (i + 1, CHOICE_LABELS[i % 4])).collect();
        assert_eq!(entries, expected);
    }

    #[test]
    fn text_is_sanitized() {
        let mut it = item("Isn\u{2019}t it \u{201C}odd\u{201D}\u{2026}", 0);
        it.1[1] = "en\u{2013}dash and em\u{2014}dash".into();
        let pages = layout_pages(&[it], &ExportConfig::default()).unwrap();
        let blocks = &pages[0].blocks;
        assert_eq!(
            blocks[5],
            Block::Question {
                number: 1,
                lines: vec!["1. Isn't it \"odd\"...".to_string()]
            }
        );
        assert_eq!(
            blocks[7],
            Block::Choice {
                label: 'b',
                lines: vec!["en-dash and em--dash".to_string()]
            }
        );
    }

    #[test]
    fn missing_correct_answer_names_the_record() {
        let mut bad = items(4);
        bad[2].0.correct_answer = "not a choice".into();
        let err = layout_pages(&bad, &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::AnswerNotFound { index: 2, .. }));
        assert_eq!(err.record_index(), Some(2));
    }

    #[test]
    fn wrong_choice_count_is_rejected() {
        let mut bad = items(3);
        bad[1].1.pop();
        let err = layout_pages(&bad, &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::ChoiceCount { index: 1, found: 3 }));
    }

    #[test]
    fn unencodable_text_is_rejected() {
        let mut bad = items(2);
        bad[1].0.question = "What does \u{1F600} mean?".into();
        let err = layout_pages(&bad, &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Unencodable { index: 1, ch: '\u{1F600}' }));
    }

    #[test]
    fn oversized_record_overflows_its_page() {
        let long = "word ".repeat(5000);
        let mut bad = items(3);
        bad[2].0.question = long;
        let err = layout_pages(&bad, &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::PageOverflow { index: 2, page: 2 }));
    }

    #[test]
    fn tall_question_group_continues_on_next_page() {
        let config = ExportConfig {
            questions_per_page: 6,
            ..ExportConfig::default()
        };
        let pages = layout_pages(&items(6), &config).unwrap();
        // Five one-line questions fit under the header; the sixth flows over.
        assert_eq!(count(&pages, Section::Questions), 2);
        assert_eq!(count(&pages, Section::AnswerKey), 1);
        let numbers: Vec<usize> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(pages[1].blocks[0], Block::PageNumber(2));
        assert!(matches!(pages[1].blocks[5], Block::Question { number: 6, .. }));
        for page in &pages {
            assert!(page.content_height() <= PageGeometry::LETTER.content_height());
        }
    }

    #[test]
    fn long_answer_key_continues_on_next_page() {
        let config = ExportConfig {
            answers_per_page: 40,
            ..ExportConfig::default()
        };
        let pages = layout_pages(&items(40), &config).unwrap();
        assert_eq!(count(&pages, Section::Questions), 20);
        let key: Vec<&Page> = pages.iter().filter(|p| p.section == Section::AnswerKey).collect();
        assert_eq!(key.len(), 2);
        assert_eq!(key[0].number, 21);
        assert_eq!(key[1].number, 22);
        assert_eq!(key[1].blocks[2], Block::Heading(ANSWER_KEY_HEADING.to_string()));
        let entries = key
            .iter()
            .flat_map(|p| &p.blocks)
            .filter(|b| matches!(b, Block::AnswerKeyEntry { .. }))
            .count();
        assert_eq!(entries, 40);
    }

    #[test]
    fn paginate_breaks_when_height_runs_out() {
        let data: Vec<u32> = (0..5).collect();
        let mut counter = 0;
        let pages = paginate(
            &data,
            5,
            Section::AnswerKey,
            &mut counter,
            4.5 * LINE_HEIGHT,
            |n| vec![Block::PageNumber(n)],
            |_, v| Ok(vec![Block::Line(v.to_string())]),
        )
        .unwrap();
        assert_eq!(counter, 2);
        let sizes: Vec<usize> = pages.iter().map(|p| p.blocks.len()).collect();
        assert_eq!(sizes, vec![4, 3]);
        assert_eq!(pages[1].blocks[1], Block::Line("3".to_string()));
    }

    #[test]
    fn paginate_opens_pages_at_interval_multiples() {
        let data: Vec<u32> = (0..7).collect();
        let mut counter = 10;
        let pages = paginate(
            &data,
            3,
            Section::Questions,
            &mut counter,
            f32::MAX,
            |n| vec![Block::PageNumber(n)],
            |i, v| {
                assert_eq!(i as u32, *v);
                Ok(vec![Block::Line(v.to_string())])
            },
        )
        .unwrap();
        assert_eq!(counter, 13);
        let sizes: Vec<usize> = pages.iter().map(|p| p.blocks.len()).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
        assert_eq!(pages[2].number, 13);
    }

    #[test]
    fn paginate_empty_input_has_no_pages() {
        let mut counter = 0;
        let pages = paginate::<u32, _, _>(
            &[],
            2,
            Section::AnswerKey,
            &mut counter,
            f32::MAX,
            |n| vec![Block::PageNumber(n)],
            |_, _| Ok(Vec::new()),
        )
        .unwrap();
        assert!(pages.is_empty());
        assert_eq!(counter, 0);
    }
}
