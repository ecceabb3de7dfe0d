//! Line-item table location and wrapped-row reassembly.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

use super::rules::patterns::{is_table_stop, ACTIVITY_SPLIT, ROW_TAIL};
use crate::models::invoice::LineItem;

/// Keyword classes that must all appear on the table header row.
const HEADER_KEYWORDS: [&[&str]; 5] = [
    &["ACTIVITY"],
    &["DESCRIPTION"],
    &["QTY", "QUANTITY"],
    &["RATE", "PRICE"],
    &["AMOUNT", "EXT", "TOTAL"],
];

/// Index of the first line carrying every table header keyword class.
pub fn locate_table_header(lines: &[String]) -> Option<usize> {
    lines.iter().position(|line| {
        let upper = line.to_uppercase();
        HEADER_KEYWORDS
            .iter()
            .all(|class| class.iter().any(|kw| upper.contains(kw)))
    })
}

/// How a single table line is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowLine {
    /// End of the table.
    Stop,
    /// Nothing to do.
    Skip,
    /// A complete row with a numeric tail.
    Tail(LineItem),
    /// A row start without numbers (only while no item exists).
    Seed(LineItem),
    /// Wrapped text belonging to the previous item.
    Continuation(String),
}

/// Reassembly state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// No item has been appended yet.
    NoItems,
    /// The last appended item still accepts continuation text.
    ItemOpen,
    /// A stop row was seen; later lines are ignored.
    Done,
}

/// State machine folding table lines into [`LineItem`]s.
#[derive(Debug)]
pub struct RowAssembler {
    state: RowState,
    items: Vec<LineItem>,
}

impl RowAssembler {
    pub fn new() -> Self {
        Self {
            state: RowState::NoItems,
            items: Vec::new(),
        }
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    /// Classify a line given the current state.
    pub fn classify(&self, line: &str) -> RowLine {
        let line = line.trim();
        if is_table_stop(line) {
            return RowLine::Stop;
        }
        if line.is_empty() {
            return RowLine::Skip;
        }
        if let Some(item) = parse_tail_row(line) {
            return RowLine::Tail(item);
        }
        match self.state {
            RowState::NoItems => match split_activity(line) {
                Some((activity, description)) => RowLine::Seed(LineItem::new(activity, description)),
                None => RowLine::Skip,
            },
            RowState::ItemOpen => RowLine::Continuation(line.to_string()),
            RowState::Done => RowLine::Skip,
        }
    }

    /// Feed one line. Returns `false` once the table has ended.
    pub fn push_line(&mut self, line: &str) -> bool {
        if self.state == RowState::Done {
            return false;
        }

        match self.classify(line) {
            RowLine::Stop => {
                trace!("table ends at {:?}", line);
                self.state = RowState::Done;
                return false;
            }
            RowLine::Skip => {}
            RowLine::Tail(item) | RowLine::Seed(item) => {
                self.items.push(item);
                self.state = RowState::ItemOpen;
            }
            RowLine::Continuation(text) => {
                if let Some(last) = self.items.last_mut() {
                    last.append_description(&text);
                }
            }
        }
        true
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn finish(self) -> Vec<LineItem> {
        self.items
    }
}

impl Default for RowAssembler {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the rows following the table header.
///
/// Returns an empty list when there is no header. The result depends only on
/// `lines` and `header`.
pub fn parse_rows(lines: &[String], header: Option<usize>) -> Vec<LineItem> {
    let Some(header) = header else {
        return Vec::new();
    };

    let mut assembler = RowAssembler::new();
    for line in lines.iter().skip(header + 1) {
        if !assembler.push_line(line) {
            break;
        }
    }
    assembler.finish()
}

/// Parse a row ending in `<qty> <rate> <amount>`.
pub fn parse_tail_row(line: &str) -> Option<LineItem> {
    let caps = ROW_TAIL.captures(line)?;
    let tail_start = caps.get(1)?.start();
    let left = line[..tail_start].trim();

    let (activity, description) =
        split_activity(left).unwrap_or_else(|| (String::new(), left.to_string()));

    Some(LineItem::new(activity, description).with_numbers(
        parse_quantity(&caps[1]),
        parse_money(&caps[2]),
        parse_money(&caps[3]),
    ))
}

/// Split `CODE rest of text` into activity and description.
fn split_activity(text: &str) -> Option<(String, String)> {
    let caps = ACTIVITY_SPLIT.captures(text)?;
    Some((caps[1].to_string(), caps[2].trim().to_string()))
}

fn parse_quantity(s: &str) -> Option<Decimal> {
    Decimal::from_str(s.trim()).ok()
}

/// Parse a money token, ignoring `$` and thousands separators.
pub fn parse_money(s: &str) -> Option<Decimal> {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}
