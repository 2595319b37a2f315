//! Outbound / inbound section splitting.

use super::rules::{LineKind, classify};
use crate::domain::{Direction, TravelDate};

/// A run of lines under one direction header.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<'a> {
    pub direction: Direction,
    /// Whether a header named the direction. Unlabeled sections get their
    /// direction from route continuity after collection.
    pub labeled: bool,
    pub header_date: Option<TravelDate>,
    /// Lines after the header, up to the next header
    pub lines: &'a [String],
}

/// Partition sanitized lines at section headers.
///
/// Lines before the first header form an unlabeled outbound section. With
/// no header at all the whole list is one unlabeled section.
pub fn split_sections(lines: &[String]) -> Vec<Section<'_>> {
    let headers: Vec<(usize, Direction, Option<TravelDate>)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| match classify(line) {
            LineKind::SectionHeader { direction, date } => Some((i, direction, date)),
            _ => None,
        })
        .collect();

    let mut sections = Vec::with_capacity(headers.len() + 1);
    let first_header = headers.first().map_or(lines.len(), |(i, _, _)| *i);
    if first_header > 0 || headers.is_empty() {
        sections.push(Section {
            direction: Direction::Outbound,
            labeled: false,
            header_date: None,
            lines: &lines[..first_header],
        });
    }

    for (k, (start, direction, header_date)) in headers.iter().enumerate() {
        let end = headers.get(k + 1).map_or(lines.len(), |(i, _, _)| *i);
        sections.push(Section {
            direction: *direction,
            labeled: true,
            header_date: *header_date,
            lines: &lines[start + 1..end],
        });
    }
    sections
}
