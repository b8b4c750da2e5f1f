#[cfg(test)]
#[path = "table_test.rs"]
mod tests;

use chrono::{Local, TimeZone};
use std::fmt::Display;
use unicode_width::UnicodeWidthStr;

use crate::{
    config::constants::MAX_TITLE_WIDTH,
    models::{ConversationSummary, Document, KnowledgeStats},
};

use super::format::{
    format_date_in, format_datetime_in, format_file_size, pad_to_width, truncate_to_width,
};

/// Left-aligned columns separated by two spaces.
pub fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths = header.iter().map(|h| h.width()).collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.width());
            }
        }
    }

    let line = |cells: Vec<String>| {
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == last {
                    cell.to_string()
                } else {
                    pad_to_width(cell, widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = vec![line(header.iter().map(|h| h.to_string()).collect())];
    out.extend(rows.iter().map(|row| line(row.clone())));
    out.join("\n")
}

pub fn conversation_table(conversations: &[ConversationSummary], current: Option<&str>) -> String {
    conversation_table_in(conversations, current, &Local)
}

pub fn conversation_table_in<Tz: TimeZone>(
    conversations: &[ConversationSummary],
    current: Option<&str>,
    tz: &Tz,
) -> String
where
    Tz::Offset: Display,
{
    if conversations.is_empty() {
        return "No conversations yet".to_string();
    }

    let rows = conversations
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let marker = if current == Some(c.id.as_str()) { "*" } else { "" };
            vec![
                format!("{}{}", marker, i + 1),
                truncate_to_width(&c.title, MAX_TITLE_WIDTH),
                c.message_count.to_string(),
                format_datetime_in(c.updated_at.as_ref().or(c.created_at.as_ref()), tz),
                c.id.clone(),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["#", "TITLE", "MESSAGES", "UPDATED", "ID"], &rows)
}

pub fn document_table(documents: &[Document]) -> String {
    document_table_in(documents, &Local)
}

pub fn document_table_in<Tz: TimeZone>(documents: &[Document], tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    if documents.is_empty() {
        return "No documents uploaded yet".to_string();
    }

    let rows = documents
        .iter()
        .map(|d| {
            vec![
                d.filename.clone(),
                format_file_size(d.size),
                format_date_in(d.created_at, tz),
            ]
        })
        .collect::<Vec<_>>();
    render_table(&["NAME", "SIZE", "UPLOADED"], &rows)
}

pub fn stats_table(stats: &KnowledgeStats) -> String {
    render_table(
        &["DOCUMENTS", "VECTORS"],
        &[vec![
            stats.document_count.to_string(),
            stats.vector_count.to_string(),
        ]],
    )
}
