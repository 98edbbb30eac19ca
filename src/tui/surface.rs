//! A [`RowSurface`] that turns picker rows into ratatui lines.
//!
//! The tree pane scrolls, so rows are collected first and painted once the
//! total is known. The pending keyboard action is answered by the row under
//! the cursor, which is how key presses reach the depth-first walk.

use ratatui::prelude::*;

use crate::network::{Rgba, TargetId};
use crate::picker::{Ambient, Row, RowResponse, RowSurface};

/// A key press waiting for the next render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Toggle,
    Select,
}

/// One painted row.
#[derive(Debug, Clone)]
pub struct PaintedRow {
    pub id: TargetId,
    pub line: Line<'static>,
}

#[derive(Debug, Default)]
pub struct LineSurface {
    ambient: Ambient,
    show_colors: bool,
    cursor: usize,
    pending: Option<RowAction>,
    rows: Vec<PaintedRow>,
}

impl LineSurface {
    pub fn new(cursor: usize, pending: Option<RowAction>, show_colors: bool) -> Self {
        Self {
            cursor,
            pending,
            show_colors,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[PaintedRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<PaintedRow> {
        self.rows
    }
}

pub fn to_color(color: Rgba) -> Color {
    let (r, g, b) = color.to_rgb8();
    Color::Rgb(r, g, b)
}

impl RowSurface for LineSurface {
    fn ambient(&self) -> Ambient {
        self.ambient
    }

    fn set_ambient(&mut self, ambient: Ambient) {
        self.ambient = ambient;
    }

    fn row(&mut self, row: &Row<'_>) -> RowResponse {
        let response = if self.rows.len() == self.cursor {
            match self.pending.take() {
                Some(RowAction::Toggle) => RowResponse {
                    toggled: true,
                    ..Default::default()
                },
                Some(RowAction::Select) => RowResponse {
                    clicked: true,
                    ..Default::default()
                },
                None => RowResponse::default(),
            }
        } else {
            RowResponse::default()
        };

        // Paint the toggle the walk is about to apply. A click only lands once
        // the walk is over, so selection is painted as the tree has it.
        let expanded = row.toggle.map(|e| e != response.toggled);
        let selected = row.selected;

        let glyph = match expanded {
            Some(true) => "▼",
            Some(false) => "►",
            None => "",
        };
        let mut spans = vec![
            Span::raw(if selected { "● " } else { "  " }),
            Span::raw(" ".repeat(row.indent as usize)),
            Span::styled(
                format!("{:<width$}", glyph, width = row.toggle_width as usize),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if self.show_colors {
            if let Some(color) = self.ambient.background {
                spans.push(Span::styled("  ", Style::default().bg(to_color(color))));
                spans.push(Span::raw(" "));
            }
        }
        let label_style = if selected {
            Style::default().fg(Color::Green).bold()
        } else if expanded.is_some() {
            Style::default().fg(Color::Blue).bold()
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(row.label.to_string(), label_style));

        self.rows.push(PaintedRow {
            id: row.id,
            line: Line::from(spans),
        });
        response
    }
}
