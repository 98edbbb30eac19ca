//! UI rendering for the TUI.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::{App, Mode};
use super::surface::LineSurface;
use crate::error::PickerError;

/// Render the entire UI.
pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Tree view
            Constraint::Length(2), // Footer
        ])
        .split(frame.area());

    // The tree pass may write a new target, so it runs before the header.
    render_tree_area(app, frame, chunks[1]);
    render_header(app, frame, chunks[0]);
    render_footer(app, frame, chunks[2]);

    if app.mode == Mode::Help {
        render_help_overlay(frame);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let header_text = format!(" {}  →  {}", app.antenna_name(), app.target_label());

    let block = Block::default()
        .title(" Target Picker ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(header_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_tree_area(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let mut surface = LineSurface::new(app.cursor, app.pending.take(), app.show_colors);
    match app.picker.draw(&mut app.network, &mut surface) {
        Ok(Some(target)) => {
            let name = app.network.view().target_name(target).map(str::to_string);
            app.status_message = Some(match name {
                Some(name) => format!("Target set to {}", name),
                None => "Target cleared".to_string(),
            });

            // The click lands after its row is painted, so the pass that took it
            // still marks the old selection. Paint again from the updated tree.
            surface = LineSurface::new(app.cursor, None, app.show_colors);
            if let Err(err) = app.picker.draw(&mut app.network, &mut surface) {
                app.status_message = Some(err.to_string());
            }
        }
        Ok(None) => {}
        Err(PickerError::PickerClosed(_)) => {
            app.should_quit = true;
            return;
        }
        Err(err) => {
            app.status_message = Some(err.to_string());
        }
    }

    let rows = surface.into_rows();
    app.set_rows(rows.iter().map(|r| r.id).collect());

    let visible_height = inner_area.height as usize;

    // Calculate scroll offset to keep the cursor visible
    let scroll_offset = calculate_scroll_offset(app.cursor, visible_height, rows.len());

    for (i, row) in rows
        .into_iter()
        .skip(scroll_offset)
        .take(visible_height)
        .enumerate()
    {
        let y = inner_area.y + i as u16;
        let mut line = row.line;
        if scroll_offset + i == app.cursor {
            line = line.style(Style::default().bg(Color::DarkGray));
        }
        let row_area = Rect::new(inner_area.x, y, inner_area.width, 1);
        frame.render_widget(Paragraph::new(line), row_area);
    }
}

fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    // Rows of context kept above and below the cursor row: up to three, fewer
    // in short panes, so the body a cursor row orbits usually stays on screen.
    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected
            .saturating_sub(padding)
            .min(total.saturating_sub(visible_height))
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        Mode::Normal => {
            "[↑↓] Navigate  [Space] Toggle  [Enter] Select  [a] Add probe  [d] Remove  [?] Help  [q] Quit"
        }
        Mode::Help => "[Esc] Close",
    };

    // Show status message if present, otherwise hints
    let text = app.status_message.as_deref().unwrap_or(hints);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let help_width = 60u16.min(area.width.saturating_sub(8));
    let help_height = 20u16.min(area.height.saturating_sub(4));
    let help_area = Rect {
        x: (area.width.saturating_sub(help_width)) / 2,
        y: (area.height.saturating_sub(help_height)) / 2,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let help_text = r#"
 NAVIGATION
 ─────────────────────────────────
 ↑/k        Move up
 ↓/j        Move down
 g          Go to top
 G          Go to bottom
 Space/←/→  Expand / collapse

 TARGET
 ─────────────────────────────────
 Enter      Point the antenna here
 a          Add a probe around this body
 d          Remove this satellite

 ?          Toggle this help
 q/Esc      Quit
"#;

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, help_area);
}
