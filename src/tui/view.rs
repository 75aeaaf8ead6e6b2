// File: src/tui/view.rs
// Commits a rendered Page to the terminal frame.
use crate::page::{Button, Details, DetailsBody, FormView, InputView, NewPartyForm, Page, PartyList};
use crate::state::InputMode;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

const LABEL_WIDTH: usize = 12;

pub fn draw(f: &mut Frame, page: &Page, mode: InputMode) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(v_chunks[1]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(7)])
        .split(h_chunks[1]);

    // --- Header ---
    let title = if page.loading {
        format!("{} (Loading...)", page.title)
    } else {
        page.title.to_string()
    };
    let header = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, v_chunks[0]);

    draw_party_list(f, &page.party_list, h_chunks[0]);
    draw_details(f, &page.details, right_chunks[0]);
    draw_new_party(f, &page.new_party, right_chunks[1]);

    // --- Footer ---
    let help = match mode {
        InputMode::EditingParty => "Tab/Up/Down:Field  Enter:Save  Esc:Cancel",
        InputMode::CreatingParty => "Tab/Up/Down:Field  Enter:Add  Esc:Leave form",
        InputMode::Normal if page.party_list.focused => {
            "j/k:Move  Enter:Select  Tab:Switch Focus  r:Refresh  q:Quit"
        }
        InputMode::Normal if page.details.focused => {
            "e:Edit  d:Delete  Tab:Switch Focus  r:Refresh  q:Quit"
        }
        InputMode::Normal => "a/Enter:Fill form  Tab:Switch Focus  r:Refresh  q:Quit",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title(" Actions "));
    f.render_widget(footer, v_chunks[2]);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn draw_party_list(f: &mut Frame, list: &PartyList, area: Rect) {
    let items: Vec<ListItem> = list
        .rows
        .iter()
        .map(|row| {
            let prefix = if row.selected { ">" } else { " " };
            let style = if row.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(format!("{} {}", prefix, row.label))).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(list.rows.iter().position(|row| row.highlighted));

    let widget = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ({}) ", list.heading, list.rows.len()))
                .border_style(border_style(list.focused)),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::Blue),
        );
    f.render_stateful_widget(widget, area, &mut list_state);
}

fn draw_details(f: &mut Frame, details: &Details, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", details.heading))
        .border_style(border_style(details.focused));

    let panel = match &details.body {
        DetailsBody::Prompt(prompt) => {
            let p = Paragraph::new(*prompt)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(p, area);
            return;
        }
        DetailsBody::Party(panel) => panel,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            panel.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Date:     {}", panel.date)),
        Line::from(format!("Location: {}", panel.location)),
        Line::from(""),
        Line::from(panel.description.clone()),
        Line::from(""),
        Line::from(Span::styled(
            "Guests",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
    ];
    if panel.guests.names.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no rsvps yet)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for name in &panel.guests.names {
        lines.push(Line::from(format!("  - {}", name)));
    }

    let mut cursor = None;
    if !panel.edit_form.hidden {
        lines.push(Line::from(""));
        cursor = push_form(&mut lines, &panel.edit_form);
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        button(&panel.edit_button, "e"),
        Span::raw("  "),
        button(&panel.delete_button, "d"),
    ]));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
    place_cursor(f, area, cursor);
}

fn draw_new_party(f: &mut Frame, form: &NewPartyForm, area: Rect) {
    let mut lines = Vec::new();
    let cursor = push_form(&mut lines, &form.form);
    lines.push(Line::from(button(&form.submit, "Enter")));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", form.heading))
        .border_style(border_style(form.focused));
    f.render_widget(Paragraph::new(lines).block(block), area);
    place_cursor(f, area, cursor);
}

/// Appends one line per input. Returns the (column, row) of the active input's end.
fn push_form(lines: &mut Vec<Line<'static>>, form: &FormView) -> Option<(usize, usize)> {
    let mut cursor = None;
    for input in &form.inputs {
        if input.active {
            cursor = Some((LABEL_WIDTH + 2 + input.value.chars().count(), lines.len()));
        }
        lines.push(input_line(input));
    }
    cursor
}

fn input_line(input: &InputView) -> Line<'static> {
    let label_style = if input.active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let value = if input.value.is_empty() && !input.active {
        Span::styled(
            input.placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(input.value.clone())
    };
    Line::from(vec![
        Span::styled(
            format!("{:>width$}: ", input.label, width = LABEL_WIDTH),
            label_style,
        ),
        value,
    ])
}

fn button(button: &Button, key: &str) -> Span<'static> {
    Span::styled(
        format!("[{}] {}", key, button.label),
        Style::default().fg(Color::Green),
    )
}

fn place_cursor(f: &mut Frame, area: Rect, cursor: Option<(usize, usize)>) {
    let Some((col, row)) = cursor else {
        return;
    };
    let x = area.x + 1 + col as u16;
    let y = area.y + 1 + row as u16;
    if x < area.x + area.width.saturating_sub(1) && y < area.y + area.height.saturating_sub(1) {
        f.set_cursor_position(Position::new(x, y));
    }
}
