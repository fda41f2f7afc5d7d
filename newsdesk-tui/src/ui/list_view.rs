use super::*;
use newsdesk_api::Record;
use ratatui::widgets::{List, ListItem, ListState};

pub fn list_heading(count: usize) -> String {
    format!(" Published news ({}) ", count)
}

pub fn render_list_view(frame: &mut Frame, app: &App, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(body);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            list_heading(app.lister.records.len()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1));

    if app.lister.records.is_empty() {
        let lines = if app.lister.loading && !app.lister.has_loaded() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Loading news...",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No news published yet",
                    Style::default().fg(Color::White),
                )),
                Line::from(Span::styled(
                    "Press n to create the first one",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        };
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, chunks[0]);
    } else {
        let items: Vec<ListItem> = app
            .lister
            .records
            .iter()
            .map(|record| record_card(record, app.lister.is_deleting(&record.id)))
            .collect();
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default();
        state.select(Some(app.lister.selected));
        frame.render_stateful_widget(list, chunks[0], &mut state);
    }

    let hints = key_hints(&[
        ("n", "New"),
        ("e", "Edit"),
        ("d", "Delete"),
        ("r", "Refresh"),
        ("L", "Logout"),
        ("q", "Quit"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[1]);
}

fn record_card(record: &Record, deleting: bool) -> ListItem<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let mut title = vec![Span::styled(
        record.title.clone(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if deleting {
        title.push(Span::styled("  (deleting...)", Style::default().fg(Color::Red)));
    }
    let mut lines = vec![Line::from(title)];

    if let Some(secondary) = record.secondary_line() {
        lines.push(Line::from(Span::styled(secondary.to_string(), muted)));
    }

    let mut meta = vec![Span::styled(
        record.category.clone(),
        Style::default().fg(Color::Cyan),
    )];
    for tag in &record.tags {
        meta.push(Span::styled(format!("  #{}", tag), Style::default().fg(Color::Magenta)));
    }
    meta.push(Span::styled(
        format!(
            "  |  {} views  {} clicks  {} shares",
            record.view_count, record.click_count, record.share_count
        ),
        muted,
    ));
    lines.push(Line::from(meta));

    if let Some(image) = record.cover_image() {
        lines.push(Line::from(Span::styled(format!("Image: {}", image), muted)));
    }
    lines.push(Line::from(""));

    ListItem::new(lines)
}
