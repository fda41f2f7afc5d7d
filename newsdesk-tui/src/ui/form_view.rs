use super::*;
use crate::app::{EditorState, FormField};

const LABEL_WIDTH: usize = 24;

pub fn render_form_view(frame: &mut Frame, editor: &EditorState, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(body);

    let (lines, focused_line) = form_lines(editor);

    // Keep the focused field on screen
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = (focused_line + 1).saturating_sub(visible) as u16;

    let title = match editor.target() {
        Some(record) => format!(" Edit article: {} ", record.title),
        None => " New article ".to_string(),
    };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ))
                .padding(Padding::horizontal(1)),
        )
        .scroll((scroll, 0));
    frame.render_widget(paragraph, chunks[0]);

    let footer = if editor.busy {
        Line::from(Span::styled(
            "Saving...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        key_hints(&[
            ("Tab/Shift-Tab", "Move"),
            ("Ctrl-S", "Save"),
            ("Ctrl-U", "Clear"),
            ("Esc", "Cancel"),
        ])
    };
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

/// One or more lines per field, plus the index of the focused field's first line.
fn form_lines(editor: &EditorState) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut focused_line = 0;

    for field in FormField::ALL {
        let focused = field == editor.focused;
        if focused {
            focused_line = lines.len();
        }

        let marker = if field.is_required() { "*" } else { " " };
        let label = format!("{:<width$}", format!("{}{}", field.label(), marker), width = LABEL_WIDTH);
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };

        let value = field_value(editor, field, focused);
        let mut value_lines = value.split('\n');
        let first = value_lines.next().unwrap_or_default().to_string();
        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(first, value_style),
        ]));
        for rest in value_lines {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(LABEL_WIDTH)),
                Span::styled(rest.to_string(), value_style),
            ]));
        }
    }

    (lines, focused_line)
}

fn field_value(editor: &EditorState, field: FormField, focused: bool) -> String {
    if field == FormField::Category {
        let label = editor.draft.category.label();
        return if focused {
            format!("< {} >", label)
        } else {
            label.to_string()
        };
    }

    let input = editor.input(field);
    if focused {
        let (before, after) = input.split_at_cursor();
        format!("{}█{}", before, after)
    } else {
        input.value.clone()
    }
}
