//! Overlay rendering for the customer form, confirmations, and toasts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use lockerdash_core::Severity;
use lockerdash_core::form::{CustomerForm, FormField, FormMode};

use crate::app::App;

const TOAST_WIDTH: u16 = 44;

/// Rect of `width` x `height` centered in `area`, clamped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width.saturating_sub(w)) / 2,
        area.y + (area.height.saturating_sub(h)) / 2,
        w,
        h,
    )
}

const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Danger => Color::Red,
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
    }
}

fn field_line<'a>(form: &CustomerForm, field: FormField, label: &'a str, value: String) -> Line<'a> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::raw(value),
        Span::styled(cursor, Style::default().fg(Color::White)),
    ])
}

/// Draw the create/edit customer form as a centered dialog.
pub fn draw_form(frame: &mut Frame<'_>, app: &App) {
    let Some(ref form) = app.form else {
        return;
    };

    let title = match form.mode {
        FormMode::Create => " New Customer ".to_string(),
        FormMode::Edit { id } => format!(" Edit Customer #{id} "),
    };

    let mut lines = vec![
        field_line(form, FormField::Username, "Username", form.username.clone()),
        field_line(form, FormField::Email, "Email", form.email.clone()),
    ];
    let password_visible = match form.mode {
        FormMode::Create => true,
        FormMode::Edit { .. } => {
            let mark = if form.change_password { "[x]" } else { "[ ]" };
            lines.push(field_line(
                form,
                FormField::ChangePassword,
                "Password",
                format!("{mark} change password"),
            ));
            form.change_password
        }
    };
    if password_visible {
        let label = match form.mode {
            FormMode::Create => "Password",
            FormMode::Edit { .. } => "New",
        };
        lines.push(field_line(
            form,
            FormField::Password,
            label,
            "*".repeat(form.password.chars().count()),
        ));
    }
    lines.push(Line::from(""));
    if let Some(ref err) = form.error {
        lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(
            "[Enter]",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Save  "),
        Span::styled(
            "[Esc]",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Cancel"),
    ]));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(frame.area(), 56, height);
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(dialog, area);
}

/// Draw the yes/no confirmation dialog.
pub fn draw_confirm(frame: &mut Frame<'_>, app: &App) {
    let Some(ref pending) = app.confirm else {
        return;
    };

    let lines = vec![
        Line::from(pending.prompt.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "[Y]",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Yes  "),
            Span::styled(
                "[N]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" No"),
        ]),
    ];

    let width = u16::try_from(UnicodeWidthStr::width(pending.prompt.as_str()))
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .max(30);
    let area = centered(frame.area(), width, 5);
    frame.render_widget(Clear, area);
    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(dialog, area);
}

/// Stack live toasts in the top-right corner, oldest first.
pub fn draw_toasts(frame: &mut Frame<'_>, app: &App) {
    let screen = frame.area();
    let width = TOAST_WIDTH.min(screen.width);
    let x = screen.right().saturating_sub(width);
    let mut y = screen.y + 1;

    for toast in app.toasts.iter() {
        if y + 3 > screen.bottom() {
            break;
        }
        let area = Rect::new(x, y, width, 3);
        let color = severity_color(toast.severity);
        frame.render_widget(Clear, area);
        let widget = Paragraph::new(Span::styled(
            toast.message.as_str(),
            Style::default().fg(color),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(widget, area);
        y += 3;
    }
}
