//! Tests for TUI rendering.

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use lockerdash_core::api::{Customer, Locker, Notification, Payment, Stats};
    use lockerdash_core::status::BadgeColor;
    use lockerdash_core::{Severity, ViewKind};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    use crate::app::App;
    use crate::sync::DashboardEvent;
    use crate::ui::{badge_color, draw};

    /// Create a `TestBackend` + `Terminal` of the given size and draw the app once.
    fn draw_app(width: u16, height: u16, app: &App) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    /// Foreground colour of the first cell where `needle` starts.
    fn color_of(terminal: &Terminal<TestBackend>, needle: &str) -> Option<Color> {
        let buf = terminal.backend().buffer();
        let text = screen_text(terminal);
        for (y, line) in text.lines().enumerate() {
            if let Some(idx) = line.find(needle) {
                // Border glyphs are multi-byte, so count cells rather than bytes.
                let x = u16::try_from(line[..idx].chars().count()).ok()?;
                let y = u16::try_from(y).ok()?;
                return Some(buf[(x, y)].fg);
            }
        }
        None
    }

    fn customer(id: i64, username: &str, active: bool) -> Customer {
        Customer {
            id,
            username: username.into(),
            email: format!("{username}@example.com"),
            active,
            role: None,
            created_at: None,
        }
    }

    #[test]
    fn render_empty_app() {
        let terminal = draw_app(100, 30, &App::default());
        let text = screen_text(&terminal);
        assert!(text.contains("Customers"));
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn render_tiny_terminal_does_not_panic() {
        let mut app = App::default();
        app.open_create_form();
        app.toasts.push("hello", Severity::Info);
        draw_app(20, 8, &app);
    }

    #[test]
    fn customer_rows_show_badge_and_actions() {
        let mut app = App::default();
        app.handle_event(DashboardEvent::Customers(Ok(vec![
            customer(1, "ann", true),
            customer(2, "bo", false),
        ])));
        let terminal = draw_app(120, 30, &app);
        let text = screen_text(&terminal);
        assert!(text.contains("ann"));
        assert!(text.contains("[Deactivate]"));
        assert!(text.contains("[Activate]"));
        assert!(text.contains("Inactive"));
        assert_eq!(color_of(&terminal, "Inactive"), Some(Color::Red));
    }

    #[test]
    fn search_hides_non_matching_rows() {
        let mut app = App::default();
        app.handle_event(DashboardEvent::Customers(Ok(vec![
            customer(1, "ann", true),
            customer(2, "bo", false),
        ])));
        app.set_query(ViewKind::Customers, "ANN".into());
        let text = screen_text(&draw_app(120, 30, &app));
        assert!(text.contains("ann@example.com"));
        assert!(!text.contains("bo@example.com"));
        assert!(text.contains("Customers (1/2)"));
    }

    #[test]
    fn occupied_locker_is_green_with_release() {
        let mut app = App::default();
        app.handle_event(DashboardEvent::Lockers(Ok(vec![Locker {
            id: Some(1),
            number: "L101".into(),
            status: "occupied".into(),
            assigned_user_name: Some("ann".into()),
        }])));
        app.switch_to(ViewKind::Lockers);
        let terminal = draw_app(120, 30, &app);
        assert!(screen_text(&terminal).contains("[Release]"));
        assert_eq!(color_of(&terminal, "occupied"), Some(Color::Green));
    }

    #[test]
    fn payment_amount_is_formatted() {
        let mut app = App::default();
        app.handle_event(DashboardEvent::Payments(Ok(vec![Payment {
            id: 3,
            user_id: Some(2),
            amount: 50.0,
            payment_date: None,
            status: "pending".into(),
        }])));
        app.switch_to(ViewKind::Payments);
        let terminal = draw_app(120, 30, &app);
        assert!(screen_text(&terminal).contains("$50.00"));
        assert_eq!(color_of(&terminal, "pending"), Some(Color::Yellow));
    }

    #[test]
    fn unknown_notification_type_is_gray() {
        let mut app = App::default();
        app.handle_event(DashboardEvent::Notifications(Ok(vec![Notification {
            id: Some(1),
            title: "Door".into(),
            message: "Locker 4 door open".into(),
            kind: "maintenance".into(),
            timestamp: "2025-03-01 10:00".into(),
        }])));
        app.switch_to(ViewKind::Notifications);
        let terminal = draw_app(140, 30, &app);
        assert_eq!(color_of(&terminal, "maintenance"), Some(Color::Gray));
    }

    #[test]
    fn stats_show_in_header() {
        let mut app = App::default();
        app.handle_event(DashboardEvent::Stats(Ok(Stats {
            users: 16,
            active_lockers: 11,
            total_lockers: 15,
            pending_payments: 5,
        })));
        let text = screen_text(&draw_app(120, 30, &app));
        assert!(text.contains("lockers: 11/15"));
        assert!(text.contains("Users (16)"));
    }

    #[test]
    fn confirm_dialog_shows_prompt() {
        let mut app = App::default();
        app.handle_event(DashboardEvent::Customers(Ok(vec![customer(1, "ann", true)])));
        app.request_toggle_active();
        let text = screen_text(&draw_app(120, 30, &app));
        assert!(text.contains("Are you sure you want to deactivate this customer?"));
        assert!(text.contains("[Y]"));
    }

    #[test]
    fn form_masks_password_and_shows_error() {
        let mut app = App::default();
        app.open_create_form();
        let form = app.form.as_mut().unwrap();
        form.password = "secret".into();
        app.submit_form();
        let text = screen_text(&draw_app(120, 30, &app));
        assert!(text.contains("New Customer"));
        assert!(text.contains("******"));
        assert!(!text.contains("secret"));
        assert!(text.contains("Username is required"));
    }

    #[test]
    fn toasts_render_with_severity_color() {
        let mut app = App::default();
        app.toasts.push("Customer created successfully", Severity::Success);
        app.toasts.push("Failed to update customer", Severity::Danger);
        let terminal = draw_app(120, 30, &app);
        assert_eq!(
            color_of(&terminal, "Customer created successfully"),
            Some(Color::Green)
        );
        assert_eq!(
            color_of(&terminal, "Failed to update customer"),
            Some(Color::Red)
        );
    }

    #[test]
    fn badge_palette() {
        assert_eq!(badge_color(BadgeColor::Primary), Color::Blue);
        assert_eq!(badge_color(BadgeColor::Secondary), Color::Gray);
    }
}
