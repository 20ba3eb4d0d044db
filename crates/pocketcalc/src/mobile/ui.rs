//! Mobile skin rendering
//!
//! A narrow phone-shaped column: the display panel on top, the keypad
//! filling the middle and a one-line key hint at the bottom.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use super::app::MobileApp;
use super::keypad::KeypadWidget;

/// Title of the outer frame
pub const TITLE: &str = " PocketCalc ";

/// One-line key hint shown under the keypad
pub const HELP_LINE: &str = "0-9 . ~ % + - * / =  Esc clear  q quit";

/// Renders the mobile calculator to the frame
pub fn render(app: &MobileApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Splits the frame into display, keypad and help rows
#[must_use]
pub fn layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // Display
            Constraint::Fill(1),   // Keypad
            Constraint::Length(1), // Help
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Area the keypad occupies inside a frame of size `area`
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    layout(area)[1]
}

/// Mobile calculator widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a MobileApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator widget
    #[must_use]
    pub fn new(app: &'a MobileApp) -> Self {
        Self { app }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let display = self.app.display();
        let value_style = if self.app.state().value().is_finite() {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(
                self.app.status_line(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(display, value_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }

    fn render_keypad(&self, area: Rect, buf: &mut Buffer) {
        let state = self.app.state();
        let pending = state
            .is_awaiting_operand()
            .then(|| state.pending_operation())
            .flatten();
        KeypadWidget::new(self.app.keypad())
            .with_pending(pending)
            .render(area, buf);
    }

    fn render_help(area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(HELP_LINE, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let [display, keypad, help] = layout(area);
        self.render_display(display, buf);
        self.render_keypad(keypad, buf);
        Self::render_help(help, buf);
    }
}
