//! Mobile keypad
//!
//! The phone-style grid: function keys on top, operators down the right,
//! and a double-width zero key.
//!
//! ```text
//! [ C ] [ ± ] [ % ] [ ÷ ]
//! [ 7 ] [ 8 ] [ 9 ] [ × ]
//! [ 4 ] [ 5 ] [ 6 ] [ - ]
//! [ 1 ] [ 2 ] [ 3 ] [ + ]
//! [    0    ] [ . ] [ = ]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::{Input, Operation};

/// Visual group of a key, used for colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Digits and the decimal point
    Number,
    /// C, ± and %
    Function,
    /// ÷ × - + and =
    Operator,
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text printed on the key
    pub label: String,
    /// Input emitted when the key is pressed
    pub action: Input,
    /// Whether the key is currently highlighted
    pub pressed: bool,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Leftmost grid column (0-indexed)
    pub col: usize,
    /// Number of columns the key covers
    pub span: usize,
}

impl KeypadButton {
    /// Creates a single-width button
    #[must_use]
    pub fn new(action: Input, row: usize, col: usize) -> Self {
        Self {
            label: action.label(),
            action,
            pressed: false,
            row,
            col,
            span: 1,
        }
    }

    /// Makes the button cover `span` columns
    #[must_use]
    pub fn wide(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Colour group of the key
    #[must_use]
    pub fn kind(&self) -> KeyKind {
        match self.action {
            Input::Digit(_) | Input::Decimal => KeyKind::Number,
            Input::Clear | Input::ToggleSign | Input::Percent => KeyKind::Function,
            Input::Operator(_) | Input::Equals => KeyKind::Operator,
        }
    }

    /// True if the button covers grid cell (`row`, `col`)
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.span
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The mobile keypad layout - a 5x4 grid
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard mobile keypad
    #[must_use]
    pub fn new() -> Self {
        let digit_rows = [[7, 8, 9], [4, 5, 6], [1, 2, 3]];
        let side_ops = [Operation::Multiply, Operation::Subtract, Operation::Add];

        let mut buttons = vec![
            KeypadButton::new(Input::Clear, 0, 0),
            KeypadButton::new(Input::ToggleSign, 0, 1),
            KeypadButton::new(Input::Percent, 0, 2),
            KeypadButton::new(Input::Operator(Operation::Divide), 0, 3),
        ];

        for (i, (digits, op)) in digit_rows.iter().zip(side_ops).enumerate() {
            let row = i + 1;
            for (col, d) in digits.iter().enumerate() {
                buttons.push(KeypadButton::new(Input::Digit(*d), row, col));
            }
            buttons.push(KeypadButton::new(Input::Operator(op), row, 3));
        }

        buttons.push(KeypadButton::new(Input::Digit(0), 4, 0).wide(2));
        buttons.push(KeypadButton::new(Input::Decimal, 4, 2));
        buttons.push(KeypadButton::new(Input::Equals, 4, 3));

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Index of the button covering grid cell (`row`, `col`)
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons.iter().position(|b| b.covers(row, col))
    }

    /// Gets the button covering grid cell (`row`, `col`)
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.index_at(row, col).and_then(|i| self.buttons.get(i))
    }

    /// Finds the button that emits `input`
    #[must_use]
    pub fn find_button(&self, input: Input) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == input)
    }

    /// Sets a button as pressed by index
    pub fn press_button(&mut self, index: usize) {
        if let Some(btn) = self.buttons.get_mut(index) {
            btn.set_pressed(true);
        }
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for `input`, releasing any other
    pub fn highlight(&mut self, input: Input) {
        self.release_all();
        if let Some(idx) = self.find_button(input) {
            self.press_button(idx);
        }
    }

    /// Index of the highlighted button, if any
    #[must_use]
    pub fn pressed_index(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.pressed)
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Converts a click position inside `area` to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border takes one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;
        if row < self.rows && col < self.cols {
            self.index_at(row, col)
        } else {
            None
        }
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    pending: Option<Operation>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self {
            keypad,
            pending: None,
        }
    }

    /// Marks the operator key that is waiting for an operand
    #[must_use]
    pub fn with_pending(mut self, pending: Option<Operation>) -> Self {
        self.pending = pending;
        self
    }

    fn style_for(&self, btn: &KeypadButton) -> Style {
        if btn.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD);
        }
        if matches!(btn.action, Input::Operator(op) if Some(op) == self.pending) {
            return Style::default()
                .fg(Color::Rgb(255, 149, 0))
                .bg(Color::White)
                .add_modifier(Modifier::BOLD);
        }
        match btn.kind() {
            KeyKind::Number => Style::default().fg(Color::White),
            KeyKind::Function => Style::default().fg(Color::Gray),
            KeyKind::Operator => Style::default()
                .fg(Color::Rgb(255, 149, 0))
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for btn in self.keypad.buttons() {
            let x = inner.x + btn.col as u16 * btn_width;
            let y = inner.y + btn.row as u16 * btn_height + btn_height / 2;
            let width = btn_width * btn.span as u16;

            let label = format!("[{}]", btn.label);
            let label_len = label.chars().count() as u16;
            if width < label_len {
                continue;
            }
            let label_x = x + (width - label_len) / 2;
            buf.set_span(label_x, y, &Span::styled(label, self.style_for(btn)), width);
        }
    }
}
