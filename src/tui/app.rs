//! Application state and logic.
//!
//! [`App`] wraps a [`Formulary`] with the selection, focus and editing state
//! of the terminal UI. Every keystroke in Edit mode is forwarded to the
//! selected card, which recomputes its outcome immediately.

use formulary_core::{FormulaCard, Formulary};

/// Modal editing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Select cards and fields.
    Normal,
    /// Type into the focused field.
    Edit,
}

/// The focused input of the selected card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Expression,
    /// Index into the entry's variable list.
    Variable(usize),
}

pub struct App {
    pub formulary: Formulary,
    /// Flat index of the selected card.
    pub selected: usize,
    pub field: Field,
    pub mode: Mode,
    pub edit_buffer: String,
    /// Cursor position in `edit_buffer`, in chars.
    pub edit_cursor: usize,
    pub help_modal: bool,
    pub help_scroll: u16,
    /// Hint shown beneath every result.
    pub hint: String,
    pub status_message: String,
    pub title: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(formulary: Formulary, hint: String, title: String) -> Self {
        App {
            formulary,
            selected: 0,
            field: Field::Expression,
            mode: Mode::Normal,
            edit_buffer: String::new(),
            edit_cursor: 0,
            help_modal: false,
            help_scroll: 0,
            hint,
            status_message: String::new(),
            title,
            should_quit: false,
        }
    }

    pub fn current_card(&self) -> Option<&FormulaCard> {
        self.formulary.card_at(self.selected)
    }

    fn current_card_mut(&mut self) -> Option<&mut FormulaCard> {
        self.formulary.card_at_mut(self.selected)
    }

    fn field_count(&self) -> usize {
        self.current_card()
            .map(|c| c.entry().variables.len() + 1)
            .unwrap_or(0)
    }

    fn field_index(&self) -> usize {
        match self.field {
            Field::Expression => 0,
            Field::Variable(i) => i + 1,
        }
    }

    fn set_field_index(&mut self, idx: usize) {
        self.field = if idx == 0 {
            Field::Expression
        } else {
            Field::Variable(idx - 1)
        };
    }

    pub fn select_next(&mut self) {
        let count = self.formulary.card_count();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
            self.field = Field::Expression;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.field = Field::Expression;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.field = Field::Expression;
    }

    pub fn select_last(&mut self) {
        self.selected = self.formulary.card_count().saturating_sub(1);
        self.field = Field::Expression;
    }

    pub fn focus_next(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.set_field_index((self.field_index() + 1) % count);
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.field_count();
        if count > 0 {
            self.set_field_index((self.field_index() + count - 1) % count);
        }
    }

    /// Text currently shown in a field when not editing it.
    pub fn field_text(&self, field: Field) -> String {
        let Some(card) = self.current_card() else {
            return String::new();
        };
        match field {
            Field::Expression => card.expression().to_string(),
            Field::Variable(i) => card
                .entry()
                .variables
                .get(i)
                .and_then(|v| card.value(&v.id))
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn start_edit(&mut self) {
        if self.current_card().is_none() {
            return;
        }
        self.edit_buffer = self.field_text(self.field);
        self.edit_cursor = self.edit_buffer.chars().count();
        self.mode = Mode::Edit;
        self.status_message.clear();
    }

    pub fn finish_edit(&mut self) {
        self.mode = Mode::Normal;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.edit_buffer
            .char_indices()
            .nth(self.edit_cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.edit_buffer.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.edit_buffer.insert(idx, c);
        self.edit_cursor += 1;
        self.apply_edit();
    }

    pub fn backspace(&mut self) {
        if self.edit_cursor == 0 {
            return;
        }
        self.edit_cursor -= 1;
        let idx = self.byte_index();
        self.edit_buffer.remove(idx);
        self.apply_edit();
    }

    pub fn delete(&mut self) {
        if self.edit_cursor >= self.edit_buffer.chars().count() {
            return;
        }
        let idx = self.byte_index();
        self.edit_buffer.remove(idx);
        self.apply_edit();
    }

    pub fn cursor_left(&mut self) {
        self.edit_cursor = self.edit_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.edit_cursor = (self.edit_cursor + 1).min(self.edit_buffer.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.edit_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.edit_cursor = self.edit_buffer.chars().count();
    }

    /// Push the edit buffer into the selected card.
    fn apply_edit(&mut self) {
        let field = self.field;
        let text = self.edit_buffer.clone();
        let Some(card) = self.current_card_mut() else {
            return;
        };
        let result = match field {
            Field::Expression => {
                card.edit_expression(&text);
                Ok(())
            }
            Field::Variable(i) => match card.entry().variables.get(i).map(|v| v.id.clone()) {
                Some(id) => card.edit_variable(&id, &text).map(|_| ()),
                None => Ok(()),
            },
        };
        if let Err(e) = result {
            self.status_message = format!("Error: {}", e);
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_modal = !self.help_modal;
        self.help_scroll = 0;
    }

    pub fn scroll_help_by(&mut self, delta: i32) {
        let next = (self.help_scroll as i32 + delta).max(0);
        self.help_scroll = next.min(u16::MAX as i32) as u16;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
