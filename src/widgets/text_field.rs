//! 单行文本输入框
//!
//! 表单字段组件：标签 + 输入行 + 错误提示行，
//! 支持 UTF-8 光标编辑、占位符、密码掩码与光标处粘贴

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// 标签 1 行 + 输入 1 行 + 错误 1 行
pub const FIELD_HEIGHT: u16 = 3;

const MASK_CHAR: char = '•';

pub struct TextField {
    label: String,
    placeholder: String,
    value: String,
    cursor_pos: usize,
    masked: bool,
    reveal: bool,
    error: Option<&'static str>,
    area: Option<Rect>,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: String::new(),
            value: String::new(),
            cursor_pos: 0,
            masked: false,
            reveal: false,
            error: None,
            area: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn set_error(&mut self, error: Option<&'static str>) {
        self.error = error;
    }

    pub fn is_masked(&self) -> bool {
        self.masked && !self.reveal
    }

    /// 切换密码明文显示（仅对掩码字段有意义）
    pub fn toggle_reveal(&mut self) {
        self.reveal = !self.reveal;
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_pos = 0;
        self.error = None;
    }

    fn insert_char(&mut self, c: char) {
        if self.cursor_pos >= self.value.len() {
            self.value.push(c);
        } else {
            self.value.insert(self.cursor_pos, c);
        }
        self.cursor_pos += c.len_utf8();
    }

    /// 在光标处插入粘贴文本，控制字符过滤掉
    pub fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
    }

    fn delete_backward(&mut self) {
        if self.cursor_pos == 0 {
            return;
        }

        let mut prev_pos = self.cursor_pos - 1;
        while prev_pos > 0 && !self.value.is_char_boundary(prev_pos) {
            prev_pos -= 1;
        }
        self.value.remove(prev_pos);
        self.cursor_pos = prev_pos;
    }

    fn delete_forward(&mut self) {
        if self.cursor_pos < self.value.len() {
            self.value.remove(self.cursor_pos);
        }
    }

    fn cursor_left(&mut self) {
        if self.cursor_pos > 0 {
            let mut new_pos = self.cursor_pos - 1;
            while new_pos > 0 && !self.value.is_char_boundary(new_pos) {
                new_pos -= 1;
            }
            self.cursor_pos = new_pos;
        }
    }

    fn cursor_right(&mut self) {
        if self.cursor_pos < self.value.len() {
            let mut new_pos = self.cursor_pos + 1;
            while new_pos < self.value.len() && !self.value.is_char_boundary(new_pos) {
                new_pos += 1;
            }
            self.cursor_pos = new_pos;
        }
    }

    fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    fn cursor_end(&mut self) {
        self.cursor_pos = self.value.len();
    }

    /// 处理编辑按键，返回是否已消费
    pub fn handle_key(&mut self, key_event: &KeyEvent) -> bool {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor_left();
                true
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor_right();
                true
            }
            (KeyCode::Home, KeyModifiers::NONE) => {
                self.cursor_home();
                true
            }
            (KeyCode::End, KeyModifiers::NONE) => {
                self.cursor_end();
                true
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => {
                self.delete_backward();
                true
            }
            (KeyCode::Delete, KeyModifiers::NONE) => {
                self.delete_forward();
                true
            }
            (KeyCode::Char(c), mods) if mods.is_empty() || mods == KeyModifiers::SHIFT => {
                self.insert_char(c);
                true
            }
            _ => false,
        }
    }

    /// 输入行实际展示的文本（掩码字段显示圆点）
    fn display_value(&self) -> String {
        if self.is_masked() {
            self.value.chars().map(|_| MASK_CHAR).collect()
        } else {
            self.value.clone()
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.area = Some(area);

        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let label_area = Rect::new(area.x, area.y, area.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(self.label.clone(), label_style)),
            label_area,
        );

        if area.height < 2 {
            return;
        }
        let input_area = Rect::new(area.x, area.y + 1, area.width, 1);
        let input_line = if self.value.is_empty() {
            Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            let value_style = if focused {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(self.display_value(), value_style)
        };
        frame.render_widget(Paragraph::new(input_line), input_area);

        if area.height < 3 {
            return;
        }
        if let Some(error) = self.error {
            let error_area = Rect::new(area.x, area.y + 2, area.width, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
                error_area,
            );
        }
    }

    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        let area = self.area?;
        let col = if self.is_masked() {
            // 掩码字符宽度为 1，按字符数计列
            self.value[..self.cursor_pos].chars().count()
        } else {
            self.value[..self.cursor_pos].width()
        };
        Some((area.x + col as u16, area.y + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_insert_and_value() {
        let mut field = TextField::new("Email");
        for c in "john@example.com".chars() {
            field.handle_key(&press(KeyCode::Char(c)));
        }
        assert_eq!(field.value(), "john@example.com");
    }

    #[test]
    fn test_backspace_respects_utf8_boundaries() {
        let mut field = TextField::new("Full Name");
        field.paste("héllo");
        field.handle_key(&press(KeyCode::Backspace));
        field.handle_key(&press(KeyCode::Backspace));
        field.handle_key(&press(KeyCode::Backspace));
        field.handle_key(&press(KeyCode::Backspace));
        assert_eq!(field.value(), "h");
    }

    #[test]
    fn test_cursor_editing_in_middle() {
        let mut field = TextField::new("Email");
        field.paste("jon");
        field.handle_key(&press(KeyCode::Left));
        field.handle_key(&press(KeyCode::Char('h')));
        assert_eq!(field.value(), "john");

        field.handle_key(&press(KeyCode::Home));
        field.handle_key(&press(KeyCode::Delete));
        assert_eq!(field.value(), "ohn");
    }

    #[test]
    fn test_paste_filters_control_chars() {
        let mut field = TextField::new("Email");
        field.paste("john\r\n@example.com");
        assert_eq!(field.value(), "john@example.com");
    }

    #[test]
    fn test_masked_display_and_reveal() {
        let mut field = TextField::new("Password").masked();
        field.paste("secret12");

        assert!(field.is_masked());
        assert_eq!(field.display_value(), "••••••••");

        field.toggle_reveal();
        assert!(!field.is_masked());
        assert_eq!(field.display_value(), "secret12");
    }

    #[test]
    fn test_clear_resets_value_and_error() {
        let mut field = TextField::new("Email");
        field.paste("x");
        field.set_error(Some("Please enter a valid email address."));

        field.clear();
        assert_eq!(field.value(), "");
        assert!(field.error().is_none());
    }

    #[test]
    fn test_unhandled_key_is_not_consumed() {
        let mut field = TextField::new("Email");
        assert!(!field.handle_key(&press(KeyCode::Enter)));
        assert!(!field.handle_key(&press(KeyCode::Tab)));
    }
}
