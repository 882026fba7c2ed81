//! 复选框组件（注册页的服务条款勾选）

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// 勾选行 1 行 + 错误 1 行
pub const CHECKBOX_HEIGHT: u16 = 2;

pub struct Checkbox {
    label: String,
    checked: bool,
    error: Option<&'static str>,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
            error: None,
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn set_error(&mut self, error: Option<&'static str>) {
        self.error = error;
    }

    /// Space 切换勾选，返回是否已消费
    pub fn handle_key(&mut self, key_event: &KeyEvent) -> bool {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char(' '), KeyModifiers::NONE) => {
                self.toggle();
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let mark = if self.checked { "[x] " } else { "[ ] " };
        let mark_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let line = Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(self.label.clone(), Style::default().fg(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(line), Rect::new(area.x, area.y, area.width, 1));

        if area.height >= 2 {
            if let Some(error) = self.error {
                let error_area = Rect::new(area.x, area.y + 1, area.width, 1);
                frame.render_widget(
                    Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
                    error_area,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn space() -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_toggle_with_space() {
        let mut checkbox = Checkbox::new("I agree to the terms and conditions");
        assert!(!checkbox.is_checked());

        assert!(checkbox.handle_key(&space()));
        assert!(checkbox.is_checked());

        assert!(checkbox.handle_key(&space()));
        assert!(!checkbox.is_checked());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut checkbox = Checkbox::new("terms");
        let event = KeyEvent {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        assert!(!checkbox.handle_key(&event));
        assert!(!checkbox.is_checked());
    }
}
