//! 账户页视图
//!
//! 登录 / 注册双标签页：Tab 切换标签，上下键切换字段，
//! Enter 提交前做字段校验，提交期间表单禁用

use crate::core::event::InputEvent;
use crate::core::view::{EventResult, Route, View};
use crate::services::gateway::{ApiRequest, ApiResult};
use crate::services::validation;
use crate::views::chrome::centered_card;
use crate::widgets::{TextField, FIELD_HEIGHT};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const CARD_WIDTH: u16 = 52;

/// 焦点位置 0 是标签行，1 起是表单字段
const TAB_ROW: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountTab {
    SignIn,
    Register,
}

pub struct AccountView {
    tab: AccountTab,
    focused: usize,
    submitting: bool,
    login_email: TextField,
    login_password: TextField,
    reg_name: TextField,
    reg_email: TextField,
    reg_password: TextField,
}

impl AccountView {
    pub fn new() -> Self {
        Self {
            tab: AccountTab::SignIn,
            focused: 1,
            submitting: false,
            login_email: TextField::new("Email").with_placeholder("john@example.com"),
            login_password: TextField::new("Password")
                .with_placeholder("••••••••")
                .masked(),
            reg_name: TextField::new("Full Name").with_placeholder("John Doe"),
            reg_email: TextField::new("Email").with_placeholder("john@example.com"),
            reg_password: TextField::new("Password")
                .with_placeholder("••••••••")
                .masked(),
        }
    }

    pub fn tab(&self) -> AccountTab {
        self.tab
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn login_email_value(&self) -> &str {
        self.login_email.value()
    }

    fn field_count(&self) -> usize {
        match self.tab {
            AccountTab::SignIn => 2,
            AccountTab::Register => 3,
        }
    }

    /// 仅在 focused >= 1 时调用
    fn active_field_mut(&mut self) -> &mut TextField {
        match (self.tab, self.focused) {
            (AccountTab::SignIn, 1) => &mut self.login_email,
            (AccountTab::SignIn, _) => &mut self.login_password,
            (AccountTab::Register, 1) => &mut self.reg_name,
            (AccountTab::Register, 2) => &mut self.reg_email,
            (AccountTab::Register, _) => &mut self.reg_password,
        }
    }

    fn active_field(&self) -> &TextField {
        match (self.tab, self.focused) {
            (AccountTab::SignIn, 1) => &self.login_email,
            (AccountTab::SignIn, _) => &self.login_password,
            (AccountTab::Register, 1) => &self.reg_name,
            (AccountTab::Register, 2) => &self.reg_email,
            (AccountTab::Register, _) => &self.reg_password,
        }
    }

    /// 标签行上按左右键切换标签，焦点留在标签行
    fn switch_tab(&mut self) {
        self.tab = match self.tab {
            AccountTab::SignIn => AccountTab::Register,
            AccountTab::Register => AccountTab::SignIn,
        };
        self.focused = TAB_ROW;
    }

    /// 焦点循环：标签行 → 各字段 → 标签行
    fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % (self.field_count() + 1);
    }

    fn focus_prev(&mut self) {
        let count = self.field_count() + 1;
        self.focused = (self.focused + count - 1) % count;
    }

    /// 登录/注册共用一个明文开关（对应原页面的单一 showPassword 状态）
    fn toggle_password_visibility(&mut self) {
        self.login_password.toggle_reveal();
        self.reg_password.toggle_reveal();
    }

    fn submit_sign_in(&mut self) -> EventResult {
        let email_err = validation::email_error(self.login_email.value());
        let password_err = validation::login_password_error(self.login_password.value());

        self.login_email.set_error(email_err);
        self.login_password.set_error(password_err);

        if email_err.is_some() || password_err.is_some() {
            return EventResult::Consumed;
        }

        self.submitting = true;
        EventResult::Submit(ApiRequest::SignIn {
            email: self.login_email.value().to_string(),
        })
    }

    fn submit_register(&mut self) -> EventResult {
        let name_err = validation::name_error(self.reg_name.value());
        let email_err = validation::email_error(self.reg_email.value());
        let password_err = validation::password_error(self.reg_password.value());

        self.reg_name.set_error(name_err);
        self.reg_email.set_error(email_err);
        self.reg_password.set_error(password_err);

        if name_err.is_some() || email_err.is_some() || password_err.is_some() {
            return EventResult::Consumed;
        }

        self.submitting = true;
        EventResult::Submit(ApiRequest::Register {
            name: self.reg_name.value().to_string(),
            email: self.reg_email.value().to_string(),
        })
    }

    /// 网关结果回流：提交完成后解除禁用
    pub fn apply_api(&mut self, result: &ApiResult) {
        match result {
            ApiResult::SignedIn { .. } | ApiResult::Registered { .. } => {
                self.submitting = false;
            }
            _ => {}
        }
    }

    fn render_tab_row(&self, frame: &mut Frame, area: Rect) {
        let row_focused = self.focused == TAB_ROW && !self.submitting;
        let tab_style = |active: bool| {
            if active && row_focused {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else if active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };

        let row = Line::from(vec![
            Span::styled("  Sign In  ", tab_style(self.tab == AccountTab::SignIn)),
            Span::styled("│", Style::default().fg(Color::DarkGray)),
            Span::styled(
                "  Create Account  ",
                tab_style(self.tab == AccountTab::Register),
            ),
        ]);
        frame.render_widget(Paragraph::new(row).centered(), area);
    }

    fn render_card(&mut self, frame: &mut Frame, card: Rect) {
        let (title, description, button, busy) = match self.tab {
            AccountTab::SignIn => (
                "Sign In",
                "Enter your credentials to access your account",
                "[ Sign In ]",
                "Signing in...",
            ),
            AccountTab::Register => (
                "Create Account",
                "Enter your information to get started",
                "[ Create Account ]",
                "Creating account...",
            ),
        };

        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut y = inner.y;
        frame.render_widget(
            Paragraph::new(Span::styled(
                title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 1;
        frame.render_widget(
            Paragraph::new(Span::styled(
                description,
                Style::default().fg(Color::DarkGray),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 2;

        let focused = self.focused;
        let submitting = self.submitting;
        let fields: Vec<&mut TextField> = match self.tab {
            AccountTab::SignIn => vec![&mut self.login_email, &mut self.login_password],
            AccountTab::Register => {
                vec![&mut self.reg_name, &mut self.reg_email, &mut self.reg_password]
            }
        };
        for (i, field) in fields.into_iter().enumerate() {
            let area = Rect::new(inner.x, y, inner.width, FIELD_HEIGHT);
            field.render(frame, area, !submitting && i + 1 == focused);
            y += FIELD_HEIGHT + 1;
        }

        let button_line = if self.submitting {
            Span::styled(busy, Style::default().fg(Color::Yellow))
        } else {
            Span::styled(button, Style::default().fg(Color::Cyan))
        };
        frame.render_widget(
            Paragraph::new(button_line).centered(),
            Rect::new(inner.x, y, inner.width, 1),
        );
    }
}

impl Default for AccountView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for AccountView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => {
                match (key_event.code, key_event.modifiers) {
                    (KeyCode::Esc, KeyModifiers::NONE) => {
                        return EventResult::Navigate(Route::Home)
                    }
                    (KeyCode::Char('f'), KeyModifiers::CONTROL) => {
                        return EventResult::Navigate(Route::ForgotPassword)
                    }
                    _ => {}
                }

                // 提交期间表单禁用
                if self.submitting {
                    return EventResult::Consumed;
                }

                match (key_event.code, key_event.modifiers) {
                    (KeyCode::Tab, KeyModifiers::NONE)
                    | (KeyCode::Down, KeyModifiers::NONE) => {
                        self.focus_next();
                        EventResult::Consumed
                    }
                    (KeyCode::Up, KeyModifiers::NONE) => {
                        self.focus_prev();
                        EventResult::Consumed
                    }
                    (KeyCode::Left, KeyModifiers::NONE)
                    | (KeyCode::Right, KeyModifiers::NONE)
                        if self.focused == TAB_ROW =>
                    {
                        self.switch_tab();
                        EventResult::Consumed
                    }
                    (KeyCode::Enter, KeyModifiers::NONE) => match self.tab {
                        AccountTab::SignIn => self.submit_sign_in(),
                        AccountTab::Register => self.submit_register(),
                    },
                    (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                        self.toggle_password_visibility();
                        EventResult::Consumed
                    }
                    _ => {
                        if self.focused == TAB_ROW {
                            EventResult::Ignored
                        } else if self.active_field_mut().handle_key(key_event) {
                            EventResult::Consumed
                        } else {
                            EventResult::Ignored
                        }
                    }
                }
            }
            InputEvent::Paste(text) => {
                if !self.submitting && self.focused != TAB_ROW {
                    self.active_field_mut().paste(text);
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let back = Paragraph::new(Span::styled(
            "← Esc: Back to Home",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(back, Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), 1));

        // 内部：标题 1 + 描述 1 + 空行 1 + 字段若干 + 按钮 1，外加上下边框
        let field_rows = self.field_count() as u16 * (FIELD_HEIGHT + 1);
        let card_height = field_rows + 6;
        let body = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(2));
        let card = centered_card(body, CARD_WIDTH, card_height);

        let tab_area = Rect::new(card.x, card.y.saturating_sub(1), card.width, 1);
        self.render_tab_row(frame, tab_area);
        self.render_card(frame, card);

        let hints = Paragraph::new(Span::styled(
            "Tab/↑/↓: move · ←/→ on tab row: switch tab · Enter: submit · Ctrl+T: show password · Ctrl+F: forgot password",
            Style::default().fg(Color::DarkGray),
        ))
        .centered();
        let hint_area = Rect::new(area.x, area.y + area.height.saturating_sub(1), area.width, 1);
        frame.render_widget(hints, hint_area);
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        if self.submitting || self.focused == TAB_ROW {
            return None;
        }
        self.active_field().cursor_position()
    }
}
