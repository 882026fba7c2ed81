//! 注册页视图
//!
//! 三步流程：填写资料（含服务条款勾选）→ 邮箱验证码 → 成功

use crate::core::event::InputEvent;
use crate::core::view::{EventResult, Route, View};
use crate::services::gateway::{ApiRequest, ApiResult};
use crate::services::validation;
use crate::views::chrome::centered_card;
use crate::widgets::{Checkbox, CodeInput, TextField, CHECKBOX_HEIGHT, FIELD_HEIGHT};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const CARD_WIDTH: u16 = 56;
const RESENT_INFO: &str = "A new verification code has been sent to your email.";

/// 表单步骤的焦点顺序：姓名、邮箱、密码、条款
const FORM_FIELDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    Form,
    Otp,
    Success,
}

pub struct RegistrationView {
    step: RegistrationStep,
    submitting: bool,
    name: TextField,
    email: TextField,
    password: TextField,
    terms: Checkbox,
    code: CodeInput,
    focused: usize,
    info: Option<&'static str>,
}

impl RegistrationView {
    pub fn new(code_length: usize) -> Self {
        Self {
            step: RegistrationStep::Form,
            submitting: false,
            name: TextField::new("Full Name").with_placeholder("John Doe"),
            email: TextField::new("Email").with_placeholder("john@example.com"),
            password: TextField::new("Password")
                .with_placeholder("••••••••")
                .masked(),
            terms: Checkbox::new("I agree to the terms and conditions"),
            code: CodeInput::new(code_length),
            focused: 0,
            info: None,
        }
    }

    pub fn step(&self) -> RegistrationStep {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn submit_form(&mut self) -> EventResult {
        let name_err = validation::name_error(self.name.value());
        let email_err = validation::email_error(self.email.value());
        let password_err = validation::password_error(self.password.value());
        let terms_err = validation::terms_error(self.terms.is_checked());

        self.name.set_error(name_err);
        self.email.set_error(email_err);
        self.password.set_error(password_err);
        self.terms.set_error(terms_err);

        if name_err.is_some()
            || email_err.is_some()
            || password_err.is_some()
            || terms_err.is_some()
        {
            return EventResult::Consumed;
        }

        self.submitting = true;
        EventResult::Submit(ApiRequest::SendSignupCode {
            email: self.email.value().to_string(),
        })
    }

    fn handle_form_key(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => match (key_event.code, key_event.modifiers) {
                (KeyCode::Down, KeyModifiers::NONE) | (KeyCode::Tab, KeyModifiers::NONE) => {
                    self.focused = (self.focused + 1) % FORM_FIELDS;
                    EventResult::Consumed
                }
                (KeyCode::Up, KeyModifiers::NONE) => {
                    self.focused = (self.focused + FORM_FIELDS - 1) % FORM_FIELDS;
                    EventResult::Consumed
                }
                (KeyCode::Enter, KeyModifiers::NONE) => self.submit_form(),
                (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                    self.password.toggle_reveal();
                    EventResult::Consumed
                }
                _ => {
                    let consumed = match self.focused {
                        0 => self.name.handle_key(key_event),
                        1 => self.email.handle_key(key_event),
                        2 => self.password.handle_key(key_event),
                        _ => self.terms.handle_key(key_event),
                    };
                    if consumed {
                        EventResult::Consumed
                    } else {
                        EventResult::Ignored
                    }
                }
            },
            InputEvent::Paste(text) => {
                match self.focused {
                    0 => self.name.paste(text),
                    1 => self.email.paste(text),
                    2 => self.password.paste(text),
                    _ => {}
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_otp_input(&mut self, event: &InputEvent) -> EventResult {
        if let InputEvent::Key(key_event) = event {
            if key_event.code == KeyCode::Char('r')
                && key_event.modifiers == KeyModifiers::CONTROL
            {
                self.submitting = true;
                self.info = None;
                return EventResult::Submit(ApiRequest::ResendSignupCode);
            }
        }

        let result = self.code.handle_input(event);
        if let Some(code) = self.code.take_completed() {
            self.submitting = true;
            return EventResult::Submit(ApiRequest::VerifySignupCode { code });
        }
        result
    }

    /// 网关结果回流：推进步骤并解除禁用
    pub fn apply_api(&mut self, result: &ApiResult) {
        match result {
            ApiResult::SignupCodeSent => {
                self.submitting = false;
                self.step = RegistrationStep::Otp;
                self.code.reset();
            }
            ApiResult::SignupCodeVerified { .. } => {
                self.submitting = false;
                self.step = RegistrationStep::Success;
            }
            ApiResult::SignupCodeResent => {
                self.submitting = false;
                self.info = Some(RESENT_INFO);
            }
            _ => {}
        }
    }

    fn render_form_step(&mut self, frame: &mut Frame, area: Rect) {
        let field_rows = 3 * (FIELD_HEIGHT + 1) + CHECKBOX_HEIGHT + 1;
        let card = centered_card(area, CARD_WIDTH, field_rows + 6);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut y = inner.y;
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Create an account",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 1;
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Enter your information to get started.",
                Style::default().fg(Color::DarkGray),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 2;

        let submitting = self.submitting;
        let focused = self.focused;
        self.name.render(
            frame,
            Rect::new(inner.x, y, inner.width, FIELD_HEIGHT),
            !submitting && focused == 0,
        );
        y += FIELD_HEIGHT + 1;
        self.email.render(
            frame,
            Rect::new(inner.x, y, inner.width, FIELD_HEIGHT),
            !submitting && focused == 1,
        );
        y += FIELD_HEIGHT + 1;
        self.password.render(
            frame,
            Rect::new(inner.x, y, inner.width, FIELD_HEIGHT),
            !submitting && focused == 2,
        );
        y += FIELD_HEIGHT + 1;
        self.terms.render(
            frame,
            Rect::new(inner.x, y, inner.width, CHECKBOX_HEIGHT),
            !submitting && focused == 3,
        );
        y += CHECKBOX_HEIGHT + 1;

        let button = if self.submitting {
            Span::styled("Sending verification code...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("[ Continue → ]", Style::default().fg(Color::Cyan))
        };
        frame.render_widget(
            Paragraph::new(button).centered(),
            Rect::new(inner.x, y, inner.width, 1),
        );

        let hint_area = Rect::new(card.x, card.y + card.height, card.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Already have an account? Ctrl+S: sign in · Esc: home",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
            hint_area,
        );
    }

    fn render_otp_step(&mut self, frame: &mut Frame, area: Rect) {
        let card = centered_card(area, CARD_WIDTH, 14);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut y = inner.y;
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Verify your email",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 1;
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    "We've sent a verification code to ",
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    self.email.value().to_string(),
                    Style::default().fg(Color::White),
                ),
            ])),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 2;

        frame.render_widget(
            Paragraph::new("Enter verification code").centered(),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 1;
        let code_area = Rect::new(inner.x, y, inner.width, self.code.height());
        self.code.render(frame, code_area);
        y += self.code.height() + 1;

        let status = if self.submitting {
            Span::styled("Verifying...", Style::default().fg(Color::Yellow))
        } else if let Some(info) = self.info {
            Span::styled(info, Style::default().fg(Color::Green))
        } else {
            Span::styled(
                "Didn't receive a code? Ctrl+R: resend",
                Style::default().fg(Color::DarkGray),
            )
        };
        frame.render_widget(
            Paragraph::new(status).centered(),
            Rect::new(inner.x, y, inner.width, 1),
        );

        let hint_area = Rect::new(card.x, card.y + card.height, card.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Esc: back to registration",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
            hint_area,
        );
    }

    fn render_success_step(&mut self, frame: &mut Frame, area: Rect) {
        let card = centered_card(area, CARD_WIDTH, 9);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let lines = vec![
            Line::from(Span::styled("✓", Style::default().fg(Color::Green))),
            Line::from(Span::styled(
                "Registration Successful!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your account has been created successfully.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from(format!(
                "Thank you for registering, {}. You can now sign in to your account.",
                self.name.value()
            )),
            Line::default(),
            Line::from(Span::styled("[ Enter: Sign In ]", Style::default().fg(Color::Cyan))),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), inner);
    }
}

impl View for RegistrationView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        if let InputEvent::Key(key_event) = event {
            match (key_event.code, key_event.modifiers) {
                (KeyCode::Esc, KeyModifiers::NONE) => match self.step {
                    RegistrationStep::Form => return EventResult::Navigate(Route::Home),
                    RegistrationStep::Otp if !self.submitting => {
                        // 回到表单步骤：验证码缓冲随之废弃
                        self.step = RegistrationStep::Form;
                        self.code.reset();
                        self.info = None;
                        return EventResult::Consumed;
                    }
                    RegistrationStep::Success => {
                        return EventResult::Navigate(Route::Account)
                    }
                    _ => return EventResult::Consumed,
                },
                (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
                    return EventResult::Navigate(Route::Account)
                }
                _ => {}
            }
        }

        if self.submitting {
            return match event {
                InputEvent::Key(_) | InputEvent::Paste(_) => EventResult::Consumed,
                _ => EventResult::Ignored,
            };
        }

        match self.step {
            RegistrationStep::Form => self.handle_form_key(event),
            RegistrationStep::Otp => self.handle_otp_input(event),
            RegistrationStep::Success => match event {
                InputEvent::Key(key_event) if key_event.code == KeyCode::Enter => {
                    EventResult::Navigate(Route::Account)
                }
                _ => EventResult::Ignored,
            },
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.step {
            RegistrationStep::Form => self.render_form_step(frame, area),
            RegistrationStep::Otp => self.render_otp_step(frame, area),
            RegistrationStep::Success => self.render_success_step(frame, area),
        }
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        if self.submitting {
            return None;
        }
        match self.step {
            RegistrationStep::Form => match self.focused {
                0 => self.name.cursor_position(),
                1 => self.email.cursor_position(),
                2 => self.password.cursor_position(),
                _ => None,
            },
            RegistrationStep::Otp => self.code.cursor_position(),
            RegistrationStep::Success => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_text(view: &mut RegistrationView, text: &str) {
        for c in text.chars() {
            view.handle_input(&key(KeyCode::Char(c)));
        }
    }

    fn filled_form() -> RegistrationView {
        let mut view = RegistrationView::new(6);
        type_text(&mut view, "John Doe");
        view.handle_input(&key(KeyCode::Down));
        type_text(&mut view, "john@example.com");
        view.handle_input(&key(KeyCode::Down));
        type_text(&mut view, "abcd1234");
        view.handle_input(&key(KeyCode::Down));
        view.handle_input(&key(KeyCode::Char(' ')));
        view
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let mut view = RegistrationView::new(6);
        type_text(&mut view, "John Doe");
        view.handle_input(&key(KeyCode::Down));
        type_text(&mut view, "john@example.com");
        view.handle_input(&key(KeyCode::Down));
        type_text(&mut view, "abcd1234");

        assert_eq!(view.handle_input(&key(KeyCode::Enter)), EventResult::Consumed);
        assert_eq!(
            view.terms.error(),
            Some("You must agree to the terms and conditions.")
        );
    }

    #[test]
    fn test_valid_form_sends_signup_code() {
        let mut view = filled_form();

        let result = view.handle_input(&key(KeyCode::Enter));
        assert_eq!(
            result,
            EventResult::Submit(ApiRequest::SendSignupCode {
                email: "john@example.com".to_string()
            })
        );
        assert!(view.is_submitting());

        view.apply_api(&ApiResult::SignupCodeSent);
        assert_eq!(view.step(), RegistrationStep::Otp);
        assert!(!view.is_submitting());
    }

    #[test]
    fn test_otp_completion_verifies_and_advances() {
        let mut view = filled_form();
        view.handle_input(&key(KeyCode::Enter));
        view.apply_api(&ApiResult::SignupCodeSent);

        let mut result = EventResult::Ignored;
        for c in "654321".chars() {
            result = view.handle_input(&key(KeyCode::Char(c)));
        }
        assert_eq!(
            result,
            EventResult::Submit(ApiRequest::VerifySignupCode {
                code: "654321".to_string()
            })
        );

        view.apply_api(&ApiResult::SignupCodeVerified {
            code: "654321".to_string(),
        });
        assert_eq!(view.step(), RegistrationStep::Success);
    }

    #[test]
    fn test_space_toggles_terms_only_when_focused() {
        let mut view = RegistrationView::new(6);
        view.handle_input(&key(KeyCode::Char(' ')));
        assert!(!view.terms.is_checked());
        assert_eq!(view.name.value(), " ");

        view.handle_input(&key(KeyCode::Up));
        view.handle_input(&key(KeyCode::Char(' ')));
        assert!(view.terms.is_checked());
    }

    #[test]
    fn test_escape_from_otp_returns_to_form() {
        let mut view = filled_form();
        view.handle_input(&key(KeyCode::Enter));
        view.apply_api(&ApiResult::SignupCodeSent);
        type_text(&mut view, "12");

        view.handle_input(&key(KeyCode::Esc));
        assert_eq!(view.step(), RegistrationStep::Form);
        // 表单内容保留，验证码缓冲被废弃
        assert_eq!(view.name.value(), "John Doe");
        assert!(view.code.is_empty());
    }

    #[test]
    fn test_success_mentions_registrant_name() {
        let mut view = filled_form();
        view.handle_input(&key(KeyCode::Enter));
        view.apply_api(&ApiResult::SignupCodeSent);
        view.handle_input(&InputEvent::Paste("111111".to_string()));
        view.apply_api(&ApiResult::SignupCodeVerified {
            code: "111111".to_string(),
        });

        assert_eq!(view.step(), RegistrationStep::Success);
        assert_eq!(
            view.handle_input(&key(KeyCode::Enter)),
            EventResult::Navigate(Route::Account)
        );
    }
}
