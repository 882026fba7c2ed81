//! 找回密码视图
//!
//! 四步流程：输入邮箱 → 验证码 → 重设密码 → 成功。
//! 每步提交都是模拟 API 调用，结果回流后推进步骤

use crate::core::event::InputEvent;
use crate::core::view::{EventResult, Route, View};
use crate::services::gateway::{ApiRequest, ApiResult};
use crate::services::validation;
use crate::views::chrome::centered_card;
use crate::widgets::{CodeInput, TextField, FIELD_HEIGHT};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const CARD_WIDTH: u16 = 56;
const RESENT_INFO: &str = "A new verification code has been sent to your email.";

/// Reset 步骤的字段数：新密码、确认密码
const RESET_FIELDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForgotStep {
    Email,
    Otp,
    Reset,
    Success,
}

pub struct ForgotPasswordView {
    step: ForgotStep,
    submitting: bool,
    email: TextField,
    password: TextField,
    confirm: TextField,
    code: CodeInput,
    /// Reset 步骤的字段焦点：0 新密码，1 确认密码
    focused: usize,
    info: Option<&'static str>,
}

impl ForgotPasswordView {
    pub fn new(code_length: usize) -> Self {
        Self {
            step: ForgotStep::Email,
            submitting: false,
            email: TextField::new("Email").with_placeholder("john@example.com"),
            password: TextField::new("New Password")
                .with_placeholder("••••••••")
                .masked(),
            confirm: TextField::new("Confirm Password")
                .with_placeholder("••••••••")
                .masked(),
            code: CodeInput::new(code_length),
            focused: 0,
            info: None,
        }
    }

    pub fn step(&self) -> ForgotStep {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn active_reset_field_mut(&mut self) -> &mut TextField {
        if self.focused == 0 {
            &mut self.password
        } else {
            &mut self.confirm
        }
    }

    fn submit_email(&mut self) -> EventResult {
        let email_err = validation::email_error(self.email.value());
        self.email.set_error(email_err);
        if email_err.is_some() {
            return EventResult::Consumed;
        }

        self.submitting = true;
        EventResult::Submit(ApiRequest::SendResetCode {
            email: self.email.value().to_string(),
        })
    }

    fn submit_reset(&mut self) -> EventResult {
        let password_err = validation::password_error(self.password.value());
        let confirm_err =
            validation::confirm_password_error(self.password.value(), self.confirm.value());

        self.password.set_error(password_err);
        self.confirm.set_error(confirm_err);

        if password_err.is_some() || confirm_err.is_some() {
            return EventResult::Consumed;
        }

        self.submitting = true;
        EventResult::Submit(ApiRequest::ResetPassword)
    }

    fn handle_otp_input(&mut self, event: &InputEvent) -> EventResult {
        let result = self.code.handle_input(event);

        // 验证码填满即发起校验（完成回调是电平触发的，这里一次性取走）
        if let Some(code) = self.code.take_completed() {
            self.submitting = true;
            return EventResult::Submit(ApiRequest::VerifyResetCode { code });
        }
        result
    }

    /// 网关结果回流：推进步骤并解除禁用
    pub fn apply_api(&mut self, result: &ApiResult) {
        match result {
            ApiResult::ResetCodeSent => {
                self.submitting = false;
                self.step = ForgotStep::Otp;
                self.code.reset();
            }
            ApiResult::ResetCodeVerified { .. } => {
                self.submitting = false;
                self.step = ForgotStep::Reset;
            }
            ApiResult::ResetCodeResent => {
                self.submitting = false;
                self.info = Some(RESENT_INFO);
            }
            ApiResult::PasswordReset => {
                self.submitting = false;
                self.step = ForgotStep::Success;
            }
            _ => {}
        }
    }

    fn render_email_step(&mut self, frame: &mut Frame, area: Rect) {
        let card = centered_card(area, CARD_WIDTH, 12);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut y = inner.y;
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Forgot Password",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 1;
        let description = Paragraph::new(
            "Enter your email address and we'll send you a verification code to reset your password.",
        )
        .style(Style::default().fg(Color::DarkGray))
        .wrap(ratatui::widgets::Wrap { trim: true });
        frame.render_widget(description, Rect::new(inner.x, y, inner.width, 2));
        y += 3;

        self.email
            .render(frame, Rect::new(inner.x, y, inner.width, FIELD_HEIGHT), !self.submitting);
        y += FIELD_HEIGHT + 1;

        let button = if self.submitting {
            Span::styled("Sending verification code...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("[ Continue ]", Style::default().fg(Color::Cyan))
        };
        frame.render_widget(
            Paragraph::new(button).centered(),
            Rect::new(inner.x, y, inner.width, 1),
        );

        let hint_area = Rect::new(card.x, card.y + card.height, card.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "← Esc: back to sign in",
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
                "Esc: back to email",
                Style::default().fg(Color::DarkGray),
            ))
            .centered(),
            hint_area,
        );
    }

    fn render_reset_step(&mut self, frame: &mut Frame, area: Rect) {
        let card = centered_card(area, CARD_WIDTH, 15);
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut y = inner.y;
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Reset Password",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 1;
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Create a new password for your account.",
                Style::default().fg(Color::DarkGray),
            )),
            Rect::new(inner.x, y, inner.width, 1),
        );
        y += 2;

        let submitting = self.submitting;
        let focused = self.focused;
        self.password.render(
            frame,
            Rect::new(inner.x, y, inner.width, FIELD_HEIGHT),
            !submitting && focused == 0,
        );
        y += FIELD_HEIGHT + 1;
        self.confirm.render(
            frame,
            Rect::new(inner.x, y, inner.width, FIELD_HEIGHT),
            !submitting && focused == 1,
        );
        y += FIELD_HEIGHT + 1;

        let button = if self.submitting {
            Span::styled("Resetting password...", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("[ Reset Password ]", Style::default().fg(Color::Cyan))
        };
        frame.render_widget(
            Paragraph::new(button).centered(),
            Rect::new(inner.x, y, inner.width, 1),
        );

        let hint_area = Rect::new(card.x, card.y + card.height, card.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "↑/↓: fields · Ctrl+T: show password · Enter: submit",
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
                "Password Reset Successful!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your password has been reset successfully.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
            Line::from("You can now sign in to your account with your new password."),
            Line::default(),
            Line::from(Span::styled("[ Enter: Sign In ]", Style::default().fg(Color::Cyan))),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), inner);
    }
}

impl View for ForgotPasswordView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        if let InputEvent::Key(key_event) = event {
            if key_event.code == KeyCode::Esc && key_event.modifiers == KeyModifiers::NONE {
                match self.step {
                    ForgotStep::Email => return EventResult::Navigate(Route::Account),
                    ForgotStep::Otp if !self.submitting => {
                        // 回到邮箱步骤：验证码缓冲随之废弃
                        self.step = ForgotStep::Email;
                        self.code.reset();
                        self.info = None;
                        return EventResult::Consumed;
                    }
                    ForgotStep::Success => return EventResult::Navigate(Route::Account),
                    _ => return EventResult::Consumed,
                }
            }
        }

        if self.submitting {
            return match event {
                InputEvent::Key(_) | InputEvent::Paste(_) => EventResult::Consumed,
                _ => EventResult::Ignored,
            };
        }

        match self.step {
            ForgotStep::Email => match event {
                InputEvent::Key(key_event) => {
                    if key_event.code == KeyCode::Enter
                        && key_event.modifiers == KeyModifiers::NONE
                    {
                        return self.submit_email();
                    }
                    if self.email.handle_key(key_event) {
                        EventResult::Consumed
                    } else {
                        EventResult::Ignored
                    }
                }
                InputEvent::Paste(text) => {
                    self.email.paste(text);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            ForgotStep::Otp => {
                if let InputEvent::Key(key_event) = event {
                    if key_event.code == KeyCode::Char('r')
                        && key_event.modifiers == KeyModifiers::CONTROL
                    {
                        self.submitting = true;
                        self.info = None;
                        return EventResult::Submit(ApiRequest::ResendResetCode);
                    }
                }
                self.handle_otp_input(event)
            }
            ForgotStep::Reset => match event {
                InputEvent::Key(key_event) => match (key_event.code, key_event.modifiers) {
                    (KeyCode::Down, KeyModifiers::NONE) | (KeyCode::Tab, KeyModifiers::NONE) => {
                        self.focused = (self.focused + 1) % RESET_FIELDS;
                        EventResult::Consumed
                    }
                    (KeyCode::Up, KeyModifiers::NONE) => {
                        self.focused = (self.focused + RESET_FIELDS - 1) % RESET_FIELDS;
                        EventResult::Consumed
                    }
                    (KeyCode::Enter, KeyModifiers::NONE) => self.submit_reset(),
                    (KeyCode::Char('t'), KeyModifiers::CONTROL) => {
                        self.password.toggle_reveal();
                        self.confirm.toggle_reveal();
                        EventResult::Consumed
                    }
                    _ => {
                        if self.active_reset_field_mut().handle_key(key_event) {
                            EventResult::Consumed
                        } else {
                            EventResult::Ignored
                        }
                    }
                },
                InputEvent::Paste(text) => {
                    self.active_reset_field_mut().paste(text);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            },
            ForgotStep::Success => match event {
                InputEvent::Key(key_event) if key_event.code == KeyCode::Enter => {
                    EventResult::Navigate(Route::Account)
                }
                _ => EventResult::Ignored,
            },
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        match self.step {
            ForgotStep::Email => self.render_email_step(frame, area),
            ForgotStep::Otp => self.render_otp_step(frame, area),
            ForgotStep::Reset => self.render_reset_step(frame, area),
            ForgotStep::Success => self.render_success_step(frame, area),
        }
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        if self.submitting {
            return None;
        }
        match self.step {
            ForgotStep::Email => self.email.cursor_position(),
            ForgotStep::Otp => self.code.cursor_position(),
            ForgotStep::Reset => {
                if self.focused == 0 {
                    self.password.cursor_position()
                } else {
                    self.confirm.cursor_position()
                }
            }
            ForgotStep::Success => None,
        }
    }
}
