//! 应用壳：统一管理页面和输入分发
//!
//! 职责：
//! - 按路由持有当前页面，导航时重建目标页面
//! - 分发键盘 / 粘贴事件给当前页面
//! - 处理全局快捷键
//! - 把页面发起的请求交给模拟网关，并在 tick 时把结果送回页面

use crate::core::event::InputEvent;
use crate::core::view::{EventResult, Route, View};
use crate::services::gateway::{ApiGateway, ApiResult};
use crate::services::ConfigService;
use crate::views::chrome::{self, FOOTER_HEIGHT, NAVBAR_HEIGHT};
use crate::views::{AccountView, ForgotPasswordView, HomeView, RegistrationView};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

pub struct Shell {
    route: Route,
    home: HomeView,
    account: AccountView,
    forgot: ForgotPasswordView,
    registration: RegistrationView,
    config: ConfigService,
    gateway: ApiGateway,
}

impl Shell {
    pub fn new(config: ConfigService) -> Self {
        let code_length = config.ui().code_length;
        let gateway = ApiGateway::new(config.ui());

        Self {
            route: Route::Home,
            home: HomeView::new(),
            account: AccountView::new(),
            forgot: ForgotPasswordView::new(code_length),
            registration: RegistrationView::new(code_length),
            config,
            gateway,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// 导航即重建：目标页面总是以初始状态出现
    fn navigate(&mut self, route: Route) {
        let code_length = self.config.ui().code_length;
        match route {
            Route::Home => self.home = HomeView::new(),
            Route::Account => self.account = AccountView::new(),
            Route::ForgotPassword => self.forgot = ForgotPasswordView::new(code_length),
            Route::Registration => self.registration = RegistrationView::new(code_length),
        }
        self.route = route;
        tracing::info!(route = ?route, "navigate");
    }

    fn handle_global_key(&mut self, event: &crossterm::event::KeyEvent) -> Option<EventResult> {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(EventResult::Quit),
            _ => None,
        }
    }

    fn active_view_mut(&mut self) -> &mut dyn View {
        match self.route {
            Route::Home => &mut self.home,
            Route::Account => &mut self.account,
            Route::ForgotPassword => &mut self.forgot,
            Route::Registration => &mut self.registration,
        }
    }

    /// 轮询网关结果并送回对应页面；返回是否需要重绘
    pub fn tick(&mut self) -> bool {
        let results = self.gateway.poll_results();
        if results.is_empty() {
            return false;
        }

        for result in &results {
            match result {
                ApiResult::SignedIn { .. } | ApiResult::Registered { .. } => {
                    self.account.apply_api(result)
                }
                ApiResult::ResetCodeSent
                | ApiResult::ResetCodeVerified { .. }
                | ApiResult::ResetCodeResent
                | ApiResult::PasswordReset => self.forgot.apply_api(result),
                ApiResult::SignupCodeSent
                | ApiResult::SignupCodeVerified { .. }
                | ApiResult::SignupCodeResent => self.registration.apply_api(result),
            }
        }
        true
    }
}

impl View for Shell {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        if let InputEvent::Key(key_event) = event {
            if let Some(result) = self.handle_global_key(key_event) {
                return result;
            }
        }
        if let InputEvent::Resize(_, _) = event {
            return EventResult::Consumed;
        }

        match self.active_view_mut().handle_input(event) {
            EventResult::Navigate(route) => {
                self.navigate(route);
                EventResult::Consumed
            }
            EventResult::Submit(request) => {
                self.gateway.submit(request);
                EventResult::Consumed
            }
            other => other,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // 账户页不带导航栏和页脚，独占整个屏幕
        let body = if self.route == Route::Account {
            area
        } else {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(NAVBAR_HEIGHT),
                    Constraint::Min(0),
                    Constraint::Length(FOOTER_HEIGHT),
                ])
                .split(area);

            chrome::render_navbar(frame, chunks[0]);
            chrome::render_footer(frame, chunks[2]);
            chunks[1]
        };

        match self.route {
            Route::Home => self.home.render(frame, body),
            Route::Account => self.account.render(frame, body),
            Route::ForgotPassword => self.forgot.render(frame, body),
            Route::Registration => self.registration.render(frame, body),
        }

        if let Some((x, y)) = self.cursor_position() {
            frame.set_cursor_position((x, y));
        }
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        match self.route {
            Route::Home => None,
            Route::Account => self.account.cursor_position(),
            Route::ForgotPassword => self.forgot.cursor_position(),
            Route::Registration => self.registration.cursor_position(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::UiConfig;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::thread;
    use std::time::Duration;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn ctrl(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn fast_shell() -> Shell {
        Shell::new(ConfigService::with_ui_config(UiConfig {
            submit_delay_ms: 5,
            resend_delay_ms: 1,
            ..UiConfig::default()
        }))
    }

    #[test]
    fn test_ctrl_q_quits_from_any_route() {
        let mut shell = fast_shell();
        assert!(shell.handle_input(&ctrl('q')).is_quit());

        shell.handle_input(&key(KeyCode::Char('a')));
        assert_eq!(shell.route(), Route::Account);
        assert!(shell.handle_input(&ctrl('q')).is_quit());
    }

    #[test]
    fn test_navigation_recreates_target_view() {
        let mut shell = fast_shell();
        shell.handle_input(&key(KeyCode::Char('a')));
        assert_eq!(shell.route(), Route::Account);

        // 在登录邮箱里输入一些内容，离开后再回来应当是空白页
        shell.handle_input(&key(KeyCode::Char('x')));
        shell.handle_input(&key(KeyCode::Esc));
        assert_eq!(shell.route(), Route::Home);
        shell.handle_input(&key(KeyCode::Char('a')));
        assert_eq!(shell.account.login_email_value(), "");
    }

    #[test]
    fn test_submit_round_trip_through_gateway() {
        let mut shell = fast_shell();
        shell.handle_input(&key(KeyCode::Char('f')));
        assert_eq!(shell.route(), Route::ForgotPassword);

        for c in "a@b.co".chars() {
            shell.handle_input(&key(KeyCode::Char(c)));
        }
        shell.handle_input(&key(KeyCode::Enter));
        assert!(shell.forgot.is_submitting());

        let mut dirty = false;
        for _ in 0..200 {
            if shell.tick() {
                dirty = true;
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        assert!(dirty);
        assert!(!shell.forgot.is_submitting());
        assert_eq!(shell.forgot.step(), crate::views::ForgotStep::Otp);
    }

    #[test]
    fn test_tick_without_pending_results_is_clean() {
        let mut shell = fast_shell();
        assert!(!shell.tick());
    }

    #[test]
    fn test_sign_in_result_routes_to_account_view() {
        let mut shell = fast_shell();
        shell.handle_input(&key(KeyCode::Char('a')));

        for c in "a@b.co".chars() {
            shell.handle_input(&key(KeyCode::Char(c)));
        }
        shell.handle_input(&key(KeyCode::Down));
        shell.handle_input(&key(KeyCode::Char('p')));
        shell.handle_input(&key(KeyCode::Enter));
        assert!(shell.account.is_submitting());

        let mut dirty = false;
        for _ in 0..200 {
            if shell.tick() {
                dirty = true;
                break;
            }
            thread::sleep(Duration::from_millis(1));
        }
        assert!(dirty);
        assert!(!shell.account.is_submitting());
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_account_page_renders_without_chrome() {
        let mut shell = fast_shell();
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| shell.render(f, f.area())).unwrap();
        assert!(buffer_text(&terminal).contains(chrome::BRAND));

        // 账户页独占屏幕，没有导航栏和页脚
        shell.handle_input(&key(KeyCode::Char('a')));
        assert_eq!(shell.route(), Route::Account);
        terminal.draw(|f| shell.render(f, f.area())).unwrap();
        assert!(!buffer_text(&terminal).contains(chrome::BRAND));

        // 回到首页后导航栏恢复
        shell.handle_input(&key(KeyCode::Esc));
        assert_eq!(shell.route(), Route::Home);
        terminal.draw(|f| shell.render(f, f.area())).unwrap();
        assert!(buffer_text(&terminal).contains(chrome::BRAND));
    }
}
