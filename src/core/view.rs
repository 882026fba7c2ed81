//! 视图系统：View trait 定义
//!
//! 所有可渲染、可交互的页面和组件都实现此 trait

use super::event::InputEvent;
use crate::services::gateway::ApiRequest;
use ratatui::layout::Rect;
use ratatui::Frame;

pub trait View {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect);

    fn cursor_position(&self) -> Option<(u16, u16)> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventResult {
    Consumed,
    Ignored,
    Quit,
    /// 请求切换到另一个页面
    Navigate(Route),
    /// 请求发起一次（模拟的）API 调用
    Submit(ApiRequest),
}

impl EventResult {
    pub fn is_consumed(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, EventResult::Ignored)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, EventResult::Quit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Account,
    ForgotPassword,
    Registration,
}

impl Default for Route {
    fn default() -> Self {
        Route::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_result() {
        assert!(EventResult::Consumed.is_consumed());
        assert!(EventResult::Ignored.is_ignored());
        assert!(EventResult::Quit.is_quit());
    }

    #[test]
    fn test_route_default() {
        let route = Route::default();
        assert_eq!(route, Route::Home);
    }
}
