//! souk 入口：终端初始化、事件循环与退出时的终端恢复

use std::io;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use souk::app::Shell;
use souk::core::event::InputEvent;
use souk::core::view::View;
use souk::logging;
use souk::services::ConfigService;

/// 退出或 panic 时尽量把终端恢复原样
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::SetCursorStyle::BlinkingBar
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableBracketedPaste,
            cursor::SetCursorStyle::DefaultUserShape
        );
    }
}

fn main() -> io::Result<()> {
    let _logging = logging::init();
    let config = ConfigService::load_or_default();
    let tick_rate = Duration::from_millis(config.ui().tick_rate_ms);

    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut shell = Shell::new(config);
    let mut dirty = true;

    loop {
        if dirty {
            terminal.draw(|f| shell.render(f, f.area()))?;
            dirty = false;
        }

        if event::poll(tick_rate)? {
            let input = InputEvent::from(event::read()?);
            let result = shell.handle_input(&input);
            if result.is_quit() {
                break;
            }
            if result.is_consumed() {
                dirty = true;
            }
        }

        // 网关结果到达时也要重绘
        if shell.tick() {
            dirty = true;
        }
    }

    Ok(())
}
