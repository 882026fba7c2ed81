//! 首页视图
//!
//! 静态的商店首页：促销横幅、分类格子、精选商品与按键提示

use crate::core::event::InputEvent;
use crate::core::view::{EventResult, Route, View};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const HERO_TITLE: &str = "Summer Collection 2025";
const HERO_TAGLINE: &str =
    "Discover our latest products with amazing deals and discounts for the summer season.";
const CATEGORIES: [&str; 4] = ["Clothing", "Electronics", "Home & Garden", "Beauty"];

pub struct HomeView;

impl HomeView {
    pub fn new() -> Self {
        Self
    }

    fn render_hero(&self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                HERO_TITLE,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                HERO_TAGLINE,
                Style::default().fg(Color::Gray),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("[ Shop Now ]", Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::styled("[ View Deals ]", Style::default().fg(Color::DarkGray)),
            ]),
        ];
        let hero = Paragraph::new(lines)
            .centered()
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(hero, area);
    }

    fn render_categories(&self, frame: &mut Frame, area: Rect) {
        let title_area = Rect::new(area.x, area.y, area.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Shop by Category",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .centered(),
            title_area,
        );

        let grid = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1));
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(grid);

        for (cell, category) in cells.iter().zip(CATEGORIES) {
            let block = Paragraph::new(Span::styled(category, Style::default().fg(Color::Gray)))
                .centered()
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(block, *cell);
        }
    }

    fn render_products(&self, frame: &mut Frame, area: Rect) {
        let title_area = Rect::new(area.x, area.y, area.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Featured Products",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .centered(),
            title_area,
        );

        let grid = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(1));
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(grid);

        for (cell, product) in cells.iter().zip(1..=4) {
            let lines = vec![
                Line::from(Span::styled(
                    format!("Product Name {product}"),
                    Style::default().fg(Color::White),
                )),
                Line::from(Span::styled("Category", Style::default().fg(Color::DarkGray))),
                Line::from(vec![
                    Span::styled("$99.99", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled("[Add to Cart]", Style::default().fg(Color::Cyan)),
                ]),
            ];
            let card = Paragraph::new(lines)
                .centered()
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(card, *cell);
        }
    }
}

impl Default for HomeView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for HomeView {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        let InputEvent::Key(key_event) = event else {
            return EventResult::Ignored;
        };

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('a'), KeyModifiers::NONE) => EventResult::Navigate(Route::Account),
            (KeyCode::Char('r'), KeyModifiers::NONE) => EventResult::Navigate(Route::Registration),
            (KeyCode::Char('f'), KeyModifiers::NONE) => {
                EventResult::Navigate(Route::ForgotPassword)
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(5),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_hero(frame, chunks[0]);
        self.render_categories(frame, chunks[1]);
        self.render_products(frame, chunks[2]);

        let hints = Paragraph::new(Span::styled(
            "a: sign in · r: create account · f: forgot password · Ctrl+Q: quit",
            Style::default().fg(Color::DarkGray),
        ))
        .centered();
        frame.render_widget(hints, chunks[3]);
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

    #[test]
    fn test_navigation_keys() {
        let mut home = HomeView::new();
        assert_eq!(
            home.handle_input(&key(KeyCode::Char('a'))),
            EventResult::Navigate(Route::Account)
        );
        assert_eq!(
            home.handle_input(&key(KeyCode::Char('r'))),
            EventResult::Navigate(Route::Registration)
        );
        assert_eq!(
            home.handle_input(&key(KeyCode::Char('f'))),
            EventResult::Navigate(Route::ForgotPassword)
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut home = HomeView::new();
        assert!(home.handle_input(&key(KeyCode::Enter)).is_ignored());
        assert!(home.handle_input(&key(KeyCode::Char('x'))).is_ignored());
    }
}
