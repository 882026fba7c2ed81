//! 页面公共装饰：顶部导航栏与底部页脚

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const NAVBAR_HEIGHT: u16 = 2;
pub const FOOTER_HEIGHT: u16 = 2;

pub const BRAND: &str = "! Wallah Habibi !";
const TAGLINE: &str = "Your one-stop shop for all your needs. Quality products at affordable prices.";
const NAV_LINKS: [&str; 4] = ["All Products", "Clothing", "Electronics", "Home & Garden"];

pub fn render_navbar(frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(
            BRAND,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
    ];
    for (i, link) in NAV_LINKS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*link, Style::default().fg(Color::Gray)));
    }

    let navbar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(navbar, area);
}

pub fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(BRAND, Style::default().fg(Color::Gray)),
        Span::raw("  —  "),
        Span::styled(TAGLINE, Style::default().fg(Color::DarkGray)),
    ]))
    .centered()
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

/// 页面主体居中的卡片区域
pub fn centered_card(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_card_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let card = centered_card(area, 50, 20);
        assert_eq!(card.width, 50);
        assert_eq!(card.x, 25);
        assert_eq!(card.y, 10);
    }

    #[test]
    fn test_centered_card_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        let card = centered_card(area, 50, 20);
        assert_eq!(card.width, 30);
        assert_eq!(card.height, 10);
    }
}
