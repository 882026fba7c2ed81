//! 分段验证码输入组件
//!
//! N 个单字符格子（默认 6），管理输入、删除、方向键与粘贴之间的焦点流转，
//! 每次缓冲区变化后检查是否填满，填满时同步触发完成回调。
//!
//! 与页面约定：非数字输入静默过滤，越界导航静默忽略，组件本身不产生错误。

use crate::core::event::InputEvent;
use crate::core::view::{EventResult, View};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const DEFAULT_LENGTH: usize = 6;

const CELL_WIDTH: u16 = 5;
const CELL_HEIGHT: u16 = 3;
const CELL_GAP: u16 = 1;

pub type CompleteCallback = Box<dyn FnMut(&str)>;

pub struct CodeInput {
    slots: Vec<Option<char>>,
    focused: usize,
    on_complete: Option<CompleteCallback>,
    completed: Option<String>,
    /// 每个格子最近一次渲染的区域，渲染时重建，组件销毁即失效
    slot_areas: Vec<Rect>,
}

impl CodeInput {
    pub fn new(length: usize) -> Self {
        let length = length.max(1);
        Self {
            slots: vec![None; length],
            focused: 0,
            on_complete: None,
            completed: None,
            slot_areas: Vec::with_capacity(length),
        }
    }

    pub fn with_on_complete(mut self, callback: CompleteCallback) -> Self {
        self.on_complete = Some(callback);
        self
    }

    pub fn set_on_complete(&mut self, callback: CompleteCallback) {
        self.on_complete = Some(callback);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// 已填入的数字按槽位顺序拼接（跳过空槽）
    pub fn value(&self) -> String {
        self.slots.iter().flatten().collect()
    }

    /// 取走最近一次完成事件携带的完整验证码
    pub fn take_completed(&mut self) -> Option<String> {
        self.completed.take()
    }

    /// 清空全部格子并把焦点移回第一格
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.focused = 0;
        self.completed = None;
    }

    /// 向第 index 格输入原始文本：过滤非数字后取最后一个字符，
    /// 成功写入且右侧还有格子时焦点右移
    pub fn type_digit(&mut self, index: usize, raw: &str) {
        if index >= self.slots.len() {
            return;
        }

        // 快速连续输入/自动填充可能一次带入多个字符，只保留最后一个数字
        let Some(digit) = raw.chars().filter(char::is_ascii_digit).next_back() else {
            return;
        };

        self.slots[index] = Some(digit);
        if index + 1 < self.slots.len() {
            self.focused = index + 1;
        }
        self.check_complete();
    }

    /// 退格：当前格为空且不是第一格时，清除前一格并左移焦点；
    /// 否则只清除当前格，焦点不动
    pub fn delete_at(&mut self, index: usize) {
        if index >= self.slots.len() {
            return;
        }

        if self.slots[index].is_none() && index > 0 {
            self.slots[index - 1] = None;
            self.focused = index - 1;
        } else {
            self.slots[index] = None;
        }
        self.check_complete();
    }

    /// 左方向键：不回绕，已在第一格时忽略
    pub fn focus_left(&mut self) {
        if self.focused > 0 {
            self.focused -= 1;
        }
    }

    /// 右方向键：不回绕，已在最后一格时忽略
    pub fn focus_right(&mut self) {
        if self.focused + 1 < self.slots.len() {
            self.focused += 1;
        }
    }

    /// 粘贴：过滤非数字、截断到 N 位后，始终从第 0 格开始覆盖写入，
    /// 未覆盖到的尾部格子保持原值；焦点落在第一个空格，全满则落在最后一格
    pub fn paste(&mut self, text: &str) {
        let digits: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(self.slots.len())
            .collect();

        if digits.is_empty() {
            return;
        }

        for (i, digit) in digits.iter().enumerate() {
            self.slots[i] = Some(*digit);
        }

        self.focused = self
            .slots
            .iter()
            .position(Option::is_none)
            .unwrap_or(self.slots.len() - 1);
        self.check_complete();
    }

    /// 每次缓冲区变化后调用：填满即同步触发回调。
    /// 按满即触发（电平触发）：清掉再填满会再次触发。
    fn check_complete(&mut self) {
        if !self.is_complete() {
            return;
        }

        let code: String = self.slots.iter().flatten().collect();
        if let Some(callback) = self.on_complete.as_mut() {
            callback(&code);
        }
        self.completed = Some(code);
    }

    fn total_width(&self) -> u16 {
        let n = self.slots.len() as u16;
        n * CELL_WIDTH + n.saturating_sub(1) * CELL_GAP
    }

    pub fn height(&self) -> u16 {
        CELL_HEIGHT
    }
}

impl Default for CodeInput {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl View for CodeInput {
    fn handle_input(&mut self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key_event) => {
                match (key_event.code, key_event.modifiers) {
                    (KeyCode::Char(c), mods)
                        if mods.is_empty() || mods == KeyModifiers::SHIFT =>
                    {
                        // 非数字字符在 type_digit 内被过滤掉
                        self.type_digit(self.focused, &c.to_string());
                        EventResult::Consumed
                    }
                    (KeyCode::Backspace, KeyModifiers::NONE) => {
                        self.delete_at(self.focused);
                        EventResult::Consumed
                    }
                    (KeyCode::Left, KeyModifiers::NONE) => {
                        self.focus_left();
                        EventResult::Consumed
                    }
                    (KeyCode::Right, KeyModifiers::NONE) => {
                        self.focus_right();
                        EventResult::Consumed
                    }
                    _ => EventResult::Ignored,
                }
            }
            InputEvent::Paste(text) => {
                self.paste(text);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // 水平居中排列 N 个格子
        let total = self.total_width().min(area.width);
        let start_x = area.x + (area.width.saturating_sub(total)) / 2;

        self.slot_areas.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            let x = start_x + i as u16 * (CELL_WIDTH + CELL_GAP);
            if x + CELL_WIDTH > area.x + area.width {
                break;
            }
            let cell = Rect::new(x, area.y, CELL_WIDTH, CELL_HEIGHT.min(area.height));
            self.slot_areas.push(cell);

            let border_style = if i == self.focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let digit = slot.map(String::from).unwrap_or_default();

            let para = Paragraph::new(Span::styled(
                digit,
                Style::default().fg(Color::White),
            ))
            .centered()
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
            frame.render_widget(para, cell);
        }
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        let cell = self.slot_areas.get(self.focused)?;
        Some((cell.x + CELL_WIDTH / 2, cell.y + 1))
    }
}
