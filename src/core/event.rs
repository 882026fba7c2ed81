use crossterm::event::{KeyEvent, MouseEvent};

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    Paste(String),
}

impl InputEvent {
    pub fn is_key(&self) -> bool {
        matches!(self, InputEvent::Key(_))
    }

    pub fn is_paste(&self) -> bool {
        matches!(self, InputEvent::Paste(_))
    }

    pub fn as_key(&self) -> Option<&KeyEvent> {
        match self {
            InputEvent::Key(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crossterm::event::Event> for InputEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(e) => InputEvent::Key(e),
            crossterm::event::Event::Mouse(e) => InputEvent::Mouse(e),
            crossterm::event::Event::Resize(w, h) => InputEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => InputEvent::FocusGained,
            crossterm::event::Event::FocusLost => InputEvent::FocusLost,
            crossterm::event::Event::Paste(s) => InputEvent::Paste(s),
        }
    }
}
