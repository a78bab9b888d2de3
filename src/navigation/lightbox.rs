use std::str::FromStr;

/// Something the user can do while the lightbox is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxAction {
    Prev,
    Next,
    Close,
}

impl LightboxAction {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(Self::Close),
            "ArrowLeft" => Some(Self::Prev),
            "ArrowRight" => Some(Self::Next),
            _ => None,
        }
    }
}

impl FromStr for LightboxAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prev" => Ok(Self::Prev),
            "next" => Ok(Self::Next),
            "close" => Ok(Self::Close),
            other => Self::from_key(other).ok_or_else(|| format!("unknown action {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    index: usize,
    open: bool,
}

impl Lightbox {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self, index: usize) {
        self.index = index;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Moves by `step` with wraparound: below 0 goes to the last image, at or
    /// past the end goes to the first. No-op on an empty sequence.
    pub fn navigate(&mut self, step: isize, len: usize) {
        if len == 0 {
            return;
        }
        self.index = match self.index.checked_add_signed(step) {
            Some(next) if next < len => next,
            Some(_) => 0,
            None if step < 0 => len - 1,
            None => 0,
        };
    }

    /// Applies a user action. Ignored while closed.
    pub fn apply(&mut self, action: LightboxAction, len: usize) {
        if !self.open {
            return;
        }
        match action {
            LightboxAction::Prev => self.navigate(-1, len),
            LightboxAction::Next => self.navigate(1, len),
            LightboxAction::Close => self.close(),
        }
    }

    pub fn current<'a>(&self, images: &'a [String]) -> Option<&'a str> {
        images.get(self.index).map(String::as_str)
    }
}
