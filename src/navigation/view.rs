#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Catalog,
    About,
    Gallery,
}

/// Exactly one view is active at a time. There is no history.
#[derive(Debug, Default)]
pub struct ViewController {
    active: View,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> View {
        self.active
    }

    pub fn is_active(&self, view: View) -> bool {
        self.active == view
    }

    pub fn show(&mut self, view: View) {
        self.active = view;
    }

    /// Always the catalog, whatever was shown before the gallery.
    pub fn back(&mut self) {
        self.active = View::Catalog;
    }
}
