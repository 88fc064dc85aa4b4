/// Visibility state of a diagnostic panel.
///
/// `shown` is the user's choice; `hidden` is a temporary override (e.g. the UI-hide key)
/// that leaves `shown` intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    name: String,
    id: u32,
    shown: bool,
    hidden: bool,
}

impl Window {
    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            shown: false,
            hidden: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_visible(&self) -> bool {
        self.shown && !self.hidden
    }

    pub fn toggle(&mut self) -> bool {
        self.shown = !self.shown;
        self.shown
    }

    pub fn show(&mut self) {
        self.shown = true;
    }

    pub fn unshow(&mut self) {
        self.shown = false;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn unhide(&mut self) {
        self.hidden = false;
    }
}
