use crate::PageChrome;

/// Hamburger toggle for the collapsible navigation links.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HamburgerMenu {
    open: bool,
}

impl HamburgerMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle<H: PageChrome + ?Sized>(&mut self, host: &mut H) {
        self.open = !self.open;
        host.set_menu_open(self.open);
    }

    /// A navigation link was followed; collapse the menu on small screens.
    pub fn link_followed<H: PageChrome + ?Sized>(&mut self, host: &mut H) {
        if self.open {
            self.open = false;
            host.set_menu_open(false);
        }
    }
}
