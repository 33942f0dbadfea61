use crate::{AnchorTargets, NavbarConfig, PageChrome};

/// Adds the "scrolled" look to the navbar once the page leaves the top.
#[derive(Debug, Clone)]
pub struct NavbarScroll {
    threshold: f64,
    scrolled: bool,
}

impl NavbarScroll {
    pub fn new(config: &NavbarConfig) -> Self {
        Self {
            threshold: config.scroll_threshold_px,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn page_scrolled<H>(&mut self, host: &mut H)
    where
        H: AnchorTargets + PageChrome + ?Sized,
    {
        let scrolled = host.scroll_y() > self.threshold;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            host.set_navbar_scrolled(scrolled);
        }
    }
}
