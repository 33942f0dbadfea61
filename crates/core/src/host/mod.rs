//! Interfaces the widgets expect from the page that hosts them.
//!
//! A browser binding implements these on top of the DOM; [`crate::HeadlessPage`]
//! implements them in memory.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::PreloaderPhase;

pub trait Viewport {
    /// Current display width in device-independent pixels.
    fn viewport_width(&self) -> u32;
}

/// The ordered, fixed-size set of carousel slides.
pub trait SlideSurface {
    /// Whether the slide track and its previous/next controls exist.
    fn carousel_present(&self) -> bool;

    fn slide_count(&self) -> usize;

    /// Rendered width of a slide. All slides share the width of the first.
    fn slide_width(&self) -> f64;
}

pub trait RenderTarget {
    /// Shifts the slide track left by `offset_px`.
    fn apply_offset(&mut self, offset_px: f64);
}

pub trait IndicatorSet {
    fn create_indicators(&mut self, count: usize);

    /// Marks `index` active and every other indicator inactive.
    fn set_active_indicator(&mut self, index: usize);
}

/// Everything the carousel needs from its page.
pub trait CarouselHost: Viewport + SlideSurface + RenderTarget + IndicatorSet {}

impl<T> CarouselHost for T where T: Viewport + SlideSurface + RenderTarget + IndicatorSet {}

/// Measurements used to scroll to in-page anchors.
pub trait AnchorTargets {
    /// Top edge of the element with `id`, relative to the viewport.
    fn anchor_top(&self, id: &str) -> Option<f64>;

    fn scroll_y(&self) -> f64;

    /// Height of the fixed navbar, `0.0` when the page has none.
    fn navbar_height(&self) -> f64;
}

/// Which optional page components exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Slide track plus previous/next controls.
    pub carousel: bool,
    pub navbar: bool,
    pub menu: bool,
    pub preloader: bool,
    pub contact_form: bool,
    pub footer_year: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            carousel: true,
            navbar: true,
            menu: true,
            preloader: true,
            contact_form: true,
            footer_year: true,
        }
    }
}

/// Page-level mutations outside the carousel.
pub trait PageChrome {
    fn layout(&self) -> PageLayout;

    fn set_footer_year(&mut self, year: i32);

    fn set_navbar_scrolled(&mut self, scrolled: bool);

    fn set_menu_open(&mut self, open: bool);

    fn set_preloader_phase(&mut self, phase: PreloaderPhase);

    fn smooth_scroll_to(&mut self, top: f64);

    /// Records `fragment` (including the leading `#`) in the session history.
    fn push_fragment(&mut self, fragment: &str);

    fn alert(&mut self, message: &str);

    fn navigate(&mut self, target: &Url);

    fn reset_contact_form(&mut self);
}

pub trait PageHost: CarouselHost + AnchorTargets + PageChrome {}

impl<T> PageHost for T where T: CarouselHost + AnchorTargets + PageChrome {}
