use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    AnchorTargets, IndicatorSet, PageChrome, PageLayout, PreloaderPhase, RenderTarget,
    SlideSurface, Viewport,
};

/// A mutation the widgets applied to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    IndicatorsCreated { count: usize },
    ActiveIndicator { index: usize },
    TrackOffset { offset_px: f64 },
    FooterYear { year: i32 },
    NavbarScrolled { scrolled: bool },
    MenuOpen { open: bool },
    Preloader { phase: PreloaderPhase },
    ScrollTo { top: f64 },
    PushFragment { fragment: String },
    Alert { message: String },
    Navigate { url: String },
    ContactFormReset,
}

/// In-memory page that records every effect applied to it.
///
/// Anchor positions are document coordinates; [`AnchorTargets::anchor_top`]
/// reports them relative to the current scroll position like a bounding box
/// would.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPage {
    viewport_width: u32,
    slide_widths: Vec<f64>,
    layout: PageLayout,
    anchors: HashMap<String, f64>,
    navbar_height: f64,
    scroll_y: f64,
    indicators: Vec<bool>,
    track_offset: Option<f64>,
    navbar_scrolled: bool,
    menu_open: bool,
    preloader: Option<PreloaderPhase>,
    footer_year: Option<i32>,
    location: Option<String>,
    effects: Vec<Effect>,
}

impl HeadlessPage {
    pub fn new(viewport_width: u32) -> Self {
        Self {
            viewport_width,
            ..Self::default()
        }
    }

    pub fn with_slides(mut self, widths: Vec<f64>) -> Self {
        self.slide_widths = widths;
        self
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_anchor(mut self, id: impl Into<String>, document_top: f64) -> Self {
        self.anchors.insert(id.into(), document_top);
        self
    }

    pub fn with_navbar_height(mut self, height: f64) -> Self {
        self.navbar_height = height;
        self
    }

    /// Changes the viewport and, optionally, the width every slide now renders at.
    pub fn resize(&mut self, viewport_width: u32, slide_width: Option<f64>) {
        self.viewport_width = viewport_width;
        if let Some(width) = slide_width {
            self.slide_widths.iter_mut().for_each(|w| *w = width);
        }
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y.max(0.0);
    }

    pub fn indicators(&self) -> &[bool] {
        &self.indicators
    }

    pub fn track_offset(&self) -> Option<f64> {
        self.track_offset
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.navbar_scrolled
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn preloader_phase(&self) -> Option<PreloaderPhase> {
        self.preloader
    }

    pub fn footer_year(&self) -> Option<i32> {
        self.footer_year
    }

    /// Last URL the page navigated to, or the last pushed fragment.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Drains the effects recorded since the previous call.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}

impl Viewport for HeadlessPage {
    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }
}

impl SlideSurface for HeadlessPage {
    fn carousel_present(&self) -> bool {
        self.layout.carousel
    }

    fn slide_count(&self) -> usize {
        self.slide_widths.len()
    }

    fn slide_width(&self) -> f64 {
        self.slide_widths.first().copied().unwrap_or_default()
    }
}

impl RenderTarget for HeadlessPage {
    fn apply_offset(&mut self, offset_px: f64) {
        self.track_offset = Some(offset_px);
        self.effects.push(Effect::TrackOffset { offset_px });
    }
}

impl IndicatorSet for HeadlessPage {
    fn create_indicators(&mut self, count: usize) {
        self.indicators = vec![false; count];
        self.effects.push(Effect::IndicatorsCreated { count });
    }

    fn set_active_indicator(&mut self, index: usize) {
        for (position, active) in self.indicators.iter_mut().enumerate() {
            *active = position == index;
        }
        self.effects.push(Effect::ActiveIndicator { index });
    }
}

impl AnchorTargets for HeadlessPage {
    fn anchor_top(&self, id: &str) -> Option<f64> {
        self.anchors.get(id).map(|top| top - self.scroll_y)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn navbar_height(&self) -> f64 {
        if self.layout.navbar {
            self.navbar_height
        } else {
            0.0
        }
    }
}

impl PageChrome for HeadlessPage {
    fn layout(&self) -> PageLayout {
        self.layout
    }

    fn set_footer_year(&mut self, year: i32) {
        self.footer_year = Some(year);
        self.effects.push(Effect::FooterYear { year });
    }

    fn set_navbar_scrolled(&mut self, scrolled: bool) {
        self.navbar_scrolled = scrolled;
        self.effects.push(Effect::NavbarScrolled { scrolled });
    }

    fn set_menu_open(&mut self, open: bool) {
        self.menu_open = open;
        self.effects.push(Effect::MenuOpen { open });
    }

    fn set_preloader_phase(&mut self, phase: PreloaderPhase) {
        self.preloader = Some(phase);
        self.effects.push(Effect::Preloader { phase });
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.set_scroll_y(top);
        self.effects.push(Effect::ScrollTo { top });
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.location = Some(fragment.to_string());
        self.effects.push(Effect::PushFragment {
            fragment: fragment.to_string(),
        });
    }

    fn alert(&mut self, message: &str) {
        self.effects.push(Effect::Alert {
            message: message.to_string(),
        });
    }

    fn navigate(&mut self, target: &Url) {
        self.location = Some(target.to_string());
        self.effects.push(Effect::Navigate {
            url: target.to_string(),
        });
    }

    fn reset_contact_form(&mut self) {
        self.effects.push(Effect::ContactFormReset);
    }
}
