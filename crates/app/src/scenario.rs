use std::{collections::HashMap, fs, path::Path, time::Duration};

use page_widgets_core::{AppConfig, Effect, HeadlessPage, Page, PageEvent, PageLayout, Result};
use serde::{Deserialize, Serialize};

/// A page description plus the interactions to replay against it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub viewport_width: u32,
    #[serde(default)]
    pub slides: Vec<f64>,
    #[serde(default)]
    pub layout: PageLayout,
    #[serde(default)]
    pub navbar_height: f64,
    /// Document offsets of the in-page link targets, keyed by element id.
    #[serde(default)]
    pub anchors: HashMap<String, f64>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Advance {
        ms: u64,
    },
    Resize {
        width: u32,
        #[serde(default)]
        slide_width: Option<f64>,
    },
    Scroll {
        y: f64,
    },
    Event {
        event: PageEvent,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub elapsed_ms: u128,
    pub current_slide: Option<usize>,
    pub effects: Vec<Effect>,
}

impl Scenario {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn build_page(&self) -> HeadlessPage {
        self.anchors.iter().fold(
            HeadlessPage::new(self.viewport_width)
                .with_slides(self.slides.clone())
                .with_layout(self.layout)
                .with_navbar_height(self.navbar_height),
            |page, (id, top)| page.with_anchor(id.clone(), *top),
        )
    }

    /// Boots the page and replays every step. Report 0 covers the boot itself.
    pub fn run(&self, config: AppConfig, year: i32) -> Result<Vec<StepReport>> {
        let mut page = Page::boot(self.build_page(), config, year)?;
        let mut reports = vec![report(&mut page, 0)];

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::Advance { ms } => page.advance(Duration::from_millis(*ms)),
                Step::Resize { width, slide_width } => {
                    page.host_mut().resize(*width, *slide_width);
                    page.dispatch(PageEvent::Resize);
                }
                Step::Scroll { y } => {
                    page.host_mut().set_scroll_y(*y);
                    page.dispatch(PageEvent::Scroll);
                }
                Step::Event { event } => page.dispatch(event.clone()),
            }
            reports.push(report(&mut page, index + 1));
        }
        Ok(reports)
    }
}

fn report(page: &mut Page<HeadlessPage>, step: usize) -> StepReport {
    StepReport {
        step,
        elapsed_ms: page.elapsed().as_millis(),
        current_slide: page.carousel().current_index(),
        effects: page.host_mut().take_effects(),
    }
}
