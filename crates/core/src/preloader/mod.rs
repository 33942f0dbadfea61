use serde::{Deserialize, Serialize};

use crate::{PageChrome, PreloaderConfig, TimerHandle, TimerService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreloaderPhase {
    Visible,
    FadingOut,
    /// Hidden for good and the body no longer in its loading state.
    Removed,
}

/// Keeps the loading screen up until the page has loaded *and* a minimum
/// display time has passed, whichever comes last.
#[derive(Debug)]
pub struct Preloader {
    config: PreloaderConfig,
    present: bool,
    page_loaded: bool,
    min_elapsed: bool,
    phase: PreloaderPhase,
    pending: Option<TimerHandle>,
}

impl Preloader {
    /// Starts the minimum display countdown. A page without a preloader
    /// element still tracks readiness but never touches the host.
    pub fn start<T>(config: PreloaderConfig, present: bool, timer: &mut T) -> Self
    where
        T: TimerService + ?Sized,
    {
        let pending = Some(timer.schedule_once(config.min_display()));
        Self {
            config,
            present,
            page_loaded: false,
            min_elapsed: false,
            phase: PreloaderPhase::Visible,
            pending,
        }
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    pub fn page_loaded<H, T>(&mut self, host: &mut H, timer: &mut T)
    where
        H: PageChrome + ?Sized,
        T: TimerService + ?Sized,
    {
        self.page_loaded = true;
        self.hide_if_ready(host, timer);
    }

    /// Returns `false` if `handle` belongs to someone else.
    pub fn on_timer<H, T>(&mut self, host: &mut H, timer: &mut T, handle: TimerHandle) -> bool
    where
        H: PageChrome + ?Sized,
        T: TimerService + ?Sized,
    {
        if self.pending != Some(handle) {
            return false;
        }
        self.pending = None;
        match self.phase {
            PreloaderPhase::Visible => {
                self.min_elapsed = true;
                self.hide_if_ready(host, timer);
            }
            PreloaderPhase::FadingOut => {
                self.phase = PreloaderPhase::Removed;
                host.set_preloader_phase(PreloaderPhase::Removed);
                tracing::debug!("preloader removed");
            }
            PreloaderPhase::Removed => {}
        }
        true
    }

    fn hide_if_ready<H, T>(&mut self, host: &mut H, timer: &mut T)
    where
        H: PageChrome + ?Sized,
        T: TimerService + ?Sized,
    {
        if self.phase != PreloaderPhase::Visible || !(self.page_loaded && self.min_elapsed) {
            return;
        }
        if !self.present {
            self.phase = PreloaderPhase::Removed;
            return;
        }
        self.phase = PreloaderPhase::FadingOut;
        host.set_preloader_phase(PreloaderPhase::FadingOut);
        self.pending = Some(timer.schedule_once(self.config.fade_out()));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{Effect, HeadlessPage, ManualTimer};

    fn run(preloader: &mut Preloader, page: &mut HeadlessPage, timer: &mut ManualTimer, ms: u64) {
        let deadline = timer.now() + Duration::from_millis(ms);
        while let Some(handle) = timer.fire_next(deadline) {
            preloader.on_timer(page, timer, handle);
        }
        timer.settle(deadline);
    }

    #[test]
    fn waits_for_minimum_display_time() {
        let mut page = HeadlessPage::new(1024);
        let mut timer = ManualTimer::new();
        let mut preloader = Preloader::start(PreloaderConfig::default(), true, &mut timer);

        run(&mut preloader, &mut page, &mut timer, 200);
        preloader.page_loaded(&mut page, &mut timer);
        assert_eq!(preloader.phase(), PreloaderPhase::Visible);

        run(&mut preloader, &mut page, &mut timer, 2_800);
        assert_eq!(preloader.phase(), PreloaderPhase::FadingOut);
        run(&mut preloader, &mut page, &mut timer, 499);
        assert_eq!(preloader.phase(), PreloaderPhase::FadingOut);
        run(&mut preloader, &mut page, &mut timer, 1);
        assert_eq!(page.preloader_phase(), Some(PreloaderPhase::Removed));
    }

    #[test]
    fn waits_for_page_load() {
        let mut page = HeadlessPage::new(1024);
        let mut timer = ManualTimer::new();
        let mut preloader = Preloader::start(PreloaderConfig::default(), true, &mut timer);

        run(&mut preloader, &mut page, &mut timer, 10_000);
        assert_eq!(preloader.phase(), PreloaderPhase::Visible);

        preloader.page_loaded(&mut page, &mut timer);
        run(&mut preloader, &mut page, &mut timer, 500);
        assert_eq!(
            page.take_effects(),
            vec![
                Effect::Preloader {
                    phase: PreloaderPhase::FadingOut
                },
                Effect::Preloader {
                    phase: PreloaderPhase::Removed
                },
            ]
        );
    }

    #[test]
    fn absent_preloader_touches_nothing() {
        let mut page = HeadlessPage::new(1024);
        let mut timer = ManualTimer::new();
        let mut preloader = Preloader::start(PreloaderConfig::default(), false, &mut timer);

        preloader.page_loaded(&mut page, &mut timer);
        run(&mut preloader, &mut page, &mut timer, 5_000);
        assert_eq!(preloader.phase(), PreloaderPhase::Removed);
        assert!(page.take_effects().is_empty());
        assert_eq!(timer.pending(), 0);
    }
}
