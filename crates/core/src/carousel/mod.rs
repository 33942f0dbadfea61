use std::time::Duration;

use crate::{CarouselConfig, CarouselHost, TimerHandle, TimerService};

/// Maps any signed index onto `0..len`. `len` must be non-zero.
pub fn wrap_index(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

/// Navigation state of a mounted carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    current: usize,
    items_per_view: usize,
}

impl CarouselState {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn items_per_view(&self) -> usize {
        self.items_per_view
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Autoplay {
    Running(TimerHandle),
    /// Suspended while the pointer is over the carousel.
    Paused,
}

#[derive(Debug)]
struct Mounted {
    state: CarouselState,
    autoplay: Autoplay,
}

/// Slide carousel with indicator dots and hover-aware autoplay.
///
/// The controller owns only its state. The page and the timer service are
/// passed into each operation, so the same controller can be driven by a
/// browser binding or by [`crate::HeadlessPage`] in tests. A controller
/// mounted on a page without slides or controls stays inactive and ignores
/// every call.
#[derive(Debug)]
pub struct CarouselController {
    config: CarouselConfig,
    mounted: Option<Mounted>,
}

impl CarouselController {
    /// Builds the indicators, renders the first slide and starts autoplay.
    pub fn mount<H, T>(config: CarouselConfig, host: &mut H, timer: &mut T) -> Self
    where
        H: CarouselHost + ?Sized,
        T: TimerService + ?Sized,
    {
        let len = host.slide_count();
        if len == 0 || !host.carousel_present() {
            tracing::debug!(slides = len, "carousel not found, staying inactive");
            return Self {
                config,
                mounted: None,
            };
        }

        host.create_indicators(len);
        host.set_active_indicator(0);

        let items_per_view = config.items_per_view(host.viewport_width());
        let handle = timer.schedule_repeating(config.autoplay_interval());
        let mut controller = Self {
            config,
            mounted: Some(Mounted {
                state: CarouselState {
                    len,
                    current: 0,
                    items_per_view,
                },
                autoplay: Autoplay::Running(handle),
            }),
        };
        controller.render(host);
        tracing::info!(slides = len, items_per_view, "carousel mounted");
        controller
    }

    pub fn is_active(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn state(&self) -> Option<CarouselState> {
        self.mounted.as_ref().map(|mounted| mounted.state)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state().map(|state| state.current)
    }

    pub fn autoplay(&self) -> Option<Autoplay> {
        self.mounted.as_ref().map(|mounted| mounted.autoplay)
    }

    /// Time until the next automatic advance, `None` while paused.
    pub fn time_until_autoplay<T>(&self, timer: &T) -> Option<Duration>
    where
        T: TimerService + ?Sized,
    {
        match self.autoplay()? {
            Autoplay::Running(handle) => timer.remaining(handle),
            Autoplay::Paused => None,
        }
    }

    /// Shows slide `index`, wrapping out-of-range values. Does not touch the
    /// autoplay timer.
    pub fn go_to<H>(&mut self, host: &mut H, index: i64)
    where
        H: CarouselHost + ?Sized,
    {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        mounted.state.current = wrap_index(index, mounted.state.len);
        tracing::debug!(index = mounted.state.current, "carousel moved");
        self.render(host);
    }

    pub fn next<H, T>(&mut self, host: &mut H, timer: &mut T)
    where
        H: CarouselHost + ?Sized,
        T: TimerService + ?Sized,
    {
        self.step_manually(host, timer, 1);
    }

    pub fn previous<H, T>(&mut self, host: &mut H, timer: &mut T)
    where
        H: CarouselHost + ?Sized,
        T: TimerService + ?Sized,
    {
        self.step_manually(host, timer, -1);
    }

    /// Indicator dot `index` was clicked.
    pub fn select_indicator<H, T>(&mut self, host: &mut H, timer: &mut T, index: usize)
    where
        H: CarouselHost + ?Sized,
        T: TimerService + ?Sized,
    {
        if !self.is_active() {
            return;
        }
        self.go_to(host, index as i64);
        self.reset_autoplay(timer);
    }

    pub fn pointer_entered<T>(&mut self, timer: &mut T)
    where
        T: TimerService + ?Sized,
    {
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        if let Autoplay::Running(handle) = mounted.autoplay {
            timer.cancel(handle);
            mounted.autoplay = Autoplay::Paused;
            tracing::debug!("autoplay paused");
        }
    }

    pub fn pointer_left<T>(&mut self, timer: &mut T)
    where
        T: TimerService + ?Sized,
    {
        let interval = self.config.autoplay_interval();
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        if mounted.autoplay == Autoplay::Paused {
            mounted.autoplay = Autoplay::Running(timer.schedule_repeating(interval));
            tracing::debug!("autoplay resumed");
        }
    }

    /// Recomputes the layout for the new viewport width and re-renders the
    /// current slide, whose measured width may have changed.
    pub fn viewport_resized<H>(&mut self, host: &mut H)
    where
        H: CarouselHost + ?Sized,
    {
        let items_per_view = self.config.items_per_view(host.viewport_width());
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        mounted.state.items_per_view = items_per_view;
        self.render(host);
    }

    /// Handles a timer fire. Returns `false` when `handle` is not the running
    /// autoplay timer, so the caller can route it elsewhere.
    pub fn on_timer<H>(&mut self, host: &mut H, handle: TimerHandle) -> bool
    where
        H: CarouselHost + ?Sized,
    {
        let Some(mounted) = self.mounted.as_ref() else {
            return false;
        };
        if mounted.autoplay != Autoplay::Running(handle) {
            return false;
        }
        tracing::trace!("autoplay tick");
        let next = mounted.state.current as i64 + 1;
        self.go_to(host, next);
        true
    }

    /// Stops autoplay for good. The controller is inactive afterwards.
    pub fn unmount<T>(&mut self, timer: &mut T)
    where
        T: TimerService + ?Sized,
    {
        if let Some(Mounted {
            autoplay: Autoplay::Running(handle),
            ..
        }) = self.mounted.take()
        {
            timer.cancel(handle);
        }
    }

    /// Horizontal track offset for the current slide.
    pub fn offset_px<H>(&self, host: &H) -> Option<f64>
    where
        H: CarouselHost + ?Sized,
    {
        let state = self.state()?;
        Some(state.current as f64 * (host.slide_width() + self.config.slide_gap_px))
    }

    fn step_manually<H, T>(&mut self, host: &mut H, timer: &mut T, delta: i64)
    where
        H: CarouselHost + ?Sized,
        T: TimerService + ?Sized,
    {
        let Some(current) = self.current_index() else {
            return;
        };
        self.go_to(host, current as i64 + delta);
        self.reset_autoplay(timer);
    }

    /// Restarts the full autoplay interval. Stays paused while hovered; the
    /// pointer leaving re-arms the timer anyway.
    fn reset_autoplay<T>(&mut self, timer: &mut T)
    where
        T: TimerService + ?Sized,
    {
        let interval = self.config.autoplay_interval();
        let Some(mounted) = self.mounted.as_mut() else {
            return;
        };
        if let Autoplay::Running(handle) = mounted.autoplay {
            timer.cancel(handle);
            mounted.autoplay = Autoplay::Running(timer.schedule_repeating(interval));
        }
    }

    fn render<H>(&self, host: &mut H)
    where
        H: CarouselHost + ?Sized,
    {
        let (Some(offset), Some(current)) = (self.offset_px(&*host), self.current_index()) else {
            return;
        };
        host.apply_offset(offset);
        host.set_active_indicator(current);
    }
}
