use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    anchor, AppConfig, CarouselController, ContactSubmission, HamburgerMenu, ManualTimer,
    NavbarScroll, PageError, PageHost, Preloader, Result, TimerHandle, TimerService,
};

/// Notification delivered by the page. Measurements (viewport width, scroll
/// position) are read back from the host when the event is handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Every resource finished loading.
    Load,
    Scroll,
    Resize,
    PointerEnteredCarousel,
    PointerLeftCarousel,
    NextClicked,
    PreviousClicked,
    IndicatorClicked { index: usize },
    HamburgerClicked,
    /// A link inside the navigation menu.
    NavLinkClicked { href: String },
    AnchorClicked { href: String },
    ContactSubmitted(ContactSubmission),
}

/// Every widget on the landing page, wired to one host and one timer.
///
/// Events are handled one at a time, in arrival order, each by exactly one
/// widget operation.
#[derive(Debug)]
pub struct Page<H, T = ManualTimer> {
    host: H,
    timer: T,
    config: AppConfig,
    carousel: CarouselController,
    preloader: Preloader,
    menu: Option<HamburgerMenu>,
    navbar: Option<NavbarScroll>,
    contact_form: bool,
}

impl<H: PageHost> Page<H> {
    /// Runs once the page structure is ready, on a virtual clock starting at zero.
    pub fn boot(host: H, config: AppConfig, year: i32) -> Result<Self> {
        Self::boot_with_timer(host, ManualTimer::new(), config, year)
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.now()
    }

    /// Lets `by` pass on the page clock, delivering every timer that comes
    /// due to the widget that scheduled it.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.timer.now() + by;
        while let Some(handle) = self.timer.fire_next(deadline) {
            self.timer_fired(handle);
        }
        self.timer.settle(deadline);
    }
}

impl<H: PageHost, T: TimerService> Page<H, T> {
    /// Runs once the page structure is ready. Fails before touching the host
    /// if `config` is invalid.
    pub fn boot_with_timer(
        mut host: H,
        mut timer: T,
        config: AppConfig,
        year: i32,
    ) -> Result<Self> {
        config.validate()?;
        let layout = host.layout();

        if layout.footer_year {
            host.set_footer_year(year);
        }
        let carousel = CarouselController::mount(config.carousel.clone(), &mut host, &mut timer);
        let preloader = Preloader::start(config.preloader.clone(), layout.preloader, &mut timer);
        let menu = layout.menu.then(HamburgerMenu::new);
        let navbar = layout.navbar.then(|| NavbarScroll::new(&config.navbar));
        if !layout.contact_form {
            tracing::debug!("contact form not found");
        }

        tracing::info!(?layout, carousel = carousel.is_active(), "page booted");
        Ok(Self {
            host,
            timer,
            config,
            carousel,
            preloader,
            menu,
            navbar,
            contact_form: layout.contact_form,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn preloader(&self) -> &Preloader {
        &self.preloader
    }

    pub fn menu(&self) -> Option<&HamburgerMenu> {
        self.menu.as_ref()
    }

    pub fn dispatch(&mut self, event: PageEvent) {
        tracing::debug!(?event, "dispatching");
        let Self {
            host,
            timer,
            config,
            carousel,
            preloader,
            menu,
            navbar,
            contact_form,
        } = self;

        match event {
            PageEvent::Load => preloader.page_loaded(host, timer),
            PageEvent::Scroll => {
                if let Some(navbar) = navbar {
                    navbar.page_scrolled(host);
                }
            }
            PageEvent::Resize => carousel.viewport_resized(host),
            PageEvent::PointerEnteredCarousel => carousel.pointer_entered(timer),
            PageEvent::PointerLeftCarousel => carousel.pointer_left(timer),
            PageEvent::NextClicked => carousel.next(host, timer),
            PageEvent::PreviousClicked => carousel.previous(host, timer),
            PageEvent::IndicatorClicked { index } => {
                if index < carousel.state().map_or(0, |state| state.len()) {
                    carousel.select_indicator(host, timer, index);
                }
            }
            PageEvent::HamburgerClicked => {
                if let Some(menu) = menu {
                    menu.toggle(host);
                }
            }
            PageEvent::NavLinkClicked { href } => {
                if let Some(menu) = menu {
                    menu.link_followed(host);
                }
                if href.starts_with('#') {
                    anchor::follow(host, &href);
                }
            }
            PageEvent::AnchorClicked { href } => {
                anchor::follow(host, &href);
            }
            PageEvent::ContactSubmitted(submission) => {
                if !*contact_form {
                    return;
                }
                match submission.redirect_url(&config.contact) {
                    Ok(url) => {
                        host.navigate(&url);
                        host.alert(&config.contact.confirmation_notice);
                        host.reset_contact_form();
                    }
                    Err(PageError::MissingField(missing)) => {
                        tracing::debug!(missing, "contact form incomplete");
                        host.alert(&config.contact.missing_fields_notice);
                    }
                    Err(err) => tracing::warn!(%err, "could not build contact redirect"),
                }
            }
        }
    }

    /// Forwards a timer fire from the host to the widget that scheduled it.
    /// Returns `false` if no widget owns `handle`.
    pub fn timer_fired(&mut self, handle: TimerHandle) -> bool {
        if self.carousel.on_timer(&mut self.host, handle) {
            return true;
        }
        let owned = self
            .preloader
            .on_timer(&mut self.host, &mut self.timer, handle);
        if !owned {
            tracing::trace!(?handle, "timer fire without an owner");
        }
        owned
    }
}
