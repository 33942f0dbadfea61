//! Core library for the landing page widgets.
//!
//! Each widget (carousel, hamburger menu, navbar scroll effect, preloader,
//! in-page anchors, contact form) is a small state machine that reads from and
//! writes to its page through the traits in [`host`]. Timers go through
//! [`TimerService`], so the whole page can run against [`HeadlessPage`] and a
//! [`ManualTimer`] without a browser.

pub mod anchor;
pub mod carousel;
pub mod config;
pub mod contact;
pub mod error;
pub mod headless;
pub mod host;
pub mod menu;
pub mod navbar;
pub mod page;
pub mod preloader;
pub mod timer;

pub use anchor::ScrollRequest;
pub use carousel::{Autoplay, CarouselController, CarouselState};
pub use config::{
    AppConfig, Breakpoint, CarouselConfig, ContactConfig, NavbarConfig, PreloaderConfig,
};
pub use contact::ContactSubmission;
pub use error::{PageError, Result};
pub use headless::{Effect, HeadlessPage};
pub use host::{
    AnchorTargets, CarouselHost, IndicatorSet, PageChrome, PageHost, PageLayout, RenderTarget,
    SlideSurface, Viewport,
};
pub use menu::HamburgerMenu;
pub use navbar::NavbarScroll;
pub use page::{Page, PageEvent};
pub use preloader::{Preloader, PreloaderPhase};
pub use timer::{ManualTimer, TimerHandle, TimerService};
