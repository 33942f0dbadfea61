use crate::{AnchorTargets, PageChrome};

/// Where a same-page link should take the visitor.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub fragment: String,
}

/// Resolves an in-page link, keeping the target clear of the fixed navbar.
///
/// Returns `None` for the bare `#` link, for hrefs that don't point into the
/// page, and for unknown targets.
pub fn resolve<H>(host: &H, href: &str) -> Option<ScrollRequest>
where
    H: AnchorTargets + ?Sized,
{
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    let target_top = host.anchor_top(id)?;
    Some(ScrollRequest {
        top: target_top + host.scroll_y() - host.navbar_height(),
        fragment: href.to_string(),
    })
}

/// Smoothly scrolls to the link target and records it in the history.
/// Returns whether the page moved.
pub fn follow<H>(host: &mut H, href: &str) -> bool
where
    H: AnchorTargets + PageChrome + ?Sized,
{
    let Some(request) = resolve(&*host, href) else {
        tracing::debug!(href, "ignoring in-page link without a target");
        return false;
    };
    host.smooth_scroll_to(request.top);
    host.push_fragment(&request.fragment);
    true
}
