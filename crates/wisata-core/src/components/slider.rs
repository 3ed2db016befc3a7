//! Auto-rotating image slider

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use super::Mounted;
use crate::config::SiteConfig;
use crate::host::Host;

pub const FADE_TRANSITION: &str = "opacity 1s ease-in-out";

/// Index of the visible image in a fixed, non-empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    index: usize,
    len: usize,
}

impl SliderState {
    /// `None` for an empty sequence.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self { index: 0, len })
    }

    /// Step to the next image. Returns `(previous, current)`.
    pub fn advance(&mut self) -> (usize, usize) {
        let previous = self.index;
        self.index = (self.index + 1) % self.len;
        (previous, self.index)
    }
}

pub fn init<H: Host>(host: &Rc<H>, config: &Rc<SiteConfig>) -> Option<Mounted> {
    let Some(container) = host.query(&config.selectors.slider) else {
        debug!("image slider skipped: no slider on page");
        return None;
    };
    let images = host.query_within(&container, &config.selectors.slider_image);
    let Some(state) = SliderState::new(images.len()) else {
        debug!("image slider skipped: slider has no images");
        return None;
    };

    for (index, image) in images.iter().enumerate() {
        host.set_style(image, "opacity", if index == 0 { "1" } else { "0" });
        host.set_style(image, "transition", FADE_TRANSITION);
    }

    let state = Rc::new(Cell::new(state));
    let h = Rc::clone(host);
    let rotation = host.set_interval(
        config.timing.slider_interval_ms,
        Box::new(move || {
            let mut current = state.get();
            let (previous, next) = current.advance();
            state.set(current);
            h.set_style(&images[previous], "opacity", "0");
            h.set_style(&images[next], "opacity", "1");
        }),
    );

    debug!("image slider mounted");
    Some(Mounted::new("image_slider", vec![rotation]))
}
