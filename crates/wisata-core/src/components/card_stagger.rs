//! Staggered destination cards

use tracing::debug;

use crate::config::SiteConfig;
use crate::host::Page;

/// CSS `transition-delay` for the card at `index`.
pub fn delay_for(index: usize, step_ms: u32) -> String {
    format!("{}ms", index as u64 * u64::from(step_ms))
}

/// Returns how many cards were staggered.
pub fn init<P: Page + ?Sized>(page: &P, config: &SiteConfig) -> usize {
    let cards = page.query_all(&config.selectors.destination_card);
    for (index, card) in cards.iter().enumerate() {
        page.set_style(
            card,
            "transition-delay",
            &delay_for(index, config.timing.stagger_step_ms),
        );
    }
    debug!(cards = cards.len(), "destination cards staggered");
    cards.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_steps() {
        assert_eq!(delay_for(0, 100), "0ms");
        assert_eq!(delay_for(3, 100), "300ms");
    }
}
