//! Cap on the number of reviewers requested in one run.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::review_config::ReviewConfig;

/// Pick at most `options.number_of_reviewers` reviewers, uniformly at random.
///
/// The input is returned unchanged when no cap is configured or the cap is at
/// least the number of reviewers. Otherwise exactly `cap` distinct elements
/// of `reviewers` are chosen without replacement.
pub fn randomly_pick_reviewers<R: Rng + ?Sized>(
    reviewers: Vec<String>,
    config: &ReviewConfig,
    rng: &mut R,
) -> Vec<String> {
    let Some(cap) = config.options.number_of_reviewers else {
        return reviewers;
    };
    let cap = cap.get();
    if cap >= reviewers.len() {
        return reviewers;
    }
    reviewers.choose_multiple(rng, cap).cloned().collect()
}
