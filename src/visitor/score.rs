//! Scoreboard visitors.

use super::ItemVisitor;
use crate::items::{ItemId, Scoreboard, SortOutcome};

/// Scores one sorted product on every scoreboard.
#[derive(Debug, Clone, Copy)]
pub struct ScoreUpdateVisitor {
    outcome: SortOutcome,
}

impl ScoreUpdateVisitor {
    /// Visitor scoring `outcome`.
    #[must_use]
    pub const fn new(outcome: SortOutcome) -> Self {
        Self { outcome }
    }
}

impl ItemVisitor for ScoreUpdateVisitor {
    fn visit_scoreboard(&mut self, _id: ItemId, scoreboard: &mut Scoreboard) {
        scoreboard.update_level_score(self.outcome.kicked, self.outcome.wanted);
    }
}

/// Runs a closure against every scoreboard.
///
/// ```
/// use sparty::items::{Item, Scoreboard};
/// use sparty::scene::Scene;
/// use sparty::visitor::ScoreboardVisitor;
///
/// let mut scene = Scene::default();
/// scene.add(Item::Scoreboard(Scoreboard::default()));
/// let mut total = 0;
/// scene.accept(&mut ScoreboardVisitor::new(|board: &mut Scoreboard| {
///     board.update_level_score(true, true);
///     total = board.level_score();
/// }));
/// assert_eq!(total, 10);
/// ```
pub struct ScoreboardVisitor<F> {
    apply: F,
}

impl<F: FnMut(&mut Scoreboard)> ScoreboardVisitor<F> {
    /// Wraps `apply`.
    #[must_use]
    pub const fn new(apply: F) -> Self {
        Self { apply }
    }
}

impl<F: FnMut(&mut Scoreboard)> ItemVisitor for ScoreboardVisitor<F> {
    fn visit_scoreboard(&mut self, _id: ItemId, scoreboard: &mut Scoreboard) {
        (self.apply)(scoreboard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Item;
    use crate::logic::GateGraph;
    use rstest::rstest;

    #[rstest]
    #[case(true, true, 10)]
    #[case(true, false, 0)]
    fn update_scores_the_outcome(#[case] kicked: bool, #[case] wanted: bool, #[case] score: i32) {
        let mut graph = GateGraph::default();
        let mut item = Item::Scoreboard(Scoreboard::default());
        let mut visitor = ScoreUpdateVisitor::new(SortOutcome { kicked, wanted });
        item.accept(ItemId(0), &mut graph, &mut visitor);
        let Item::Scoreboard(board) = item else {
            panic!("expected a scoreboard");
        };
        assert_eq!(board.level_score(), score);
    }
}
