use super::types::FoodTier;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    score: u64,
    combo: u32,
    last_tier: Option<FoodTier>,
    high_combo: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one eaten item and returns the points it was worth.
    pub fn eat_food(&mut self, tier: FoodTier) -> u64 {
        if self.last_tier == Some(tier) {
            self.combo = self.combo.saturating_add(1);
        } else {
            self.last_tier = Some(tier);
            self.combo = 1;
        }

        let points = tier.score_for_combo(self.combo);
        self.score = self.score.saturating_add(points);
        self.high_combo = self.high_combo.max(self.combo);
        points
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
        self.last_tier = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn high_combo(&self) -> u32 {
        self.high_combo
    }

    pub fn last_tier(&self) -> Option<FoodTier> {
        self.last_tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_combo_of_three() {
        let mut board = ScoreBoard::new();
        let gained: Vec<u64> = (0..3).map(|_| board.eat_food(FoodTier::Special)).collect();
        assert_eq!(gained, vec![1, 4, 9]);
        assert_eq!(board.score(), 14);
        assert_eq!(board.combo(), 3);
    }

    #[test]
    fn test_rare_combo_of_two() {
        let mut board = ScoreBoard::new();
        board.eat_food(FoodTier::Rare);
        board.eat_food(FoodTier::Rare);
        assert_eq!(board.score(), 9);
    }

    #[test]
    fn test_normal_is_flat() {
        let mut board = ScoreBoard::new();
        for _ in 0..4 {
            assert_eq!(board.eat_food(FoodTier::Normal), 1);
        }
        assert_eq!(board.score(), 4);
        assert_eq!(board.combo(), 4);
    }

    #[test]
    fn test_tier_switch_restarts_combo() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.eat_food(FoodTier::Normal), 1);
        assert_eq!(board.eat_food(FoodTier::Special), 1);
        assert_eq!(board.eat_food(FoodTier::Special), 4);
        assert_eq!(board.score(), 6);
        assert_eq!(board.last_tier(), Some(FoodTier::Special));
    }

    #[test]
    fn test_reset_combo_forgets_last_tier() {
        let mut board = ScoreBoard::new();
        board.eat_food(FoodTier::Rare);
        board.eat_food(FoodTier::Rare);
        board.reset_combo();
        assert_eq!(board.combo(), 0);
        assert_eq!(board.last_tier(), None);

        assert_eq!(board.eat_food(FoodTier::Rare), 1);
        assert_eq!(board.score(), 10);
        assert_eq!(board.high_combo(), 2);
    }

    #[test]
    fn test_long_rare_streak_goes_past_u32() {
        let mut board = ScoreBoard::new();
        let mut previous = 0;
        for _ in 0..400 {
            board.eat_food(FoodTier::Rare);
            assert!(board.score() > previous);
            previous = board.score();
        }
        // sum of n^3 for n in 1..=400 is (400 * 401 / 2)^2
        assert_eq!(board.score(), 80_200u64 * 80_200);
        assert!(board.score() > u64::from(u32::MAX));
        assert_eq!(board.high_combo(), 400);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut board = ScoreBoard::new();
        board.eat_food(FoodTier::Special);
        board.reset();
        assert_eq!(board, ScoreBoard::default());
    }
}
