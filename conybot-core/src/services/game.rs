// src/services/game.rs

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use conybot_common::models::{GameChoice, GameResult, GameReward};

use crate::Error;
use crate::repositories::CouponStore;

pub const WIN_COUPON_TITLE: &str = "Cony粉紅9折券";
pub const WIN_COUPON_DESCRIPTION: &str = "贏得遊戲即可享受全品項9折優惠。";

pub const WIN_MESSAGE: &str = "Congrats! Here are all your coupons.";
pub const LOSS_MESSAGE: &str = "Nice try! Win to collect coupons.";

/// Stateless guessing game: one uniform draw per round, exact-match win,
/// at most one coupon minted per winning round. Holds a shared reference
/// to the coupon store; never assumes exclusive access.
pub struct GameService {
    coupons: Arc<dyn CouponStore>,
}

impl GameService {
    pub fn new(coupons: Arc<dyn CouponStore>) -> Self {
        Self { coupons }
    }

    /// Play one round against a uniformly random engine choice.
    pub async fn play_round(&self, player_choice: &str) -> Result<GameResult, Error> {
        let player: GameChoice = player_choice.parse()?;
        let index = rand::rng().random_range(0..GameChoice::ALL.len());
        self.play_against(player, GameChoice::ALL[index]).await
    }

    /// Resolve a round with a known engine choice. Split out so tests can
    /// force wins and losses.
    pub async fn play_against(
        &self,
        player: GameChoice,
        cony: GameChoice,
    ) -> Result<GameResult, Error> {
        let did_win = player == cony;

        let reward = if did_win {
            let new_coupon = self
                .coupons
                .add(WIN_COUPON_TITLE, WIN_COUPON_DESCRIPTION)
                .await?;
            info!("Player won a round, minted coupon {}", new_coupon.code);
            GameReward {
                message: WIN_MESSAGE.to_string(),
                coupons: self.coupons.list().await?,
                new_coupon: Some(new_coupon),
            }
        } else {
            GameReward {
                message: LOSS_MESSAGE.to_string(),
                coupons: Vec::new(),
                new_coupon: None,
            }
        };

        Ok(GameResult {
            player_choice: player,
            cony_choice: cony,
            did_win,
            reward,
        })
    }
}
