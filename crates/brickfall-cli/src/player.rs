use brickfall_engine::{BrickGenerator, GameController, Input, PowerUpKind};
use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Player inputs between two gravity ticks.
const INPUTS_PER_TICK: usize = 4;

/// One in this many player inputs is a power-up purchase attempt.
const PURCHASE_ODDS: u32 = 20;

const PLAYER_MOVES: [Input; 6] = [
    Input::Left,
    Input::Right,
    Input::Rotate,
    Input::SoftDrop,
    Input::HardDrop,
    Input::Hold,
];

#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
pub enum PlayerStyle {
    /// Uniformly random moves
    #[default]
    Random,
    /// Never touches the keys and lets gravity do the work
    Idle,
}

/// Automated player producing the input stream for simulations and recordings.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: Pcg32,
    style: PlayerStyle,
    buy_power_ups: bool,
    inputs_since_tick: usize,
    pending_activation: Option<PowerUpKind>,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(rng: Pcg32, style: PlayerStyle, buy_power_ups: bool) -> Self {
        Self {
            rng,
            style,
            buy_power_ups,
            inputs_since_tick: 0,
            pending_activation: None,
        }
    }

    /// Chooses the next input for `game`.
    ///
    /// A successful purchase is always followed by activating what was bought.
    pub fn next_input<G>(&mut self, game: &GameController<G>) -> Input
    where
        G: BrickGenerator,
    {
        if let Some(kind) = self.pending_activation.take() {
            return Input::Activate(kind);
        }
        if self.style == PlayerStyle::Idle || self.inputs_since_tick >= INPUTS_PER_TICK {
            self.inputs_since_tick = 0;
            return Input::Tick;
        }
        self.inputs_since_tick += 1;

        if self.buy_power_ups && self.rng.random_ratio(1, PURCHASE_ODDS) {
            let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::LEN)];
            if game.board().power_ups().can_afford(kind) {
                self.pending_activation = Some(kind);
                return Input::Purchase(kind);
            }
        }
        PLAYER_MOVES[self.rng.random_range(0..PLAYER_MOVES.len())]
    }
}

/// Feeds `player`'s inputs to `game` until it is over or `max_bricks` bricks
/// have locked. Every applied input is passed to `observe`.
pub fn play_game<G, F>(
    game: &mut GameController<G>,
    player: &mut RandomPlayer,
    max_bricks: usize,
    mut observe: F,
) where
    G: BrickGenerator,
    F: FnMut(Input),
{
    while game.session_state().is_playing() && game.stats().completed_bricks() < max_bricks {
        let input = player.next_input(game);
        game.apply(input);
        observe(input);
    }
}
