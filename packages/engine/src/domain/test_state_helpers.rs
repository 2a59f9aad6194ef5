//! Test-only game state helpers for domain unit tests.

use crate::domain::bidding::first_bidder;
use crate::domain::cards_types::{Card, CardView};
use crate::domain::state::{
    all_sides, GameState, Phase, Player, PlayerIndex, RoundState,
};

/// Seated players with placeholder nicknames.
pub fn make_players(player_count: u8) -> Vec<Player> {
    (0..player_count)
        .map(|index| Player {
            index,
            nickname: format!("player-{index}"),
            team: if player_count == 4 {
                Some(index % 2)
            } else {
                None
            },
            connected: true,
        })
        .collect()
}

/// A game state at the start of the auction, with the given hands dealt
/// and the bidder left of the dealer to act.
pub fn init_bidding(
    player_count: u8,
    dealer: PlayerIndex,
    hands: Vec<Vec<Card>>,
) -> GameState {
    let opener = first_bidder(dealer, player_count);
    let mut state = GameState::new();
    state.phase = Phase::Bidding;
    state.player_count = player_count;
    state.players = make_players(player_count);
    state.dealer = dealer;
    state.round_no = 1;
    state.total_scores = all_sides(player_count)
        .into_iter()
        .map(|side| (side, 0))
        .collect();
    state.round = RoundState::empty(player_count);
    state.round.hands = hands
        .into_iter()
        .map(|hand| hand.into_iter().map(CardView::Visible).collect())
        .collect();
    state.round.current_bidder = Some(opener);
    state.turn = Some(opener);
    state
}
