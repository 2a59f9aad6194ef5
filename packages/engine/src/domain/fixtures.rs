//! Test fixtures: a log builder that folds as it appends, and a scripted
//! two-player round driven through the real action/derivation flow.

use uuid::Uuid;

use crate::domain::actions::{action_event_kind, PlayerAction};
use crate::domain::bidding::{bidding_winner, winning_amount};
use crate::domain::cards_types::{CardView, Suit};
use crate::domain::dealing::{create_deck, deal_cards, shuffle_deck_seeded};
use crate::domain::events::{EventContext, GameEvent, GameEventKind};
use crate::domain::melds::detect_melds;
use crate::domain::reducer::apply_event;
use crate::domain::scoring::compute_round_result;
use crate::domain::state::{GameState, Phase, PlayerIndex};
use crate::domain::tricks::{trick_winner, valid_plays};

/// Appends stamped events and keeps the folded state alongside the log.
pub struct LogBuilder {
    pub session_id: Uuid,
    pub sequence: u64,
    pub log: Vec<GameEvent>,
    pub state: GameState,
}

impl LogBuilder {
    pub fn new() -> Self {
        crate::domain::test_prelude::init_test_logging();
        Self {
            session_id: Uuid::new_v4(),
            sequence: 0,
            log: Vec::new(),
            state: GameState::new(),
        }
    }

    /// Stamp, fold and append one fact. Panics on a rejected fold; the
    /// fixtures only produce validated events.
    pub fn push(&mut self, kind: GameEventKind) {
        self.sequence += 1;
        let event = GameEvent::stamp(
            EventContext {
                session_id: self.session_id,
                sequence: self.sequence,
            },
            kind,
        );
        self.state = apply_event(&self.state, &event).expect("fixture event must fold");
        self.log.push(event);
    }

    /// Validate a player action and append the event it maps to.
    pub fn act(&mut self, player: PlayerIndex, action: PlayerAction) {
        let kind =
            action_event_kind(&self.state, player, &action).expect("fixture action must be legal");
        self.push(kind);
    }
}

/// Seat two players and deal a deterministic round; stops at the start of
/// the auction (dealer 0, first bidder 1).
pub fn two_player_deal(seed: u64) -> LogBuilder {
    let mut builder = LogBuilder::new();
    builder.push(GameEventKind::PlayerJoined {
        player: 0,
        nickname: "alice".into(),
        team: None,
    });
    builder.push(GameEventKind::PlayerJoined {
        player: 1,
        nickname: "bob".into(),
        team: None,
    });
    builder.push(GameEventKind::GameStarted {
        player_count: 2,
        target_score: 1000,
    });

    let deck = shuffle_deck_seeded(&create_deck(), seed);
    let deal = deal_cards(&deck, 2).expect("full deck deals");
    builder.push(GameEventKind::CardsDealt {
        hands: deal
            .hands
            .iter()
            .map(|hand| hand.iter().map(|&c| CardView::Visible(c)).collect())
            .collect(),
        dabb: deal.dabb.iter().map(|&c| CardView::Visible(c)).collect(),
    });
    builder
}

/// Drive a full two-player round through the real flow: player 1 bids the
/// minimum, player 0 passes, player 1 takes the dabb, discards, declares
/// trump, everyone melds, all tricks are played out and the round is
/// scored. Deterministic per seed.
pub fn scripted_two_player_round(seed: u64) -> LogBuilder {
    let mut builder = two_player_deal(seed);

    builder.act(1, PlayerAction::Bid { amount: 150 });
    builder.act(0, PlayerAction::Pass);

    let winner = bidding_winner(&builder.state.round.passed_players, 2).expect("one bidder left");
    builder.push(GameEventKind::BiddingWon {
        player: winner,
        amount: winning_amount(builder.state.round.current_bid),
    });

    builder.act(winner, PlayerAction::TakeDabb);
    let hand = builder.state.visible_hand(winner).expect("own hand visible");
    builder.act(
        winner,
        PlayerAction::DiscardCards {
            cards: hand[..4].to_vec(),
        },
    );

    let trump = Suit::Herz;
    builder.act(winner, PlayerAction::DeclareTrump { trump });

    for player in 0..2u8 {
        let hand = builder.state.visible_hand(player).expect("visible");
        let melds = detect_melds(&hand, trump);
        builder.act(player, PlayerAction::DeclareMelds { melds });
    }
    builder.push(GameEventKind::MeldingComplete);

    while builder.state.phase == Phase::Tricks {
        match builder.state.turn {
            Some(turn) => {
                let hand = builder.state.visible_hand(turn).expect("visible");
                let legal = valid_plays(&hand, &builder.state.round.current_trick, trump);
                builder.act(turn, PlayerAction::PlayCard { card: legal[0] });
            }
            None => {
                let winner = trick_winner(&builder.state.round.current_trick, trump, 2)
                    .expect("complete trick resolves");
                let points = builder.state.round.current_trick.points();
                builder.push(GameEventKind::TrickCompleted { winner, points });
            }
        }
    }

    let result = compute_round_result(&builder.state).expect("round scores");
    builder.push(GameEventKind::RoundScored {
        scores: result.entries(),
        bid_met: result.bid_met,
    });

    builder
}
