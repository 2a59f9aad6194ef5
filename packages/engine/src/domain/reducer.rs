//! State reducer: folds the ordered event log into a `GameState`.
//!
//! `apply_event` is a total, pure, deterministic function of (prior
//! state, event); the same ordered prefix always yields the identical
//! state. Events are assumed validated and de-duplicated before they
//! entered the log, so any inconsistency found here is an orchestrator
//! bug and fails loudly as an invariant violation.

use tracing::debug;

use super::bidding::{
    bidding_winner, first_bidder, is_bidding_complete, is_valid_bid, next_bidder, winning_amount,
};
use super::cards_types::{Card, CardView};
use super::events::{GameEvent, GameEventKind};
use super::melds::meld_value;
use super::rules::{dabb_size_for_players, hand_size_for_players, tricks_per_round, MAX_PLAYERS, MIN_PLAYERS};
use super::scoring::winning_side;
use super::state::{
    all_sides, next_seat, require_bid_winner, require_trump, GameState, Phase, Player, PlayerIndex,
    RoundState,
};
use super::tricks::{trick_winner, Trick};
use crate::errors::domain::DomainError;

/// Fold one event into the state, returning the successor state.
pub fn apply_event(state: &GameState, event: &GameEvent) -> Result<GameState, DomainError> {
    if state.phase == Phase::Terminated {
        return Err(DomainError::invariant(format!(
            "event {} folded after termination",
            event.sequence
        )));
    }

    let mut next = state.clone();
    match &event.kind {
        GameEventKind::PlayerJoined {
            player,
            nickname,
            team,
        } => {
            expect_phase(state, &[Phase::Waiting], "PLAYER_JOINED")?;
            if *player as usize != state.players.len() || *player >= MAX_PLAYERS {
                return Err(DomainError::invariant(format!(
                    "join out of order: seat {player} with {} seated",
                    state.players.len()
                )));
            }
            next.players.push(Player {
                index: *player,
                nickname: nickname.clone(),
                team: *team,
                connected: true,
            });
        }

        GameEventKind::PlayerDisconnected { player } => {
            set_connected(&mut next, *player, false)?;
        }
        GameEventKind::PlayerReconnected { player } => {
            set_connected(&mut next, *player, true)?;
        }

        GameEventKind::GameStarted {
            player_count,
            target_score,
        } => {
            expect_phase(state, &[Phase::Waiting], "GAME_STARTED")?;
            if !(MIN_PLAYERS..=MAX_PLAYERS).contains(player_count)
                || *player_count as usize != state.players.len()
            {
                return Err(DomainError::invariant(format!(
                    "game started with {player_count} declared and {} seated",
                    state.players.len()
                )));
            }
            next.player_count = *player_count;
            next.target_score = *target_score;
            next.round_no = 1;
            next.dealer = 0;
            next.round = RoundState::empty(*player_count);
            next.total_scores = all_sides(*player_count)
                .into_iter()
                .map(|side| (side, 0))
                .collect();
            // Team seating is fixed at 4 players: opposite seats pair up.
            if *player_count == 4 {
                for player in next.players.iter_mut() {
                    player.team = Some(player.index % 2);
                }
            }
            next.phase = Phase::Dealing;
        }

        GameEventKind::CardsDealt { hands, dabb } => {
            expect_phase(state, &[Phase::Dealing], "CARDS_DEALT")?;
            let hand_size = hand_size_for_players(state.player_count)
                .ok_or_else(|| DomainError::invariant("deal without a player count"))?
                as usize;
            let dabb_size = dabb_size_for_players(state.player_count)
                .ok_or_else(|| DomainError::invariant("deal without a player count"))?
                as usize;
            if hands.len() != state.player_count as usize
                || hands.iter().any(|h| h.len() != hand_size)
                || dabb.len() != dabb_size
            {
                return Err(DomainError::invariant("deal sizes off the table"));
            }
            next.round = RoundState::empty(state.player_count);
            next.round.hands = hands.clone();
            next.round.dabb = dabb.clone();
            let opener = first_bidder(state.dealer, state.player_count);
            next.round.current_bidder = Some(opener);
            next.turn = Some(opener);
            next.phase = Phase::Bidding;
        }

        GameEventKind::BidPlaced { player, amount } => {
            expect_phase(state, &[Phase::Bidding], "BID_PLACED")?;
            expect_bidder(state, *player)?;
            if !is_valid_bid(*amount, state.round.current_bid) {
                return Err(DomainError::invariant(format!(
                    "bid {amount} folded over {}",
                    state.round.current_bid
                )));
            }
            next.round.current_bid = *amount;
            if is_bidding_complete(&state.round.passed_players, state.player_count) {
                // Everyone else already passed: the bid stands, await
                // BIDDING_WON.
                next.round.current_bidder = None;
            } else {
                next.round.current_bidder =
                    next_bidder(*player, &state.round.passed_players, state.player_count);
            }
            next.turn = next.round.current_bidder;
        }

        GameEventKind::BidPassed { player } => {
            expect_phase(state, &[Phase::Bidding], "BID_PASSED")?;
            expect_bidder(state, *player)?;
            next.round.passed_players.insert(*player);
            let passed = &next.round.passed_players;
            if passed.len() == state.player_count as usize {
                // Dead auction: no winner; the caller re-deals or abandons.
                next.round.current_bidder = None;
            } else if is_bidding_complete(passed, state.player_count) {
                if state.round.current_bid > 0 {
                    // The sole remaining seat holds the bid; await
                    // BIDDING_WON.
                    next.round.current_bidder = None;
                } else {
                    // The sole remaining seat never bid: it must accept
                    // (the caller emits BIDDING_WON at the minimum, or
                    // folds its opening bid) or pass the round dead.
                    next.round.current_bidder =
                        bidding_winner(passed, state.player_count);
                }
            } else {
                next.round.current_bidder =
                    next_bidder(*player, passed, state.player_count);
            }
            next.turn = next.round.current_bidder;
        }

        GameEventKind::BiddingWon { player, amount } => {
            expect_phase(state, &[Phase::Bidding], "BIDDING_WON")?;
            let derived = bidding_winner(&state.round.passed_players, state.player_count);
            if derived != Some(*player) {
                return Err(DomainError::invariant(format!(
                    "bidding winner {player} does not match derived {derived:?}"
                )));
            }
            if *amount != winning_amount(state.round.current_bid) {
                return Err(DomainError::invariant(format!(
                    "winning amount {amount} does not match the auction"
                )));
            }
            next.round.current_bid = *amount;
            next.round.bid_winner = Some(*player);
            next.round.current_bidder = None;
            next.turn = Some(*player);
            next.phase = Phase::Dabb;
        }

        GameEventKind::DabbTaken { player, cards } => {
            expect_phase(state, &[Phase::Dabb], "DABB_TAKEN")?;
            expect_bid_winner(state, *player)?;
            if state.round.dabb.is_empty() || cards.len() != state.round.dabb.len() {
                return Err(DomainError::invariant("dabb already taken or size mismatch"));
            }
            // On an unfiltered fold the revealed cards must be the dabb.
            let visible: Option<Vec<Card>> =
                state.round.dabb.iter().map(|v| v.card()).collect();
            if let Some(mut dealt) = visible {
                let mut revealed = cards.clone();
                dealt.sort();
                revealed.sort();
                if dealt != revealed {
                    return Err(DomainError::invariant("revealed dabb differs from the deal"));
                }
            }
            let hand = &mut next.round.hands[*player as usize];
            hand.extend(cards.iter().map(|&c| CardView::Visible(c)));
            next.round.dabb.clear();
        }

        GameEventKind::CardsDiscarded { player, cards } => {
            expect_phase(state, &[Phase::Dabb], "CARDS_DISCARDED")?;
            expect_bid_winner(state, *player)?;
            let dabb_size = dabb_size_for_players(state.player_count)
                .ok_or_else(|| DomainError::invariant("discard without a player count"))?
                as usize;
            if !state.round.dabb.is_empty() || !state.round.discarded.is_empty() {
                return Err(DomainError::invariant("discard before taking the dabb"));
            }
            if cards.len() != dabb_size {
                return Err(DomainError::invariant(format!(
                    "discard of {} cards, expected {dabb_size}",
                    cards.len()
                )));
            }
            let hand = &mut next.round.hands[*player as usize];
            if cards.iter().any(|view| view.is_redacted()) {
                // Another viewer's discard: the composition of the
                // shrunken hand is no longer known, only its size.
                let new_len = hand.len().checked_sub(cards.len()).ok_or_else(|| {
                    DomainError::invariant("discard larger than the hand")
                })?;
                *hand = vec![CardView::Redacted; new_len];
            } else {
                for card in cards.iter().filter_map(|view| view.card()) {
                    remove_from_hand(hand, card)?;
                }
            }
            next.round.discarded = cards.clone();
            next.turn = Some(*player);
            next.phase = Phase::Trump;
        }

        GameEventKind::WentOut { player } => {
            expect_phase(state, &[Phase::Dabb, Phase::Trump], "WENT_OUT")?;
            expect_bid_winner(state, *player)?;
            next.round.went_out = Some(*player);
            next.turn = None;
            next.phase = Phase::Scoring;
        }

        GameEventKind::TrumpDeclared { player, trump } => {
            expect_phase(state, &[Phase::Trump], "TRUMP_DECLARED")?;
            expect_bid_winner(state, *player)?;
            next.round.trump = Some(*trump);
            next.turn = None;
            next.phase = Phase::Melding;
        }

        GameEventKind::MeldsDeclared { player, melds } => {
            expect_phase(state, &[Phase::Melding], "MELDS_DECLARED")?;
            if *player as usize >= state.players.len() {
                return Err(DomainError::invariant(format!("unknown seat {player}")));
            }
            if state.round.melded_players.contains(player) {
                return Err(DomainError::invariant(format!(
                    "seat {player} declared melds twice"
                )));
            }
            let trump = require_trump(state, "MELDS_DECLARED")?;
            for meld in melds {
                if meld.points != meld_value(meld.kind, trump) {
                    return Err(DomainError::invariant(format!(
                        "meld {:?} carries a foreign point value",
                        meld.kind
                    )));
                }
            }
            next.round.declared_melds[*player as usize] = melds.clone();
            next.round.melded_players.insert(*player);
        }

        GameEventKind::MeldingComplete => {
            expect_phase(state, &[Phase::Melding], "MELDING_COMPLETE")?;
            if state.round.melded_players.len() != state.player_count as usize {
                return Err(DomainError::invariant(format!(
                    "melding closed with {}/{} declarations",
                    state.round.melded_players.len(),
                    state.player_count
                )));
            }
            next.round.current_trick = Trick::new();
            // The bid winner leads the first trick.
            next.turn = Some(require_bid_winner(state, "MELDING_COMPLETE")?);
            next.phase = Phase::Tricks;
        }

        GameEventKind::CardPlayed { player, card } => {
            expect_phase(state, &[Phase::Tricks], "CARD_PLAYED")?;
            if state.turn != Some(*player) {
                return Err(DomainError::invariant(format!(
                    "seat {player} played out of turn"
                )));
            }
            if state.round.current_trick.is_complete(state.player_count) {
                return Err(DomainError::invariant("play into a complete trick"));
            }
            remove_from_hand(&mut next.round.hands[*player as usize], *card)?;
            if next.round.current_trick.plays.is_empty() {
                next.round.current_trick.lead = Some(card.suit);
            }
            next.round.current_trick.plays.push((*player, *card));
            if next.round.current_trick.is_complete(state.player_count) {
                next.turn = None;
            } else {
                next.turn = Some(next_seat(*player, state.player_count));
            }
        }

        GameEventKind::TrickCompleted { winner, points } => {
            expect_phase(state, &[Phase::Tricks], "TRICK_COMPLETED")?;
            let trump = require_trump(state, "TRICK_COMPLETED")?;
            let derived = trick_winner(&state.round.current_trick, trump, state.player_count)?;
            if derived != *winner {
                return Err(DomainError::invariant(format!(
                    "trick winner {winner} does not match derived {derived}"
                )));
            }
            if *points != state.round.current_trick.points() {
                return Err(DomainError::invariant("trick points do not match the plays"));
            }
            let cards: Vec<Card> = state
                .round
                .current_trick
                .plays
                .iter()
                .map(|&(_, c)| c)
                .collect();
            next.round.tricks_taken[*winner as usize].extend(cards);
            next.round.completed_tricks += 1;
            next.round.last_trick_winner = Some(*winner);
            next.round.current_trick = Trick::new();

            let total = tricks_per_round(state.player_count)
                .ok_or_else(|| DomainError::invariant("trick count without a player count"))?;
            if next.round.completed_tricks >= total {
                next.turn = None;
                next.phase = Phase::Scoring;
            } else {
                next.turn = Some(*winner);
            }
        }

        GameEventKind::RoundScored { scores, bid_met: _ } => {
            // An auction everyone passed is scored empty and re-dealt.
            let all_passed = state.phase == Phase::Bidding
                && state.round.passed_players.len() == state.player_count as usize;
            if !all_passed {
                expect_phase(state, &[Phase::Scoring], "ROUND_SCORED")?;
            } else if !scores.is_empty() {
                return Err(DomainError::invariant(
                    "a dead auction scores no points",
                ));
            }
            let sides = all_sides(state.player_count);
            for entry in scores {
                if !sides.contains(&entry.side) {
                    return Err(DomainError::invariant(format!(
                        "score for foreign side {:?}",
                        entry.side
                    )));
                }
                next.round.round_scores.insert(entry.side, entry.points);
                *next.total_scores.entry(entry.side).or_insert(0) += entry.points;
            }
            if winning_side(&next).is_none() {
                next = next.reset_for_new_round();
            }
            // Otherwise hold in Scoring until GAME_FINISHED is folded.
        }

        GameEventKind::GameFinished { winner } => {
            expect_phase(state, &[Phase::Scoring], "GAME_FINISHED")?;
            let derived = winning_side(state);
            if derived != Some(*winner) {
                return Err(DomainError::invariant(format!(
                    "game winner {winner:?} does not match derived {derived:?}"
                )));
            }
            next.winner = Some(*winner);
            next.turn = None;
            next.phase = Phase::Finished;
        }

        GameEventKind::GameTerminated { reason } => {
            debug!(seq = event.sequence, %reason, "session terminated");
            next.turn = None;
            next.phase = Phase::Terminated;
        }
    }

    if next.phase != state.phase {
        debug!(
            seq = event.sequence,
            from = ?state.phase,
            to = ?next.phase,
            "phase transition"
        );
    }
    Ok(next)
}

/// Fold an ordered event list from the initial state.
pub fn apply_events<'a, I>(events: I) -> Result<GameState, DomainError>
where
    I: IntoIterator<Item = &'a GameEvent>,
{
    let mut state = GameState::new();
    for event in events {
        state = apply_event(&state, event)?;
    }
    Ok(state)
}

fn expect_phase(
    state: &GameState,
    allowed: &[Phase],
    event: &'static str,
) -> Result<(), DomainError> {
    if allowed.contains(&state.phase) {
        Ok(())
    } else {
        Err(DomainError::invariant(format!(
            "{event} folded in phase {:?}",
            state.phase
        )))
    }
}

fn expect_bidder(state: &GameState, player: PlayerIndex) -> Result<(), DomainError> {
    if state.round.current_bidder == Some(player) {
        Ok(())
    } else {
        Err(DomainError::invariant(format!(
            "seat {player} acted in the auction out of turn"
        )))
    }
}

fn expect_bid_winner(state: &GameState, player: PlayerIndex) -> Result<(), DomainError> {
    if state.round.bid_winner == Some(player) {
        Ok(())
    } else {
        Err(DomainError::invariant(format!(
            "seat {player} is not the bid winner"
        )))
    }
}

fn set_connected(
    state: &mut GameState,
    player: PlayerIndex,
    connected: bool,
) -> Result<(), DomainError> {
    let seat = state
        .players
        .get_mut(player as usize)
        .ok_or_else(|| DomainError::invariant(format!("unknown seat {player}")))?;
    seat.connected = connected;
    Ok(())
}

/// Remove a card from a hand of views. The exact visible card is removed
/// when present; on a filtered hand one redacted placeholder stands in
/// for it so counts stay correct for every viewer.
fn remove_from_hand(hand: &mut Vec<CardView>, card: Card) -> Result<(), DomainError> {
    if let Some(pos) = hand.iter().position(|&v| v == CardView::Visible(card)) {
        hand.remove(pos);
        return Ok(());
    }
    if let Some(pos) = hand.iter().position(|&v| v.is_redacted()) {
        hand.remove(pos);
        return Ok(());
    }
    Err(DomainError::invariant(format!(
        "card {card} is not available in the hand"
    )))
}
