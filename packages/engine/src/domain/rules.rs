//! Fixed numeric rule tables for Binokel.

pub const MIN_PLAYERS: u8 = 2;
pub const MAX_PLAYERS: u8 = 4;

/// 4 suits x 5 ranks x 2 copies.
pub const DECK_SIZE: usize = 40;

/// Lowest opening bid.
pub const MIN_BID: u16 = 150;
/// Every raise must land on this step.
pub const BID_STEP: u16 = 10;

/// Bonus credited to the side winning the last trick of a round.
pub const LAST_TRICK_BONUS: u16 = 10;

/// Cumulative score at which the game ends, unless overridden at start.
pub const DEFAULT_TARGET_SCORE: i32 = 1000;

/// Cards dealt to each player, by player count.
pub fn hand_size_for_players(player_count: u8) -> Option<u8> {
    match player_count {
        2 => Some(18),
        3 => Some(12),
        4 => Some(9),
        _ => None,
    }
}

/// Cards set aside as the dabb, by player count.
pub fn dabb_size_for_players(player_count: u8) -> Option<u8> {
    match player_count {
        2..=4 => Some(4),
        _ => None,
    }
}

/// Tricks played per round equals the dealt hand size.
pub fn tricks_per_round(player_count: u8) -> Option<u8> {
    hand_size_for_players(player_count)
}
