use crate::model::PlayerRecord;

/// Rows shown in the player table.
pub const RECENT_PLAYER_LIMIT: usize = 10;

/// The `limit` most recently active players, newest first.
///
/// The sort is stable, so players with the same timestamp keep their
/// server order. Players without a readable timestamp go last.
pub fn recent_players(players: &[PlayerRecord], limit: usize) -> Vec<&PlayerRecord> {
    let mut ranked: Vec<&PlayerRecord> = players.iter().collect();
    ranked.sort_by(|a, b| b.last_modification.cmp(&a.last_modification));
    ranked.truncate(limit);
    ranked
}
