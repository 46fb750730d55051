//! Experience thresholds and level progression.
//!
//! Levels run from 0 to [`MAX_LEVEL`]. Level 0 means a member has never been
//! evaluated against the table; a member advances from level `L` whenever
//! `xp >= XP_THRESHOLDS[L]`.

/// Cumulative XP required for each level transition (D&D 5e).
pub const XP_THRESHOLDS: [u32; 20] = [
    0, 300, 900, 2700, 6500, 14000, 23000, 34000, 48000, 64000, 85000, 100000, 120000, 140000,
    165000, 195000, 225000, 265000, 305000, 355000,
];

/// Highest reachable level.
pub const MAX_LEVEL: u8 = XP_THRESHOLDS.len() as u8;

/// One-shot evaluation: the level a member with `xp` experience holds.
///
/// This is the number of thresholds at or below `xp`.
pub fn level_for_xp(xp: u32) -> u8 {
    XP_THRESHOLDS
        .iter()
        .position(|&threshold| xp < threshold)
        .map(|idx| idx as u8)
        .unwrap_or(MAX_LEVEL)
}

/// Run the level-up state machine from `level` with `xp` experience.
///
/// Returns every level reached, in order. A single award can cross several
/// thresholds, so this loops until the next threshold is out of reach or
/// the table is exhausted.
pub fn level_ups(level: u8, xp: u32) -> Vec<u8> {
    let mut reached = Vec::new();
    let mut current = level;

    while current < MAX_LEVEL && xp >= XP_THRESHOLDS[current as usize] {
        current += 1;
        reached.push(current);
    }

    reached
}

/// XP still needed to reach the level after `level`, or `None` at max level.
pub fn xp_to_next_level(level: u8, xp: u32) -> Option<u32> {
    XP_THRESHOLDS
        .get(level as usize)
        .map(|&threshold| threshold.saturating_sub(xp))
}
