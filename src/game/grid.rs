//! Grid coordinate helpers.
//!
//! Cells are addressed by a letter (column) plus 1-indexed number (row)
//! label, e.g. `"B4"`. All functions here are pure; the board owns the
//! occupancy state.

use crate::config::game::BLOCK_SIZE;
use crate::game::types::Position;

/// Column alphabet. It omits `W`; kept as-is so cell labels stay stable.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVXYZ";

/// Convert a cell label to the pixel coordinates of its top-left corner.
///
/// Labels are case-insensitive. Malformed labels are a precondition
/// violation and panic.
pub fn to_coords(label: &str) -> Position {
    let label = label.to_ascii_uppercase();
    let mut chars = label.chars();
    let column = chars
        .next()
        .and_then(|c| ALPHABET.find(c))
        .expect("malformed cell label: bad column letter");
    let row: i32 = chars
        .as_str()
        .parse()
        .expect("malformed cell label: bad row number");
    Position::new(column as i32 * BLOCK_SIZE, (row - 1) * BLOCK_SIZE)
}

/// Convert pixel coordinates back to the label of the nearest cell.
pub fn to_label(x: i32, y: i32) -> String {
    let column = (nearest_grid_multiple(x, &[]) / BLOCK_SIZE) as usize;
    let row = nearest_grid_multiple(y, &[]) / BLOCK_SIZE + 1;
    let letter = ALPHABET.as_bytes()[column] as char;
    format!("{letter}{row}")
}

/// Snap a pixel coordinate to the nearest multiple of the cell size.
///
/// If the nearest multiple's index is in `forbidden`, step one multiple
/// further in the direction the true value leans: down when the exact
/// factor is below the snapped index, up otherwise. Negative inputs clamp
/// to 0.
pub fn nearest_grid_multiple(n: i32, forbidden: &[i32]) -> i32 {
    let n = n.max(0);
    let factor = f64::from(n) / f64::from(BLOCK_SIZE);
    let mut index = factor.round() as i32;
    if forbidden.contains(&index) {
        if factor < f64::from(index) {
            index -= 1;
        } else {
            index += 1;
        }
    }
    index * BLOCK_SIZE
}

/// Square proximity test: true when `point` lies strictly within `range`
/// of `center` on both axes independently. With `range` equal to the cell
/// size this detects same-cell overlap.
pub fn collides(center: Position, point: Position, range: i32) -> bool {
    point.x > center.x - range
        && point.x < center.x + range
        && point.y > center.y - range
        && point.y < center.y + range
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::game::NR_ROWS;

    #[test]
    fn labels_round_trip_over_the_whole_grid() {
        for column in 0..NR_ROWS as usize {
            for row in 1..=NR_ROWS {
                let letter = ALPHABET.as_bytes()[column] as char;
                let label = format!("{letter}{row}");
                let pos = to_coords(&label);
                assert_eq!(to_label(pos.x, pos.y), label);
            }
        }
    }

    #[test]
    fn labels_are_case_insensitive() {
        assert_eq!(to_coords("b4"), to_coords("B4"));
    }

    #[test]
    fn alphabet_skips_w() {
        assert!(!ALPHABET.contains('W'));
        assert_eq!(ALPHABET.len(), 25);
    }

    #[test]
    fn nearest_multiple_snaps_and_clamps() {
        assert_eq!(nearest_grid_multiple(0, &[]), 0);
        assert_eq!(nearest_grid_multiple(29, &[]), 0);
        assert_eq!(nearest_grid_multiple(31, &[]), 60);
        assert_eq!(nearest_grid_multiple(-45, &[]), 0);
    }

    #[test]
    fn nearest_multiple_avoids_forbidden_indices() {
        let forbidden = [1, 3, 5, 7, 9, 11];
        // 59/60 leans below index 1, so the snap steps down to 0.
        assert_eq!(nearest_grid_multiple(59, &forbidden), 0);
        // 61/60 leans above index 1, so the snap steps up to 2.
        assert_eq!(nearest_grid_multiple(61, &forbidden), 120);
        for n in 0..780 {
            let snapped = nearest_grid_multiple(n, &forbidden);
            assert!(!forbidden.contains(&(snapped / BLOCK_SIZE)), "n={n}");
        }
    }

    #[test]
    fn collides_uses_strict_inequality() {
        let center = Position::new(120, 120);
        assert!(collides(center, Position::new(120, 120), BLOCK_SIZE));
        assert!(collides(center, Position::new(179, 120), BLOCK_SIZE));
        assert!(!collides(center, Position::new(180, 120), BLOCK_SIZE));
        assert!(!collides(center, Position::new(120, 60), BLOCK_SIZE));
        // one axis inside is not enough
        assert!(!collides(center, Position::new(121, 200), BLOCK_SIZE));
    }
}
