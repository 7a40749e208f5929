//! Position bookkeeping for the gallery order

use crate::domain::entities::{Artwork, PositionUpdate};

/// Move the element at `source` so it ends up at `destination`.
///
/// Returns false and leaves the list untouched when the move is a no-op or
/// either index is out of range.
pub fn move_item<T>(items: &mut Vec<T>, source: usize, destination: usize) -> bool {
    if source == destination || source >= items.len() || destination >= items.len() {
        return false;
    }
    let item = items.remove(source);
    items.insert(destination, item);
    true
}

/// Set each artwork's position to its index in the slice
pub fn renumber(artworks: &mut [Artwork]) {
    for (index, artwork) in artworks.iter_mut().enumerate() {
        artwork.position = index as i32;
    }
}

/// Full `{id, position}` list for the slice in its current order
pub fn position_updates(artworks: &[Artwork]) -> Vec<PositionUpdate> {
    artworks
        .iter()
        .map(|a| PositionUpdate {
            id: a.id,
            position: a.position,
        })
        .collect()
}

/// Updates needed to make positions contiguous from 0.
///
/// `ordered` must already be sorted by position; relative order is kept and
/// only records whose position actually changes are returned.
pub fn compaction_plan(ordered: &[Artwork]) -> Vec<PositionUpdate> {
    ordered
        .iter()
        .enumerate()
        .filter(|(index, a)| a.position != *index as i32)
        .map(|(index, a)| PositionUpdate {
            id: a.id,
            position: index as i32,
        })
        .collect()
}

/// Whether positions form exactly 0..N-1 in slice order
pub fn is_contiguous(ordered: &[Artwork]) -> bool {
    ordered
        .iter()
        .enumerate()
        .all(|(index, a)| a.position == index as i32)
}
