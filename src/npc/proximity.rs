//! Nearest-neighbour lookup over NPC positions.
use bevy::math::Vec2;

/// Index of the closest position and its Euclidean distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub index: usize,
    pub distance: f32,
}

/// Linear scan; the first of several equidistant positions wins.
pub fn nearest<I>(positions: I, origin: Vec2) -> Option<Nearest>
where
    I: IntoIterator<Item = Vec2>,
{
    let mut best: Option<Nearest> = None;
    for (index, position) in positions.into_iter().enumerate() {
        let distance = origin.distance(position);
        match best {
            Some(current) if current.distance <= distance => {}
            _ => best = Some(Nearest { index, distance }),
        }
    }
    best
}
