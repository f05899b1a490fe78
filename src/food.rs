use log::{debug, warn};
use rand::Rng;

use crate::config::GameConfig;
use crate::grid::{manhattan, Pos, Size};
use crate::snake::Snek;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Morsel {
    pub pos: Pos,
}

/// Outcome of trying to place a morsel. `PenFull` is the snek-fills-the-pen
/// terminal condition, not an error.
#[derive(Debug, PartialEq)]
pub enum Spawn {
    Placed(Morsel),
    PenFull,
}

impl Morsel {
    /// Places a morsel on a free cell, preferring one at least
    /// `min_morsel_distance` from the head so a fresh morsel never lands in
    /// the snek's mouth on a crowded board.
    ///
    /// Random draws are bounded by `spawn_attempts`; the best (farthest) free
    /// draw is kept as a fallback. If every draw hits the snek, the interior
    /// is scanned outright, so a lone free cell is always found.
    pub fn spawn(rng: &mut impl Rng, arena: Size, snek: &Snek, config: &GameConfig) -> Spawn {
        if snek.len() >= arena.area() {
            return Spawn::PenFull;
        }

        debug!("Spawning morsel, snek length: {}", snek.len());

        let mut best: Option<(Pos, u16)> = None;
        for _ in 0..config.spawn_attempts {
            let pos = Pos::new(
                rng.gen_range(0..arena.height) as i16,
                rng.gen_range(0..arena.width) as i16,
            );

            if snek.occupies(pos) {
                continue;
            }

            let distance = manhattan(pos, snek.head());
            if distance >= config.min_morsel_distance {
                debug!("Morsel spawned at {:?}, distance from head: {}", pos, distance);
                return Spawn::Placed(Morsel { pos });
            }

            if best.map_or(true, |(_, d)| distance > d) {
                best = Some((pos, distance));
            }
        }

        if let Some((pos, distance)) = best {
            warn!(
                "Morsel spawned close to the snek at {:?}, distance: {}",
                pos, distance
            );
            return Spawn::Placed(Morsel { pos });
        }

        // Every random draw hit the snek, but the length check above says a
        // free cell exists. Scan for it, farthest from the head first.
        let mut fallback: Option<(Pos, u16)> = None;
        for row in 0..arena.height as i16 {
            for col in 0..arena.width as i16 {
                let pos = Pos::new(row, col);
                if snek.occupies(pos) {
                    continue;
                }
                let distance = manhattan(pos, snek.head());
                if fallback.map_or(true, |(_, d)| distance > d) {
                    fallback = Some((pos, distance));
                }
            }
        }

        match fallback {
            Some((pos, distance)) => {
                warn!("Morsel spawned by exhaustive scan at {:?}, distance: {}", pos, distance);
                Spawn::Placed(Morsel { pos })
            }
            None => Spawn::PenFull,
        }
    }
}
