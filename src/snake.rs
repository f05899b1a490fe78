use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::grid::{Direction, Pos, PosDelta};

/// The snek: an ordered body with the head at index 0, plus a membership set
/// kept in lockstep for O(1) occupancy checks. The two views are only ever
/// mutated together.
#[derive(Debug)]
pub struct Snek {
    body: VecDeque<Pos>,
    cells: HashSet<Pos>,
    direction: Direction,
    pending_turn: Option<Direction>,
    grow_pending: bool,
}

impl Snek {
    pub fn new(head: Pos, length: usize, direction: Direction) -> Self {
        let back: PosDelta = direction.opposite().into();

        let mut body = VecDeque::with_capacity(length);
        let mut cells = HashSet::with_capacity(length);
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            cells.insert(segment);
            segment = segment.offset(back);
        }

        Snek {
            body,
            cells,
            direction,
            pending_turn: None,
            grow_pending: false,
        }
    }

    pub fn head(&self) -> Pos {
        self.body[0]
    }

    pub fn tail(&self) -> Pos {
        *self.body.back().expect("snek body is never empty")
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn segments(&self) -> &VecDeque<Pos> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    /// Requests a turn to apply on the next slither. A request for the exact
    /// opposite of the current direction is dropped; this checks the current
    /// direction, not the pending one, so a pair of quick keypresses cannot
    /// smuggle in a reversal. Later valid requests within a tick supersede
    /// earlier ones.
    pub fn request_turn(&mut self, new_direction: Direction) {
        if new_direction == self.direction.opposite() {
            return;
        }
        self.pending_turn = Some(new_direction);
    }

    /// Applies the most recent valid turn request, if any.
    pub fn commit_turn(&mut self) {
        if let Some(new_direction) = self.pending_turn.take() {
            if new_direction != self.direction {
                debug!(
                    "Direction changed: {:?} -> {:?}",
                    self.direction, new_direction
                );
                self.direction = new_direction;
            }
        }
    }

    /// Where the head lands on the next slither. Pure; commits nothing.
    pub fn next_head(&self) -> Pos {
        self.head().offset(self.direction.into())
    }

    /// Commits a move to `new_head`. With growth pending the tail stays put
    /// and the flag clears; otherwise the tail pops first, so slithering into
    /// the cell the tail vacates keeps the membership set exact.
    pub fn slither_to(&mut self, new_head: Pos) -> Pos {
        if self.grow_pending {
            self.grow_pending = false;
            debug!("Snek grew to length {}", self.body.len() + 1);
        } else if let Some(tail) = self.body.pop_back() {
            self.cells.remove(&tail);
        }

        self.body.push_front(new_head);
        self.cells.insert(new_head);
        new_head
    }

    /// Schedules growth for the next slither. Idempotent within a tick.
    pub fn grow(&mut self) {
        self.grow_pending = true;
    }

    /// True when the tail cell frees up on the next slither, which makes
    /// moving into it legal.
    pub fn tail_will_vacate(&self) -> bool {
        !self.grow_pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(snek: &mut Snek) -> Pos {
        snek.commit_turn();
        let next = snek.next_head();
        snek.slither_to(next)
    }

    #[test]
    fn test_new_snek_layout() {
        let snek = Snek::new(Pos::new(5, 5), 3, Direction::Right);

        assert_eq!(snek.len(), 3);
        assert_eq!(snek.head(), Pos::new(5, 5));
        assert_eq!(snek.segments()[1], Pos::new(5, 4));
        assert_eq!(snek.segments()[2], Pos::new(5, 3));
        assert_eq!(snek.tail(), Pos::new(5, 3));
        assert_eq!(snek.direction(), Direction::Right);
    }

    #[test]
    fn test_membership_set_matches_body() {
        let mut snek = Snek::new(Pos::new(5, 5), 3, Direction::Right);

        assert!(snek.occupies(snek.head()));
        assert!(snek.occupies(Pos::new(5, 4)));
        assert!(snek.occupies(Pos::new(5, 3)));
        assert_eq!(snek.cells.len(), snek.body.len());

        // Still in sync after a mix of plain moves and growth
        step(&mut snek);
        snek.grow();
        step(&mut snek);
        snek.request_turn(Direction::Down);
        step(&mut snek);

        assert!(snek.occupies(snek.head()));
        assert_eq!(snek.cells.len(), snek.body.len());
        for pos in snek.segments() {
            assert!(snek.occupies(*pos));
        }
    }

    #[test]
    fn test_translation_keeps_length() {
        let mut snek = Snek::new(Pos::new(5, 5), 3, Direction::Right);

        for _ in 0..4 {
            step(&mut snek);
        }

        assert_eq!(snek.head(), Pos::new(5, 9));
        assert_eq!(snek.len(), 3);
        assert!(!snek.occupies(Pos::new(5, 5)));
    }

    #[test]
    fn test_opposite_turn_is_rejected() {
        let mut snek = Snek::new(Pos::new(5, 7), 3, Direction::Right);

        snek.request_turn(Direction::Left);
        step(&mut snek);

        assert_eq!(snek.direction(), Direction::Right);
        assert_eq!(snek.head(), Pos::new(5, 8));
    }

    #[test]
    fn test_turn_requests_coalesce() {
        let mut snek = Snek::new(Pos::new(5, 5), 3, Direction::Right);

        // Latest valid request wins
        snek.request_turn(Direction::Up);
        snek.request_turn(Direction::Down);
        step(&mut snek);
        assert_eq!(snek.direction(), Direction::Down);
        assert_eq!(snek.head(), Pos::new(6, 5));

        // An invalid request leaves an earlier valid one queued
        let mut snek = Snek::new(Pos::new(5, 5), 3, Direction::Right);
        snek.request_turn(Direction::Up);
        snek.request_turn(Direction::Left);
        step(&mut snek);
        assert_eq!(snek.direction(), Direction::Up);
        assert_eq!(snek.head(), Pos::new(4, 5));
    }

    #[test]
    fn test_growth_is_deferred_one_move() {
        let mut snek = Snek::new(Pos::new(5, 5), 3, Direction::Right);

        snek.grow();
        assert_eq!(snek.len(), 3);

        step(&mut snek);
        assert_eq!(snek.len(), 4);
        assert_eq!(snek.tail(), Pos::new(5, 3));

        step(&mut snek);
        assert_eq!(snek.len(), 4);
    }

    #[test]
    fn test_grow_is_idempotent_within_a_tick() {
        let mut snek = Snek::new(Pos::new(5, 5), 3, Direction::Right);

        snek.grow();
        snek.grow();
        snek.grow();

        step(&mut snek);
        assert_eq!(snek.len(), 4);

        step(&mut snek);
        assert_eq!(snek.len(), 4);
    }

    #[test]
    fn test_slither_into_vacating_tail_cell() {
        // Build a 2x2 loop by hand: head at (0, 1), tail at (0, 0)
        let mut snek = Snek::new(Pos::new(0, 0), 1, Direction::Right);
        for pos in [Pos::new(1, 0), Pos::new(1, 1), Pos::new(0, 1)] {
            snek.grow();
            snek.slither_to(pos);
        }
        assert_eq!(snek.len(), 4);
        assert_eq!(snek.tail(), Pos::new(0, 0));
        assert!(snek.tail_will_vacate());

        // Moving into the cell the tail vacates this move keeps both views exact
        snek.slither_to(Pos::new(0, 0));

        assert_eq!(snek.len(), 4);
        assert_eq!(snek.head(), Pos::new(0, 0));
        assert!(snek.occupies(Pos::new(0, 0)));
        assert_eq!(snek.cells.len(), 4);
    }

    #[test]
    fn test_tail_stays_while_growth_pending() {
        let mut snek = Snek::new(Pos::new(5, 5), 3, Direction::Right);

        assert!(snek.tail_will_vacate());
        snek.grow();
        assert!(!snek.tail_will_vacate());
        step(&mut snek);
        assert!(snek.tail_will_vacate());
    }
}
