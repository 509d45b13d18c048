//! Board Model
//!
//! Items waiting in a pool and a row of single-occupant drop zones.

#[derive(Debug, Clone, PartialEq)]
pub struct BoardItem {
    pub id: u32,
    pub label: String,
}

/// Where an item currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Pool(usize),
    Zone(usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub pool: Vec<BoardItem>,
    pub zones: Vec<Option<BoardItem>>,
}

/// Result of a completed drop
#[derive(Debug, Clone, PartialEq)]
pub struct DropOutcome {
    /// Prior occupant of the zone, cleared by the drop
    pub evicted: Option<BoardItem>,
}

impl Board {
    pub fn new(items: Vec<BoardItem>, zone_count: usize) -> Self {
        Self {
            pool: items,
            zones: vec![None; zone_count],
        }
    }

    pub fn locate(&self, item_id: u32) -> Option<Slot> {
        if let Some(i) = self.pool.iter().position(|item| item.id == item_id) {
            return Some(Slot::Pool(i));
        }
        self.zones
            .iter()
            .position(|zone| zone.as_ref().is_some_and(|item| item.id == item_id))
            .map(Slot::Zone)
    }

    /// Move `item_id` into `zone`, clearing whatever the zone held.
    ///
    /// Returns `None` when the drop is a no-op: unknown item or zone, or
    /// the item already sits in that zone.
    pub fn drop_item(&mut self, item_id: u32, zone: usize) -> Option<DropOutcome> {
        if zone >= self.zones.len() {
            return None;
        }
        let item = match self.locate(item_id)? {
            Slot::Zone(current) if current == zone => return None,
            Slot::Zone(current) => self.zones[current].take()?,
            Slot::Pool(i) => self.pool.remove(i),
        };
        let evicted = self.zones[zone].replace(item);
        Some(DropOutcome { evicted })
    }

    pub fn occupant(&self, zone: usize) -> Option<&BoardItem> {
        self.zones.get(zone).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: u32) -> BoardItem {
        BoardItem { id, label: format!("Item {}", id) }
    }

    fn make_board() -> Board {
        Board::new(vec![make_item(1), make_item(2), make_item(3)], 2)
    }

    #[test]
    fn test_drop_moves_item_out_of_pool() {
        let mut board = make_board();

        let outcome = board.drop_item(2, 0).expect("drop should succeed");

        assert_eq!(outcome.evicted, None);
        assert_eq!(board.occupant(0), Some(&make_item(2)));
        assert_eq!(board.pool.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(board.locate(2), Some(Slot::Zone(0)));
    }

    #[test]
    fn test_drop_clears_prior_occupant() {
        let mut board = make_board();
        board.drop_item(1, 1);

        let outcome = board.drop_item(3, 1).expect("drop should succeed");

        assert_eq!(outcome.evicted, Some(make_item(1)));
        assert_eq!(board.occupant(1), Some(&make_item(3)));
        assert_eq!(board.locate(1), None);
    }

    #[test]
    fn test_drop_between_zones_vacates_origin() {
        let mut board = make_board();
        board.drop_item(1, 0);

        board.drop_item(1, 1).expect("drop should succeed");

        assert_eq!(board.occupant(0), None);
        assert_eq!(board.occupant(1), Some(&make_item(1)));
    }

    #[test]
    fn test_invalid_drops_are_noops() {
        let mut board = make_board();
        board.drop_item(1, 0);
        let before = board.clone();

        assert_eq!(board.drop_item(1, 0), None); // same zone
        assert_eq!(board.drop_item(99, 1), None); // unknown item
        assert_eq!(board.drop_item(2, 5), None); // unknown zone
        assert_eq!(board, before);
    }
}
