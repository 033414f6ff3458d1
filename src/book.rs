/// Order book state reconstructed from decoded quote updates
///
/// Maintains one live (quantity, side) per price level using a BTreeMap so
/// snapshots come out sorted by price. Updated incrementally by the Quotes
/// and OrdLog decoders; queried by consumers as an immutable snapshot.

use std::collections::BTreeMap;

use crate::protocol::{QuoteAction, QuoteUpdate, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub quantity: i64,
    pub side: Side,
}

#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    levels: BTreeMap<i64, Level>,
}

impl OrderBook {
    pub fn new() -> Self {
        OrderBook {
            levels: BTreeMap::new(),
        }
    }

    /// Apply one decoded update. Add and change both set the level outright;
    /// a non-positive quantity degrades to remove, since zero is the wire's
    /// way of clearing a level. Removing an absent price is a no-op —
    /// upstream data redundantly clears levels.
    pub fn apply(&mut self, update: &QuoteUpdate) {
        match update.action {
            QuoteAction::Add | QuoteAction::Change if update.quantity > 0 => {
                self.levels.insert(
                    update.price,
                    Level {
                        quantity: update.quantity,
                        side: update.side,
                    },
                );
            }
            _ => {
                self.levels.remove(&update.price);
            }
        }
    }

    /// All live levels, ascending by price. Pure read.
    pub fn snapshot(&self) -> Vec<(i64, Level)> {
        self.levels.iter().map(|(&p, &l)| (p, l)).collect()
    }

    /// Highest-priced live bid level.
    pub fn best_bid(&self) -> Option<(i64, i64)> {
        self.levels
            .iter()
            .rev()
            .find(|(_, l)| l.side == Side::Bid)
            .map(|(&p, l)| (p, l.quantity))
    }

    /// Lowest-priced live ask level.
    pub fn best_ask(&self) -> Option<(i64, i64)> {
        self.levels
            .iter()
            .find(|(_, l)| l.side == Side::Ask)
            .map(|(&p, l)| (p, l.quantity))
    }

    pub fn spread(&self) -> Option<i64> {
        match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) if bid < ask => Some(ask - bid),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Drop all levels. The OrdLog FLOW_START action signals a fresh
    /// replication cycle and resets the book.
    pub fn clear(&mut self) {
        self.levels.clear();
    }
}
