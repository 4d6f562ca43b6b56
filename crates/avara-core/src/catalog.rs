//! Static event catalog.
//!
//! The per-region tables are the single source of truth. The flattened
//! global numbering used by the "Buy Ticket" flow (codes `1`..=`5`) is
//! derived by walking regions in declaration order, so the two numbering
//! schemes cannot drift apart.

use serde::Serialize;

/// One purchasable event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Stable event identifier (e.g. `E1`).
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Ticket price in KES.
    pub price: u32,
}

/// A region with its events, keyed by single-digit codes within the region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    /// Region display name.
    pub name: &'static str,
    /// Events in this region, in menu order.
    pub events: &'static [EventRecord],
}

/// All regions in menu order. Region codes are `1`-based indices into
/// this slice; global event codes are `1`-based indices into the
/// flattened event sequence.
pub const REGIONS: &[Region] = &[
    Region {
        name: "Nairobi",
        events: &[
            EventRecord { id: "E1", name: "Nairobi Tech Fest", price: 250 },
            EventRecord { id: "E2", name: "City Concert", price: 350 },
        ],
    },
    Region {
        name: "Kiambu",
        events: &[EventRecord { id: "E3", name: "Kiambu Expo", price: 150 }],
    },
    Region {
        name: "Kisumu",
        events: &[EventRecord { id: "E4", name: "Kisumu Music Night", price: 200 }],
    },
    Region {
        name: "Mombasa",
        events: &[EventRecord { id: "E5", name: "Mombasa Beach Party", price: 500 }],
    },
];

/// Iterate all events in flattened global order.
pub fn all_events() -> impl Iterator<Item = &'static EventRecord> {
    REGIONS.iter().flat_map(|r| r.events.iter())
}

/// Look up an event by its flattened global menu code (`"1"`..=`"5"`).
pub fn event_by_global_code(code: &str) -> Option<&'static EventRecord> {
    let n: usize = code.parse().ok()?;
    n.checked_sub(1).and_then(|i| all_events().nth(i))
}

/// Look up a region by its menu code (`"1"`..=`"4"`).
pub fn region_by_code(code: &str) -> Option<&'static Region> {
    let n: usize = code.parse().ok()?;
    n.checked_sub(1).and_then(|i| REGIONS.get(i))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
