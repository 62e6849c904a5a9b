//! Deterministic unit names.
//!
//! Converted units receive fresh names. Names are the lowest indices not
//! held by any unit on the map (transported units and the units being
//! replaced included), handed out in position order.

use im::OrdMap;
use rustc_hash::FxHashSet;

use crate::core::{Snapshot, Unit, Vector};

/// Give every unit in `units` a name not used anywhere on the map.
///
/// `units` is visited in position order (row-major), so the same input
/// always produces the same names. A replaced unit's own name is never
/// handed back to its replacement.
#[must_use]
pub fn assign_unit_names(snapshot: &Snapshot, units: OrdMap<Vector, Unit>) -> OrdMap<Vector, Unit> {
    let mut taken: FxHashSet<u32> = snapshot.units().values().flat_map(Unit::names).collect();
    // Passengers of the incoming units keep their names.
    taken.extend(
        units
            .values()
            .flat_map(|unit| unit.transports.iter().flat_map(Unit::names)),
    );

    let mut next = 0u32;
    units
        .into_iter()
        .map(|(position, unit)| {
            while taken.contains(&next) {
                next += 1;
            }
            taken.insert(next);
            (position, unit.with_name(next))
        })
        .collect()
}
