//! Powers: the one-time board effects of activated skills.

pub mod naming;
pub mod resolver;
pub mod vision;

pub use naming::assign_unit_names;
pub use resolver::{
    apply_power, power_opponent_effect, power_unit_upgrade, units_to_damage, PowerResolver,
};
pub use vision::{FullVision, Vision};
