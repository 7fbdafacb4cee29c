//! Tick-driven battle engine.
//!
//! [`Simulator::simulate`] validates both snapshots, builds one
//! [`CombatState`](crate::CombatState) per combatant and advances battle time
//! in fixed ticks. Each tick regenerates shields, fires every attack whose
//! cooldown has elapsed, and evaluates termination:
//!
//! ```text
//! running ──► destroyed        (HP reached 0)
//!         ├─► yielded          (0 < HP% <= yield threshold)
//!         └─► time_expired     (tick budget exhausted, draw)
//! ```
//!
//! Supporting modules are pure: [`cooldown`] and [`regen`] compute timers and
//! shield gain, [`events`] and [`result`] describe what the loop produced.

mod battle;
pub mod cooldown;
pub mod events;
pub mod regen;
pub mod result;

pub use battle::{Simulator, simulate};
pub use events::{CombatEvent, EventKind, ResourceSnapshot, RollKind, RollRecord};
pub use result::{BattleOutcome, CombatResult, CombatantSummary, TopAttack};
