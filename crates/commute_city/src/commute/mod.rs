//! The home/office commute cycle.
//!
//! [`roster::AgentRoster`] fixes each agent's home and office once per city.
//! [`scheduler::CommuteScheduler`] then alternates dispatch and commute phases forever, spawning
//! agents through a [`world::CommuteWorld`] and polling how many are still under way.
pub mod roster;
pub mod scheduler;
pub mod world;
