//! The world the scheduler spawns agents into, and an in-memory stand-in for it.
use glam::Vec3;
use tracing::debug;

/// Remaining distance (terrain units) below which an agent counts as arrived.
pub const ARRIVAL_DISTANCE: f32 = 0.5;

/// A request to create one moving agent.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    /// Display name, `"Agent {index}"`.
    pub name: String,
    pub origin: Vec3,
    pub destination: Vec3,
}

/// Host side of the commute cycle.
///
/// The world owns every spawned agent and removes it once it arrives. The scheduler never
/// touches agents after spawning them; it only polls [`CommuteWorld::active_count`].
pub trait CommuteWorld {
    fn spawn(&mut self, request: SpawnRequest);

    /// Number of spawned agents that have not arrived yet.
    fn active_count(&self) -> usize;
}

/// An agent moving in a straight line toward its destination.
#[derive(Clone, Debug, PartialEq)]
pub struct MovingAgent {
    pub name: String,
    pub position: Vec3,
    pub destination: Vec3,
}

impl MovingAgent {
    pub fn remaining_distance(&self) -> f32 {
        self.position.distance(self.destination)
    }
}

/// A [`CommuteWorld`] without navigation: agents travel in straight lines at a fixed speed and
/// are removed once within [`ARRIVAL_DISTANCE`] of their destination.
#[derive(Clone, Debug)]
pub struct SimulatedWorld {
    /// Travel speed in terrain units per second.
    pub speed: f32,
    agents: Vec<MovingAgent>,
    arrived: usize,
}

impl SimulatedWorld {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            agents: Vec::new(),
            arrived: 0,
        }
    }

    pub fn agents(&self) -> &[MovingAgent] {
        &self.agents
    }

    /// Total agents removed on arrival so far.
    pub fn arrived(&self) -> usize {
        self.arrived
    }

    /// Move every agent by `speed * dt` and remove the ones that arrived. Returns how many
    /// arrived during this step.
    pub fn advance(&mut self, dt: f32) -> usize {
        let step = (self.speed * dt).max(0.0);
        for agent in &mut self.agents {
            let to_target = agent.destination - agent.position;
            let dist = to_target.length();
            if dist <= step {
                agent.position = agent.destination;
            } else if dist > 0.0 {
                agent.position += to_target / dist * step;
            }
        }

        let before = self.agents.len();
        self.agents.retain(|agent| {
            let arrived = agent.remaining_distance() < ARRIVAL_DISTANCE;
            if arrived {
                debug!("{} arrived.", agent.name);
            }
            !arrived
        });
        let arrived = before - self.agents.len();
        self.arrived += arrived;
        arrived
    }
}

impl Default for SimulatedWorld {
    fn default() -> Self {
        Self::new(3.5)
    }
}

impl CommuteWorld for SimulatedWorld {
    fn spawn(&mut self, request: SpawnRequest) {
        self.agents.push(MovingAgent {
            name: request.name,
            position: request.origin,
            destination: request.destination,
        });
    }

    fn active_count(&self) -> usize {
        self.agents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, origin: Vec3, destination: Vec3) -> SpawnRequest {
        SpawnRequest {
            name: name.into(),
            origin,
            destination,
        }
    }

    #[test]
    fn agents_are_removed_once_within_arrival_distance() {
        let mut world = SimulatedWorld::new(1.0);
        world.spawn(request("Agent 0", Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)));
        assert_eq!(world.active_count(), 1);

        // 1.0 left after the first step.
        assert_eq!(world.advance(1.0), 0);
        assert_eq!(world.active_count(), 1);
        assert!((world.agents()[0].remaining_distance() - 1.0).abs() < 1e-5);

        // 0.4 left: below the threshold.
        assert_eq!(world.advance(0.6), 1);
        assert_eq!(world.active_count(), 0);
        assert_eq!(world.arrived(), 1);
    }

    #[test]
    fn faster_agents_arrive_first() {
        let mut world = SimulatedWorld::new(5.0);
        world.spawn(request("Agent 0", Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0)));
        world.spawn(request("Agent 1", Vec3::ZERO, Vec3::new(30.0, 0.0, 40.0)));
        assert_eq!(world.advance(1.0), 1);
        assert_eq!(world.agents()[0].name, "Agent 1");
        for _ in 0..9 {
            world.advance(1.0);
        }
        assert_eq!(world.active_count(), 0);
        assert_eq!(world.arrived(), 2);
    }

    #[test]
    fn zero_speed_never_arrives() {
        let mut world = SimulatedWorld::new(0.0);
        world.spawn(request("Agent 0", Vec3::ZERO, Vec3::X * 10.0));
        for _ in 0..10 {
            assert_eq!(world.advance(1.0), 0);
        }
        assert_eq!(world.active_count(), 1);
    }
}
