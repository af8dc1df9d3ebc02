//! Four-phase commute state machine driven by an external tick.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commute::roster::AgentRoster;
use crate::commute::world::{CommuteWorld, SpawnRequest};
use crate::events::{CityEvent, CityEventKind, EventSink};

/// The single global phase of the commute cycle.
///
/// `DispatchToWork -> CommutingToWork -> DispatchToHome -> CommutingToHome -> DispatchToWork`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CommutePhase {
    #[default]
    DispatchToWork,
    CommutingToWork,
    DispatchToHome,
    CommutingToHome,
}

impl CommutePhase {
    /// The phase this one hands over to.
    pub fn next(self) -> Self {
        match self {
            CommutePhase::DispatchToWork => CommutePhase::CommutingToWork,
            CommutePhase::CommutingToWork => CommutePhase::DispatchToHome,
            CommutePhase::DispatchToHome => CommutePhase::CommutingToHome,
            CommutePhase::CommutingToHome => CommutePhase::DispatchToWork,
        }
    }

    pub fn is_dispatch(self) -> bool {
        matches!(
            self,
            CommutePhase::DispatchToWork | CommutePhase::DispatchToHome
        )
    }
}

impl fmt::Display for CommutePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CommutePhase::DispatchToWork => "dispatch to work",
            CommutePhase::CommutingToWork => "commuting to work",
            CommutePhase::DispatchToHome => "dispatch to home",
            CommutePhase::CommutingToHome => "commuting to home",
        };
        f.write_str(label)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Ticks a commuting phase may last before a stall warning is reported. `None` disables it.
    pub stall_warning_ticks: Option<u64>,
}

impl SchedulerConfig {
    pub fn with_stall_warning_ticks(mut self, ticks: u64) -> Self {
        self.stall_warning_ticks = Some(ticks);
        self
    }
}

/// Drives repeated spawn waves for a fixed roster.
///
/// Each [`CommuteScheduler::tick`] performs at most one transition. Dispatch phases spawn one
/// agent per roster record and advance immediately; commuting phases advance only once the world
/// reports no active agents, so a new wave never starts while the previous one is under way.
#[derive(Clone, Debug)]
pub struct CommuteScheduler {
    roster: AgentRoster,
    config: SchedulerConfig,
    phase: CommutePhase,
    waves_dispatched: u64,
    completed_cycles: u64,
    ticks_in_phase: u64,
    stall_reported: bool,
}

impl CommuteScheduler {
    pub fn new(roster: AgentRoster) -> Self {
        Self::with_config(roster, SchedulerConfig::default())
    }

    pub fn with_config(roster: AgentRoster, config: SchedulerConfig) -> Self {
        Self {
            roster,
            config,
            phase: CommutePhase::DispatchToWork,
            waves_dispatched: 0,
            completed_cycles: 0,
            ticks_in_phase: 0,
            stall_reported: false,
        }
    }

    pub fn phase(&self) -> CommutePhase {
        self.phase
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    /// Spawn waves created so far.
    pub fn waves_dispatched(&self) -> u64 {
        self.waves_dispatched
    }

    /// Full home -> work -> home round trips finished so far.
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    /// Advance the cycle by one step and return the phase it ends in.
    pub fn tick(&mut self, world: &mut dyn CommuteWorld) -> CommutePhase {
        self.tick_with_events(world, &mut ())
    }

    pub fn tick_with_events(
        &mut self,
        world: &mut dyn CommuteWorld,
        sink: &mut dyn EventSink,
    ) -> CommutePhase {
        match self.phase {
            CommutePhase::DispatchToWork | CommutePhase::DispatchToHome => {
                self.dispatch(world, sink);
                self.switch_to(self.phase.next(), sink);
            }
            CommutePhase::CommutingToWork | CommutePhase::CommutingToHome => {
                let active = world.active_count();
                if active == 0 {
                    if self.phase == CommutePhase::CommutingToHome {
                        self.completed_cycles += 1;
                    }
                    self.switch_to(self.phase.next(), sink);
                } else {
                    self.ticks_in_phase += 1;
                    self.check_stall(active, sink);
                }
            }
        }
        self.phase
    }

    fn dispatch(&mut self, world: &mut dyn CommuteWorld, sink: &mut dyn EventSink) {
        let to_work = self.phase == CommutePhase::DispatchToWork;
        for record in self.roster.records() {
            let (origin, destination) = if to_work {
                (record.home, record.office)
            } else {
                (record.office, record.home)
            };
            world.spawn(SpawnRequest {
                name: format!("Agent {}", record.index),
                origin,
                destination,
            });
        }
        self.waves_dispatched += 1;

        debug!("Dispatched {} agents ({}).", self.roster.len(), self.phase);
        if sink.wants(CityEventKind::WaveDispatched) {
            sink.send(CityEvent::WaveDispatched {
                phase: self.phase,
                agents: self.roster.len(),
            });
        }
    }

    fn switch_to(&mut self, to: CommutePhase, sink: &mut dyn EventSink) {
        let from = self.phase;
        self.phase = to;
        self.ticks_in_phase = 0;
        self.stall_reported = false;

        info!("Switched regime => phase: {}.", to);
        if sink.wants(CityEventKind::PhaseSwitched) {
            sink.send(CityEvent::PhaseSwitched { from, to });
        }
    }

    fn check_stall(&mut self, active: usize, sink: &mut dyn EventSink) {
        let Some(limit) = self.config.stall_warning_ticks else {
            return;
        };
        if self.stall_reported || self.ticks_in_phase < limit {
            return;
        }
        self.stall_reported = true;

        warn!(
            "{} agents still active after {} ticks of '{}'; the cycle cannot advance until they arrive.",
            active, self.ticks_in_phase, self.phase
        );
        if sink.wants(CityEventKind::Warning) {
            sink.send(CityEvent::Warning {
                context: format!("phase:{}", self.phase),
                message: format!(
                    "{active} agents still active after {} ticks",
                    self.ticks_in_phase
                ),
            });
        }
    }
}
