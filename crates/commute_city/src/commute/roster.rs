//! Fixed home/office assignment per agent.
use glam::Vec3;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::sampling::range_index;

/// One agent's fixed home and office positions in terrain space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentRecord {
    pub index: usize,
    pub home: Vec3,
    pub office: Vec3,
}

/// All agents of a city, in index order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AgentRoster {
    records: Vec<AgentRecord>,
}

impl AgentRoster {
    /// Give each of `agent_count` agents a uniformly drawn house and an independently drawn
    /// office. Draws are with replacement, so agents may share either.
    pub fn assign(
        houses: &[Vec3],
        offices: &[Vec3],
        agent_count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        if houses.is_empty() {
            return Err(Error::EmptyCollection { what: "houses" });
        }
        if offices.is_empty() {
            return Err(Error::EmptyCollection { what: "offices" });
        }

        let records = (0..agent_count)
            .map(|index| {
                let h = range_index(rng, 0, houses.len());
                let o = range_index(rng, 0, offices.len());
                AgentRecord {
                    index,
                    home: houses[h],
                    office: offices[o],
                }
            })
            .collect::<Vec<_>>();

        debug!(
            "Assigned {} agents across {} houses and {} offices.",
            records.len(),
            houses.len(),
            offices.len()
        );
        Ok(Self { records })
    }

    pub fn from_layout(layout: &Layout, agent_count: usize, rng: &mut dyn RngCore) -> Result<Self> {
        Self::assign(
            &layout.house_positions(),
            &layout.office_positions(),
            agent_count,
            rng,
        )
    }

    pub fn records(&self) -> &[AgentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn homes(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.records.iter().map(|r| r.home)
    }

    pub fn offices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.records.iter().map(|r| r.office)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn single_office_two_houses() {
        let h0 = Vec3::new(1.0, 0.0, 2.0);
        let h1 = Vec3::new(-3.0, 0.0, 4.0);
        let o0 = Vec3::new(0.0, 0.0, -7.0);
        let mut rng = StdRng::seed_from_u64(5);
        let roster = AgentRoster::assign(&[h0, h1], &[o0], 5, &mut rng).unwrap();

        assert_eq!(roster.len(), 5);
        for (i, r) in roster.records().iter().enumerate() {
            assert_eq!(r.index, i);
            assert_eq!(r.office, o0);
            assert!(r.home == h0 || r.home == h1);
        }
    }

    #[test]
    fn draws_with_replacement() {
        let houses: Vec<Vec3> = (0..3).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let offices = vec![Vec3::Z, Vec3::X];
        let mut rng = StdRng::seed_from_u64(6);
        let roster = AgentRoster::assign(&houses, &offices, 50, &mut rng).unwrap();
        assert_eq!(roster.len(), 50);
        // 50 agents over 3 houses must share.
        let h0 = roster.homes().filter(|h| *h == houses[0]).count();
        assert!(h0 > 1);
        assert!(roster.offices().any(|o| o == Vec3::Z));
        assert!(roster.offices().any(|o| o == Vec3::X));
    }

    #[test]
    fn empty_sources_are_rejected() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            AgentRoster::assign(&[], &[Vec3::ZERO], 1, &mut rng),
            Err(Error::EmptyCollection { what: "houses" })
        ));
        assert!(matches!(
            AgentRoster::assign(&[Vec3::ZERO], &[], 1, &mut rng),
            Err(Error::EmptyCollection { what: "offices" })
        ));
    }

    #[test]
    fn zero_agents_is_an_empty_roster() {
        let mut rng = StdRng::seed_from_u64(8);
        let roster = AgentRoster::assign(&[Vec3::ZERO], &[Vec3::ONE], 0, &mut rng).unwrap();
        assert!(roster.is_empty());
    }
}
