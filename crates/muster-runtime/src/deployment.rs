//! Grouped circular deployment of herds into a paddock.
//!
//! Herd centers are drawn uniformly from a disc around the deployment
//! center, members uniformly from a smaller disc around their herd
//! center. Uniformity over a disc needs the `r = R * sqrt(u)` rule; a
//! plain uniform radius would pile agents up near the center.

use muster_core::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::world_impl::Paddock;

/// Placement parameters for one simulation's starting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Center of the whole deployment.
    pub center: Vector2D,
    /// Radius of the disc herd centers are drawn from.
    pub herd_spread: f64,
    /// Radius of the disc each herd's members are drawn from.
    pub group_radius: f64,
    /// Members per herd.
    pub agents_per_herd: usize,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            center: Vector2D::ZERO,
            herd_spread: 40.0,
            group_radius: 6.0,
            agents_per_herd: 10,
        }
    }
}

impl DeploymentConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("herd_spread", self.herd_spread),
            ("group_radius", self.group_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MusterError::invalid_config(
                    field,
                    value.to_string(),
                    "must be non-negative and finite",
                ));
            }
        }
        if self.agents_per_herd == 0 {
            return Err(MusterError::invalid_config(
                "agents_per_herd",
                "0",
                "every herd needs at least one member",
            ));
        }
        Ok(())
    }
}

/// Uniform point in a disc of the given radius.
fn disc_point(radius: f64, rng: &mut StdRng) -> Vector2D {
    let r = radius * rng.gen::<f64>().sqrt();
    let theta = rng.gen_range(0.0..TAU);
    Vector2D::new(r * theta.cos(), r * theta.sin())
}

/// Place `number_of_herds * agents_per_herd` agents into the paddock,
/// each with a uniformly random initial heading.
pub fn deploy(
    paddock: &mut Paddock,
    number_of_herds: u32,
    config: &DeploymentConfig,
    rng: &mut StdRng,
) -> Result<Vec<AgentId>> {
    config.validate()?;
    let mut deployed = Vec::with_capacity(number_of_herds as usize * config.agents_per_herd);
    for herd in 0..number_of_herds {
        let herd_center = config.center + disc_point(config.herd_spread, rng);
        for _ in 0..config.agents_per_herd {
            let position = herd_center + disc_point(config.group_radius, rng);
            let heading = Vector2D::from_angle(rng.gen_range(0.0..TAU));
            deployed.push(paddock.insert(HerdId(herd), position, heading));
        }
    }
    Ok(deployed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn agents_land_within_the_configured_discs() {
        let config = DeploymentConfig {
            center: Vector2D::new(10.0, -5.0),
            herd_spread: 20.0,
            group_radius: 4.0,
            agents_per_herd: 25,
        };
        let mut paddock = Paddock::new();
        let mut rng = StdRng::seed_from_u64(7);
        let deployed = deploy(&mut paddock, 3, &config, &mut rng).unwrap();

        assert_eq!(deployed.len(), 75);
        assert_eq!(paddock.len(), 75);
        let max_distance = config.herd_spread + config.group_radius;
        for agent in paddock.agents() {
            let distance = agent.position.distance_to(&config.center);
            assert!(
                distance <= max_distance + 1e-9,
                "agent at distance {} beyond {}",
                distance,
                max_distance
            );
            assert!((agent.heading.magnitude() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn members_cluster_around_their_herd_center() {
        let config = DeploymentConfig {
            center: Vector2D::ZERO,
            herd_spread: 100.0,
            group_radius: 2.0,
            agents_per_herd: 8,
        };
        let mut paddock = Paddock::new();
        let mut rng = StdRng::seed_from_u64(11);
        deploy(&mut paddock, 2, &config, &mut rng).unwrap();

        for herd in [HerdId(0), HerdId(1)] {
            let members: Vec<_> = paddock
                .agents()
                .iter()
                .filter(|agent| agent.herd == herd)
                .collect();
            assert_eq!(members.len(), 8);
            for pair in members.windows(2) {
                let spread = pair[0].position.distance_to(&pair[1].position);
                assert!(spread <= 2.0 * config.group_radius + 1e-9);
            }
        }
    }

    #[test]
    fn empty_herds_are_rejected() {
        let config = DeploymentConfig {
            agents_per_herd: 0,
            ..DeploymentConfig::default()
        };
        let mut paddock = Paddock::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(deploy(&mut paddock, 1, &config, &mut rng).is_err());
    }
}
