//! Per-tick movement decisions for a single herd agent.
//!
//! A [`HerdEngine`] is built once per agent and stepped once per tick.
//! Each step aligns the agent's heading with nearby herd mates, runs the
//! zone priority scan, applies noise and the trailer speed-up, possibly
//! turns the heading back toward the world origin, and finally rotates
//! the winning agent-local movement into world space. The engine never
//! touches the world; the host applies the returned [`Decision`].

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{MusterError, Result};
use crate::movement::MovementProvider;
use crate::shape::ZoneShape;
use crate::types::{local_to_world_rotation, AgentId, HerdId, Vector2D};
use crate::world::World;
use crate::zone::{AttractionZone, NeutralZone, RearZone, StressZone, Zone};

/// Forward-to-lateral ratio of the stress ellipse.
const STRESS_ZONE_ELLIPSE_RATIO: f64 = 2.0;

/// Angular opening of the sector-shaped zones.
const ZONE_SECTOR_ANGLE: f64 = PI;

/// Turning chance for an agent with nothing detected in any zone.
const LONE_AGENT_TURN_PROBABILITY: f64 = 0.5;

/// Misalignment ratio beyond which the agent is considered to face
/// nearly opposite the origin and either turn direction is accepted.
const OPPOSITE_ALIGNMENT_RATIO: f64 = 0.9;

// Stream salts for per-agent seed derivation. Each derived stream must
// stay independent of the others or draws in one zone would shift the
// draws of every zone after it.
const SALT_STRESS: u64 = 0;
const SALT_NEUTRAL: u64 = 1;
const SALT_ATTRACTION: u64 = 2;
const SALT_REAR: u64 = 3;
const SALT_REAR_SLOWDOWN: u64 = 4;
const SALT_FALLBACK: u64 = 5;
const SALT_ENGINE: u64 = 6;
const SALT_TURN_DIRECTION: u64 = 7;
const SALT_TURN_FORCE: u64 = 8;

/// A multiplier applied with some probability per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticFactor {
    pub factor: f64,
    pub probability: f64,
}

/// Full configuration for one agent's behavior engine.
///
/// All agents in a simulation usually share one config; per-agent
/// variation comes from the seed derivation, not from the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub stress_zone_radius: f64,
    pub neutral_zone_radius: f64,
    pub attraction_zone_radius: f64,
    pub rear_zone_radius: f64,
    pub lateral_velocity: f64,
    pub forward_velocity: f64,
    pub p_left: f64,
    pub p_forward: f64,
    pub p_right: f64,
    pub repulsion_factor: f64,
    pub speed_up_factor: f64,
    pub leader_slow_down: ProbabilisticFactor,
    pub trailer_speed_up: ProbabilisticFactor,
    pub number_of_herds: u32,
    pub radius_preference: f64,
    pub noise_amplitude: f64,
    pub maintain_direction_weight: f64,
    pub turning_probability_inside_world: f64,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stress_zone_radius: 2.0,
            neutral_zone_radius: 8.0,
            attraction_zone_radius: 15.0,
            rear_zone_radius: 10.0,
            lateral_velocity: 0.5,
            forward_velocity: 1.0,
            p_left: 0.25,
            p_forward: 0.5,
            p_right: 0.25,
            repulsion_factor: 0.5,
            speed_up_factor: 1.5,
            leader_slow_down: ProbabilisticFactor {
                factor: 0.5,
                probability: 0.5,
            },
            trailer_speed_up: ProbabilisticFactor {
                factor: 2.0,
                probability: 0.3,
            },
            number_of_herds: 1,
            radius_preference: 100.0,
            noise_amplitude: 0.1,
            maintain_direction_weight: 0.8,
            turning_probability_inside_world: 0.1,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Check every field, failing on the first invalid one.
    pub fn validate(&self) -> Result<()> {
        let radii = [
            ("stress_zone_radius", self.stress_zone_radius),
            ("neutral_zone_radius", self.neutral_zone_radius),
            ("attraction_zone_radius", self.attraction_zone_radius),
            ("rear_zone_radius", self.rear_zone_radius),
        ];
        for (field, radius) in radii {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(MusterError::invalid_config(
                    field,
                    radius.to_string(),
                    "zone radius must be positive and finite",
                ));
            }
        }
        for (field, velocity) in [
            ("lateral_velocity", self.lateral_velocity),
            ("forward_velocity", self.forward_velocity),
        ] {
            if !velocity.is_finite() || velocity < 0.0 {
                return Err(MusterError::invalid_config(
                    field,
                    velocity.to_string(),
                    "velocity must be non-negative and finite",
                ));
            }
        }
        for (field, p) in [
            ("p_left", self.p_left),
            ("p_forward", self.p_forward),
            ("p_right", self.p_right),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(MusterError::out_of_range(field, 0.0, 1.0, p));
            }
        }
        let probability_sum = self.p_left + self.p_forward + self.p_right;
        if (probability_sum - 1.0).abs() > 1e-9 {
            return Err(MusterError::invalid_config(
                "movement_probabilities",
                format!("{} + {} + {}", self.p_left, self.p_forward, self.p_right),
                "probabilities must sum to 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&self.repulsion_factor) {
            return Err(MusterError::out_of_range(
                "repulsion_factor",
                0.0,
                1.0,
                self.repulsion_factor,
            ));
        }
        if !self.speed_up_factor.is_finite() || self.speed_up_factor < 1.0 {
            return Err(MusterError::invalid_config(
                "speed_up_factor",
                self.speed_up_factor.to_string(),
                "must be a finite value >= 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.leader_slow_down.factor) {
            return Err(MusterError::out_of_range(
                "leader_slow_down.factor",
                0.0,
                1.0,
                self.leader_slow_down.factor,
            ));
        }
        if !(self.leader_slow_down.probability > 0.0 && self.leader_slow_down.probability <= 1.0) {
            return Err(MusterError::out_of_range(
                "leader_slow_down.probability",
                0.0,
                1.0,
                self.leader_slow_down.probability,
            ));
        }
        if !self.trailer_speed_up.factor.is_finite() || self.trailer_speed_up.factor < 1.0 {
            return Err(MusterError::invalid_config(
                "trailer_speed_up.factor",
                self.trailer_speed_up.factor.to_string(),
                "must be a finite value >= 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.trailer_speed_up.probability) {
            return Err(MusterError::out_of_range(
                "trailer_speed_up.probability",
                0.0,
                1.0,
                self.trailer_speed_up.probability,
            ));
        }
        if self.number_of_herds == 0 {
            return Err(MusterError::invalid_config(
                "number_of_herds",
                "0",
                "a simulation needs at least one herd",
            ));
        }
        if !self.radius_preference.is_finite() || self.radius_preference <= 0.0 {
            return Err(MusterError::invalid_config(
                "radius_preference",
                self.radius_preference.to_string(),
                "must be positive and finite",
            ));
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(MusterError::invalid_config(
                "noise_amplitude",
                self.noise_amplitude.to_string(),
                "must be non-negative and finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.maintain_direction_weight) {
            return Err(MusterError::out_of_range(
                "maintain_direction_weight",
                0.0,
                1.0,
                self.maintain_direction_weight,
            ));
        }
        if !(0.0..=1.0).contains(&self.turning_probability_inside_world) {
            return Err(MusterError::out_of_range(
                "turning_probability_inside_world",
                0.0,
                1.0,
                self.turning_probability_inside_world,
            ));
        }
        Ok(())
    }
}

/// One tick's outcome: a world-space displacement and the new heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub position_delta: Vector2D,
    pub heading: Vector2D,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WinningZone {
    Stress,
    Neutral,
    Attraction,
    Rear,
}

/// Turning probability for an agent beyond its preference radius.
///
/// Grows with both the overshoot distance and the angular misalignment
/// between the heading and the direction back to the origin.
pub fn turning_probability(distance: f64, angle_diff: f64, radius_preference: f64) -> f64 {
    (distance / (radius_preference * 10.0)) * (angle_diff / PI)
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Mix a stream salt and an agent- or herd-level key into the global
/// seed so every agent and every zone draws from its own stream.
fn derive_seed(seed: u64, key: u64, salt: u64) -> u64 {
    splitmix64(seed ^ splitmix64(key ^ splitmix64(salt)))
}

/// The composed behavior of one agent: four zones in priority order,
/// the fallback movement stream, and the turning state fixed at
/// construction.
pub struct HerdEngine {
    agent_id: AgentId,
    herd_id: HerdId,
    stress: StressZone,
    neutral: NeutralZone,
    attraction: AttractionZone,
    rear: RearZone,
    fallback_movement: MovementProvider,
    rng: StdRng,
    turning_direction: f64,
    additional_turning_force: f64,
    radius_preference: f64,
    noise_amplitude: f64,
    maintain_direction_weight: f64,
    turning_probability_inside_world: f64,
    trailer_speed_up: ProbabilisticFactor,
}

impl HerdEngine {
    pub fn new(agent_id: AgentId, herd_id: HerdId, config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        if herd_id.0 >= config.number_of_herds {
            return Err(MusterError::invalid_config(
                "herd_id",
                herd_id.0.to_string(),
                "must be less than number_of_herds",
            ));
        }

        let provider = |salt: u64| {
            MovementProvider::new(
                config.lateral_velocity,
                config.forward_velocity,
                config.p_left,
                config.p_forward,
                config.p_right,
                StdRng::seed_from_u64(derive_seed(config.seed, agent_id.0, salt)),
            )
        };
        let herd_filter = Some(herd_id);

        let stress = StressZone::new(
            agent_id,
            ZoneShape::ellipse(config.stress_zone_radius, STRESS_ZONE_ELLIPSE_RATIO),
            provider(SALT_STRESS)?,
            herd_filter,
            config.repulsion_factor,
        );
        let neutral = NeutralZone::new(
            agent_id,
            ZoneShape::circular_sector(config.neutral_zone_radius, ZONE_SECTOR_ANGLE),
            provider(SALT_NEUTRAL)?,
            herd_filter,
        );
        let attraction = AttractionZone::new(
            agent_id,
            ZoneShape::circular_sector(config.attraction_zone_radius, ZONE_SECTOR_ANGLE),
            provider(SALT_ATTRACTION)?,
            herd_filter,
            config.speed_up_factor,
        )?;
        let rear = RearZone::new(
            agent_id,
            ZoneShape::circular_sector(config.rear_zone_radius, ZONE_SECTOR_ANGLE),
            provider(SALT_REAR)?,
            herd_filter,
            config.leader_slow_down.factor,
            config.leader_slow_down.probability,
            derive_seed(config.seed, agent_id.0, SALT_REAR_SLOWDOWN),
        )?;

        // Turning direction is a node-level coin flip, the turning force
        // a herd-level draw, both fixed for the engine's lifetime.
        let mut direction_rng =
            StdRng::seed_from_u64(derive_seed(config.seed, agent_id.0, SALT_TURN_DIRECTION));
        let turning_direction = if direction_rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let mut force_rng = StdRng::seed_from_u64(derive_seed(
            config.seed,
            u64::from(herd_id.0),
            SALT_TURN_FORCE,
        ));
        let additional_turning_force = force_rng.gen_range(1.0_f64..4.0).to_radians();

        Ok(Self {
            agent_id,
            herd_id,
            stress,
            neutral,
            attraction,
            rear,
            fallback_movement: provider(SALT_FALLBACK)?,
            rng: StdRng::seed_from_u64(derive_seed(config.seed, agent_id.0, SALT_ENGINE)),
            turning_direction,
            additional_turning_force,
            radius_preference: config.radius_preference,
            noise_amplitude: config.noise_amplitude,
            maintain_direction_weight: config.maintain_direction_weight,
            turning_probability_inside_world: config.turning_probability_inside_world,
            trailer_speed_up: config.trailer_speed_up,
        })
    }

    pub fn agent_id(&self) -> AgentId {
        self.agent_id
    }

    pub fn herd_id(&self) -> HerdId {
        self.herd_id
    }

    /// Run one tick against a consistent world snapshot.
    pub fn step(&mut self, world: &dyn World) -> Result<Decision> {
        let position = world
            .position_of(self.agent_id)
            .ok_or(MusterError::UnknownAgent(self.agent_id))?;
        let current_heading = world
            .heading_of(self.agent_id)
            .ok_or(MusterError::UnknownAgent(self.agent_id))?;

        let mut heading = self.aligned_heading(world, position, current_heading);

        // Priority scan. The rear detection is needed regardless of the
        // winner to tell leaders from trailers.
        let rear_detection = self.rear.detect(world, position, heading);
        let stress_detection = self.stress.detect(world, position, heading);
        let (movement, winner) = if !stress_detection.is_empty() {
            let movement = self
                .stress
                .decide(&stress_detection, world, position, heading)?;
            (movement, Some(WinningZone::Stress))
        } else {
            let neutral_detection = self.neutral.detect(world, position, heading);
            if !neutral_detection.is_empty() {
                let movement = self
                    .neutral
                    .decide(&neutral_detection, world, position, heading)?;
                (movement, Some(WinningZone::Neutral))
            } else {
                let attraction_detection = self.attraction.detect(world, position, heading);
                if !attraction_detection.is_empty() {
                    let movement =
                        self.attraction
                            .decide(&attraction_detection, world, position, heading)?;
                    (movement, Some(WinningZone::Attraction))
                } else if !rear_detection.is_empty() {
                    let movement = self
                        .rear
                        .decide(&rear_detection, world, position, heading)?;
                    (movement, Some(WinningZone::Rear))
                } else {
                    (self.fallback_movement.random_movement()?, None)
                }
            }
        };

        let mut movement = self.noisy(movement);

        // Trailers (nobody behind, somebody elsewhere) catch up.
        if winner.is_some()
            && winner != Some(WinningZone::Rear)
            && rear_detection.is_empty()
            && self.rng.gen::<f64>() <= self.trailer_speed_up.probability
        {
            movement = movement.scale(self.trailer_speed_up.factor);
        }

        // Leaders and lone agents wander back toward the origin.
        match winner {
            Some(WinningZone::Rear) => heading = self.turn(position, heading),
            None => {
                if self.rng.gen::<f64>() < LONE_AGENT_TURN_PROBABILITY {
                    heading = self.turn(position, heading);
                }
            }
            _ => {}
        }

        let rotation = local_to_world_rotation(&heading);
        let mut position_delta = movement.rotated(rotation);

        // A non-stress winner must not walk the agent straight into its
        // stress zone; when it would, discard it for a plain random draw.
        if matches!(
            winner,
            Some(WinningZone::Neutral) | Some(WinningZone::Attraction) | Some(WinningZone::Rear)
        ) {
            let proposed = position + position_delta;
            if !self.stress.detect(world, proposed, heading).is_empty() {
                let replacement = self.fallback_movement.random_movement()?;
                position_delta = self.noisy(replacement).rotated(rotation);
            }
        }

        Ok(Decision {
            position_delta,
            heading,
        })
    }

    /// Low-pass filter of the agent's heading toward the average heading
    /// of same-herd agents in the neutral zone.
    fn aligned_heading(
        &self,
        world: &dyn World,
        position: Vector2D,
        heading: Vector2D,
    ) -> Vector2D {
        let detection = self.neutral.detect(world, position, heading);
        let mut sum = Vector2D::ZERO;
        for id in detection.neighbors() {
            if let Some(neighbor_heading) = world.heading_of(*id) {
                sum = sum + neighbor_heading;
            }
        }
        let group = sum.normalized();
        let weight = self.maintain_direction_weight;
        (heading.scale(weight) + group.scale(1.0 - weight)).normalized()
    }

    fn noisy(&mut self, movement: Vector2D) -> Vector2D {
        if self.noise_amplitude == 0.0 {
            return movement;
        }
        let lateral = self.noise_modifier();
        let forward = self.noise_modifier();
        movement.velocity_modified(lateral, forward)
    }

    fn noise_modifier(&mut self) -> f64 {
        let sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        sign * self.rng.gen_range(0.0..self.noise_amplitude)
    }

    /// Boundary-seeking turn. Outside the preference radius the turn
    /// probability grows with distance and misalignment and a turn that
    /// would worsen the misalignment is rejected, except when the agent
    /// already faces nearly opposite the origin. Inside the radius a
    /// small flat probability keeps agents wandering.
    fn turn(&mut self, position: Vector2D, heading: Vector2D) -> Vector2D {
        let to_origin = -position;
        let angle_diff = heading.angle_between(&to_origin);
        let distance = position.magnitude();
        if distance > self.radius_preference {
            let probability = turning_probability(distance, angle_diff, self.radius_preference);
            if self.rng.gen::<f64>() < probability {
                let turned = heading.rotated(self.turning_direction * self.additional_turning_force);
                if turned.angle_between(&to_origin) <= angle_diff
                    || angle_diff / PI > OPPOSITE_ALIGNMENT_RATIO
                {
                    return turned;
                }
            }
        } else if self.rng.gen::<f64>() < self.turning_probability_inside_world {
            return heading.rotated(self.turning_direction * self.additional_turning_force);
        }
        heading
    }
}
