//! Bounded pool of active particles
//!
//! Each tick builds the next generation into a fresh vector and swaps it in,
//! so removal never shifts indices under an iteration in progress.

use crate::experiment::{Experiment, TickContext};
use crate::stochastic::spawn_count;
use crate::{Event, EventKind, Jitter};
use lab_physics::{Particle, Phase};

#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Add a particle. Refused when the pool is full or the particle is not
    /// a valid live particle.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.capacity {
            log::trace!("Particle pool full ({}), dropping spawn", self.capacity);
            return false;
        }
        if !particle.is_active() || !particle.is_finite() {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Advance every particle one tick, then spawn from the continuous source.
    ///
    /// Per particle: evaluate the force model, move, check finiteness, run
    /// the experiment's interactions, cull outside the bounds. Survivors form
    /// the next generation. Returns the events of this tick in order.
    pub fn advance(
        &mut self,
        experiment: &dyn Experiment,
        ctx: &mut TickContext,
        jitter: &mut Jitter,
    ) -> Vec<Event> {
        let bounds = experiment.bounds();
        let mut events = Vec::new();
        let mut next = Vec::with_capacity(self.particles.len());

        for mut particle in self.particles.drain(..) {
            let response = experiment.evaluate(&particle, ctx.params, ctx.dt);
            let amplitude = experiment.jitter_amplitude(&particle, ctx.params);

            particle.previous_position = particle.position;
            particle.velocity = response.velocity;
            particle.scalar = response.derived;
            particle.position += particle.velocity * ctx.dt + jitter.offset(amplitude, ctx.dt);

            if !particle.is_finite() || !particle.scalar.is_finite() {
                log::warn!(
                    "Dropping non-finite {:?} after {:.0} ms",
                    particle.kind,
                    particle.age(ctx.now)
                );
                continue;
            }

            if let Some(event) = experiment.interact(&mut particle, ctx) {
                events.push(event);
            }

            if particle.is_active() && !bounds.contains(particle.position) {
                particle.phase = Phase::Lost;
            }

            if particle.is_active() {
                next.push(particle);
            }
        }

        debug_assert!(
            next.iter().all(|p| p.is_active() && p.is_finite()),
            "next generation holds an inactive or non-finite particle"
        );
        self.particles = next;

        for particle in ctx.take_spawned() {
            self.spawn(particle);
        }

        // never attempt more spawns than the pool has room for
        let room = self.capacity.saturating_sub(self.particles.len());
        let expected = experiment.spawn_rate(ctx.params) * ctx.dt;
        let count = (spawn_count(expected, ctx.rng) as usize).min(room);
        for _ in 0..count {
            let Some(particle) = experiment.spawn(ctx) else {
                continue;
            };
            if self.spawn(particle) {
                events.push(Event::new(EventKind::Emitted, ctx.now, particle.position));
            }
        }

        events
    }

    pub fn active(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
