//! Decorative particle bursts spawned on food captures.
//!
//! Purely cosmetic: nothing here feeds back into snake, food or scoring.
//! Particles live in pixel space (the renderer maps them onto cells) and
//! expire on their own as their opacity fades out.

use rand::Rng;

/// One spark of a capture burst
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Opacity, 1.0 at spawn, linearly fading to 0
    pub alpha: f64,
    /// Draw radius in pixels
    pub radius: f64,
}

impl Particle {
    fn new<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vx: rng.gen_range(-2.0..2.0),
            vy: rng.gen_range(-2.0..2.0),
            alpha: 1.0,
            radius: rng.gen_range(2.0..6.0),
        }
    }

    fn update(&mut self, alpha_decay: f64) {
        self.x += self.vx;
        self.y += self.vy;
        self.alpha -= alpha_decay;
    }

    pub fn expired(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// The live set of particles, updated once per simulation tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a burst of `count` particles at a pixel-space point
    pub fn burst<R: Rng>(&mut self, x: f64, y: f64, count: usize, rng: &mut R) {
        for _ in 0..count {
            self.particles.push(Particle::new(x, y, rng));
        }
    }

    /// Integrate every particle one tick and drop the ones that have
    /// faded out. A particle gets its final draw at alpha ~0 before its
    /// update removes it here.
    pub fn update(&mut self, alpha_decay: f64) {
        for p in &mut self.particles {
            p.update(alpha_decay);
        }
        self.particles.retain(|p| !p.expired());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_count_and_initial_state() {
        let mut rng = rand::thread_rng();
        let mut system = ParticleSystem::new();

        system.burst(110.0, 110.0, 20, &mut rng);
        assert_eq!(system.len(), 20);

        for p in system.iter() {
            assert_eq!((p.x, p.y), (110.0, 110.0));
            assert_eq!(p.alpha, 1.0);
            assert!(p.vx.abs() <= 2.0 && p.vy.abs() <= 2.0);
            assert!(p.radius >= 2.0 && p.radius < 6.0);
        }
    }

    #[test]
    fn test_update_integrates_and_fades() {
        let mut rng = rand::thread_rng();
        let mut system = ParticleSystem::new();
        system.burst(0.0, 0.0, 1, &mut rng);

        let before = system.iter().next().unwrap().clone();
        system.update(0.02);
        let after = system.iter().next().unwrap();

        assert_eq!(after.x, before.vx);
        assert_eq!(after.y, before.vy);
        assert!((after.alpha - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_particles_expire_after_fade() {
        let mut rng = rand::thread_rng();
        let mut system = ParticleSystem::new();
        system.burst(0.0, 0.0, 20, &mut rng);

        // Alpha drops 0.02 per tick from 1.0, so roughly 50 ticks empty the set
        for _ in 0..45 {
            system.update(0.02);
        }
        assert_eq!(system.len(), 20);

        let mut ticks = 45;
        while !system.is_empty() {
            system.update(0.02);
            ticks += 1;
            assert!(ticks <= 51, "particles should fade out within ~50 ticks");
        }
    }

    #[test]
    fn test_clear() {
        let mut rng = rand::thread_rng();
        let mut system = ParticleSystem::new();
        system.burst(0.0, 0.0, 5, &mut rng);
        system.clear();
        assert!(system.is_empty());
    }
}
