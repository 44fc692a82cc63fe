//! Simulated "data access" points scattered over land.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use formats::LandCollection;
use foundation::math::{LonLat, lat_from_uniform, lon_from_uniform};
use foundation::time::Millis;
use rand::Rng;
use runtime::EventLog;

use crate::access_log::{ACCESS_LOG_CAPACITY, AccessLog, LogEntry, trace_data_access};
use crate::geometry::point_on_land;
use crate::symbology::FluorescentColor;

/// Rejection-sampling budget for one point.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// New points fade in linearly over this long.
pub const FADE_IN_MS: f64 = 1000.0;

/// Radial glow stops as `(offset, alpha)`.
pub const GLOW_STOPS: [(f64, f64); 4] = [(0.0, 1.0), (0.2, 0.8), (0.5, 0.4), (1.0, 0.0)];

pub const DATA_OWNERS: [&str; 15] = [
    "Alice Chen",
    "Bob Martinez",
    "Carol Johnson",
    "David Kim",
    "Emma Wilson",
    "Frank Liu",
    "Grace Park",
    "Henry Brown",
    "Iris Taylor",
    "Jack Anderson",
    "Kate White",
    "Leo Garcia",
    "Mia Rodriguez",
    "Noah Lee",
    "Olivia Davis",
];

pub const DATA_CONSUMERS: [&str; 12] = [
    "TechCorp Inc.",
    "DataStream Ltd.",
    "CloudNet Systems",
    "InfoShare Co.",
    "DigitalWorks",
    "ByteForce",
    "NetLink Solutions",
    "DataFlow Inc.",
    "CyberSync",
    "InfoTech Global",
    "DataVault Systems",
    "CloudBridge",
];

pub const DATA_CATEGORIES: [&str; 12] = [
    "Personal Profile",
    "Location Data",
    "Purchase History",
    "Browsing Behavior",
    "Social Network",
    "Health Records",
    "Financial Info",
    "Communication Logs",
    "Biometric Data",
    "Search Queries",
    "Device Info",
    "Preferences",
];

/// One simulated data-access event. Read-only once created.
#[derive(Debug, Clone, PartialEq)]
pub struct FluorescentPoint {
    /// Generation order, starting at 0 for each generator.
    pub seq: u64,
    pub position: LonLat,
    pub color: FluorescentColor,
    /// Base radius in pixels before pulsing.
    pub size: f64,
    pub pulse_phase: f64,
    /// Radians per second.
    pub pulse_speed: f64,
    pub created: Millis,
    pub owner: &'static str,
    pub consumer: &'static str,
    pub category: &'static str,
}

/// How a point should be drawn at a given instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointAppearance {
    /// Pulse factor in `[0, 1]`.
    pub pulse: f64,
    /// Fade-in factor in `[0, 1]`.
    pub fade: f64,
    pub radius: f64,
    pub opacity: f64,
    pub glow_radius: f64,
    pub core_alpha: f64,
    pub center_radius: f64,
    pub center_alpha: f64,
}

impl FluorescentPoint {
    pub fn appearance(&self, now: Millis, scale_factor: f64) -> PointAppearance {
        let pulse = (now.as_secs() * self.pulse_speed + self.pulse_phase).sin() * 0.5 + 0.5;
        let fade = (now.since(self.created) / FADE_IN_MS).min(1.0);
        let radius = self.size * scale_factor * (0.8 + pulse * 0.4);
        let opacity = ((1.0 + pulse * 0.2) * fade).min(1.0);
        PointAppearance {
            pulse,
            fade,
            radius,
            opacity,
            glow_radius: radius * 3.0,
            core_alpha: (opacity * 1.5).min(1.0),
            center_radius: radius * 0.5,
            center_alpha: (opacity * 1.2).min(1.0),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct PointGenerator {
    next_seq: u64,
}

impl PointGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples uniformly over the sphere until a point lands on some feature.
    ///
    /// Returns `None` when the land set is empty or the attempt budget runs out.
    pub fn generate_single<R: Rng + ?Sized>(
        &mut self,
        land: &LandCollection,
        rng: &mut R,
        now: Millis,
    ) -> Option<FluorescentPoint> {
        if land.is_empty() {
            return None;
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let p = LonLat::new(
                lon_from_uniform(rng.gen_range(0.0..1.0)),
                lat_from_uniform(rng.gen_range(0.0..1.0)),
            );
            if point_on_land(p, land) {
                return Some(self.decorate(p, rng, now));
            }
        }
        None
    }

    fn decorate<R: Rng + ?Sized>(&mut self, position: LonLat, rng: &mut R, now: Millis) -> FluorescentPoint {
        let seq = self.next_seq;
        self.next_seq += 1;
        FluorescentPoint {
            seq,
            position,
            color: FluorescentColor::ALL[rng.gen_range(0..FluorescentColor::ALL.len())],
            size: rng.gen_range(0.8..1.4),
            pulse_phase: rng.gen_range(0.0..TAU),
            pulse_speed: rng.gen_range(0.03..0.07),
            created: now,
            owner: DATA_OWNERS[rng.gen_range(0..DATA_OWNERS.len())],
            consumer: DATA_CONSUMERS[rng.gen_range(0..DATA_CONSUMERS.len())],
            category: DATA_CATEGORIES[rng.gen_range(0..DATA_CATEGORIES.len())],
        }
    }
}

/// Live points, oldest first, capped with FIFO eviction.
pub type PointPopulation = EventLog<FluorescentPoint>;

/// Generator, live population, access log and exchange counter for one globe.
#[derive(Debug, Clone)]
pub struct FluorescentLayer {
    generator: PointGenerator,
    population: PointPopulation,
    log: AccessLog,
    exchanges: u64,
    batch: RangeInclusive<usize>,
}

impl FluorescentLayer {
    pub fn new(max_points: usize, batch: RangeInclusive<usize>) -> Self {
        let (lo, hi) = (*batch.start(), *batch.end());
        Self {
            generator: PointGenerator::new(),
            population: EventLog::with_capacity(max_points),
            log: EventLog::with_capacity(ACCESS_LOG_CAPACITY),
            exchanges: 0,
            batch: lo.min(hi)..=lo.max(hi),
        }
    }

    /// Runs one batch; returns how many points were actually placed.
    pub fn generate_batch<R: Rng + ?Sized>(
        &mut self,
        land: &LandCollection,
        rng: &mut R,
        now: Millis,
    ) -> usize {
        let count = rng.gen_range(self.batch.clone());
        let mut placed = 0;
        for _ in 0..count {
            if let Some(point) = self.generator.generate_single(land, rng, now) {
                self.accept(point);
                placed += 1;
            }
        }
        placed
    }

    /// Admits a freshly generated point: evicts the oldest if needed, logs it
    /// and bumps the exchange counter.
    pub fn accept(&mut self, point: FluorescentPoint) {
        trace_data_access(&point);
        self.log.push(LogEntry::from_point(&point));
        self.exchanges += 1;
        self.population.push(point);
    }

    pub fn population(&self) -> &PointPopulation {
        &self.population
    }

    pub fn log(&self) -> &AccessLog {
        &self.log
    }

    pub fn exchanges(&self) -> u64 {
        self.exchanges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::{LandFeature, LandGeometry};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;

    fn rect(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> LandCollection {
        LandCollection {
            features: vec![LandFeature {
                id: None,
                class: Some("Land".to_string()),
                geometry: LandGeometry::Polygon(vec![vec![
                    [min_lon, min_lat],
                    [max_lon, min_lat],
                    [max_lon, max_lat],
                    [min_lon, max_lat],
                    [min_lon, min_lat],
                ]]),
            }],
            skipped: 0,
        }
    }

    /// Covers every sampled coordinate.
    fn whole_world() -> LandCollection {
        rect(-200.0, -100.0, 200.0, 100.0)
    }

    fn sample_point(seq: u64) -> FluorescentPoint {
        FluorescentPoint {
            seq,
            position: LonLat::new(0.0, 0.0),
            color: FluorescentColor::Green,
            size: 1.0,
            pulse_phase: 0.0,
            pulse_speed: 0.05,
            created: Millis(0.0),
            owner: DATA_OWNERS[0],
            consumer: DATA_CONSUMERS[0],
            category: DATA_CATEGORIES[0],
        }
    }

    #[test]
    fn generated_points_lie_on_land_with_valid_metadata() {
        let land = rect(-30.0, -30.0, 60.0, 60.0);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut generator = PointGenerator::new();
        let mut found = 0;
        for _ in 0..50 {
            if let Some(p) = generator.generate_single(&land, &mut rng, Millis(1_000.0)) {
                assert!(point_on_land(p.position, &land));
                assert!((0.8..1.4).contains(&p.size));
                assert!((0.0..TAU).contains(&p.pulse_phase));
                assert!((0.03..0.07).contains(&p.pulse_speed));
                assert_eq!(p.created, Millis(1_000.0));
                assert!(DATA_OWNERS.contains(&p.owner));
                assert!(DATA_CONSUMERS.contains(&p.consumer));
                assert!(DATA_CATEGORIES.contains(&p.category));
                found += 1;
            }
        }
        // A quarter-sphere-ish target is hit well within 100 attempts.
        assert!(found > 40);
    }

    #[test]
    fn exhausted_attempts_yield_no_point() {
        // A constant RNG always samples (-180°, -90°), far from this island.
        let land = rect(10.0, 10.0, 10.5, 10.5);
        let mut rng = StepRng::new(0, 0);
        let mut generator = PointGenerator::new();
        assert!(generator.generate_single(&land, &mut rng, Millis(0.0)).is_none());
    }

    #[test]
    fn empty_land_yields_no_point() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut generator = PointGenerator::new();
        assert!(
            generator
                .generate_single(&LandCollection::default(), &mut rng, Millis(0.0))
                .is_none()
        );
    }

    #[test]
    fn failed_batch_leaves_population_and_log_unchanged() {
        let land = rect(10.0, 10.0, 10.5, 10.5);
        let mut layer = FluorescentLayer::new(100, 1..=2);
        let mut rng = StepRng::new(0, 0);
        assert_eq!(layer.generate_batch(&land, &mut rng, Millis(0.0)), 0);
        assert!(layer.population().is_empty());
        assert!(layer.log().is_empty());
        assert_eq!(layer.exchanges(), 0);
    }

    #[test]
    fn population_keeps_last_three_of_five_in_order() {
        let mut population = PointPopulation::with_capacity(3);
        let mut evicted = Vec::new();
        for seq in 0..5 {
            if let Some(old) = population.push(sample_point(seq)) {
                evicted.push(old.seq);
            }
        }
        let live: Vec<u64> = population.iter().map(|p| p.seq).collect();
        assert_eq!(live, vec![2, 3, 4]);
        assert_eq!(evicted, vec![0, 1]);
    }

    #[test]
    fn layer_cap_three_five_generations() {
        let land = whole_world();
        let mut layer = FluorescentLayer::new(3, 1..=1);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut generated = Vec::new();
        for i in 0..5 {
            assert_eq!(layer.generate_batch(&land, &mut rng, Millis(i as f64)), 1);
            generated.push(layer.population().iter().last().map(|p| p.seq));
        }
        let live: Vec<u64> = layer.population().iter().map(|p| p.seq).collect();
        assert_eq!(live, vec![2, 3, 4]);
        assert_eq!(generated, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(layer.exchanges(), 5);
        assert_eq!(layer.log().len(), 5);
    }

    #[test]
    fn population_never_exceeds_cap() {
        let land = whole_world();
        let mut layer = FluorescentLayer::new(10, 1..=2);
        let mut rng = SmallRng::seed_from_u64(3);
        for i in 0..100 {
            layer.generate_batch(&land, &mut rng, Millis(i as f64 * 800.0));
            assert!(layer.population().len() <= 10);
            assert!(layer.log().len() <= ACCESS_LOG_CAPACITY);
        }
        assert_eq!(layer.population().len(), 10);
        assert_eq!(layer.log().len(), ACCESS_LOG_CAPACITY);
        // Oldest live point is always the oldest surviving sequence number.
        let seqs: Vec<u64> = layer.population().iter().map(|p| p.seq).collect();
        assert!(seqs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*seqs.last().unwrap_or(&0) + 1, layer.exchanges());
    }

    #[test]
    fn batch_sizes_stay_in_range() {
        let land = whole_world();
        let mut rng = SmallRng::seed_from_u64(11);
        let mut layer = FluorescentLayer::new(1_000, 2..=1);
        for _ in 0..50 {
            let n = layer.generate_batch(&land, &mut rng, Millis(0.0));
            assert!((1..=2).contains(&n));
        }
    }

    #[test]
    fn zero_cap_keeps_nothing() {
        let mut population = PointPopulation::with_capacity(0);
        assert!(population.push(sample_point(0)).is_some());
        assert!(population.is_empty());
    }

    #[test]
    fn appearance_fades_in_over_one_second() {
        let p = sample_point(0);
        let start = p.appearance(Millis(0.0), 1.0);
        assert_eq!(start.fade, 0.0);
        assert_eq!(start.opacity, 0.0);
        let half = p.appearance(Millis(500.0), 1.0);
        assert!((half.fade - 0.5).abs() < 1e-12);
        let done = p.appearance(Millis(5_000.0), 1.0);
        assert_eq!(done.fade, 1.0);
        assert_eq!(done.opacity, 1.0);
    }

    #[test]
    fn appearance_pulses_between_bounds() {
        let p = sample_point(0);
        for t in 0..200 {
            let a = p.appearance(Millis(2_000.0 + t as f64 * 997.0), 1.0);
            assert!((0.0..=1.0).contains(&a.pulse));
            assert!(a.radius >= 0.8 - 1e-12 && a.radius <= 1.2 + 1e-12);
            assert!((a.glow_radius - a.radius * 3.0).abs() < 1e-12);
            assert!(a.core_alpha <= 1.0 && a.center_alpha <= 1.0);
        }
    }
}
