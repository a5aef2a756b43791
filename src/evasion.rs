//! The unclickable "Contact Us" button
//!
//! Pointer moves push the button away from the pointer along one of eight
//! fixed escape vectors. A few clicks make it jump randomly; after that it
//! gives up for a while, then goes back to dodging.
//!
//! Everything is a pure function of pointer/click events plus a caller
//! supplied clock (ms), so the host owns the only timer.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::angle_to_sector;
use crate::consts::*;

/// Label before the first surrender
pub const RESTING_LABEL: &str = "Contact Us (Don't Bother)";
/// Label while surrendered
pub const SURRENDER_LABEL: &str = "Fine. You win.";
/// Label after a surrender has expired
pub const REVERTED_LABEL: &str = "Contact Us (Why Bother?)";

/// Offset (px, screen orientation) and taunt for one sector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escape {
    pub offset: Vec2,
    pub taunt: &'static str,
}

/// Escape table indexed by sector; each offset points away from the pointer
pub const ESCAPES: [Escape; 8] = [
    // Pointer left
    Escape { offset: Vec2::new(120.0, 0.0), taunt: "Nope!" },
    // Pointer up-left
    Escape { offset: Vec2::new(100.0, 60.0), taunt: "Missed me!" },
    // Pointer above
    Escape { offset: Vec2::new(0.0, 80.0), taunt: "Too slow!" },
    // Pointer up-right
    Escape { offset: Vec2::new(-100.0, 60.0), taunt: "Try harder!" },
    // Pointer right
    Escape { offset: Vec2::new(-120.0, 0.0), taunt: "Not today!" },
    // Pointer down-right
    Escape { offset: Vec2::new(-100.0, -60.0), taunt: "Maybe later!" },
    // Pointer below
    Escape { offset: Vec2::new(0.0, -80.0), taunt: "Nice try!" },
    // Pointer down-left
    Escape { offset: Vec2::new(100.0, -60.0), taunt: "So close!" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvasionState {
    Evading,
    Surrendering,
}

/// Visual style the host should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affordance {
    /// Red, dodging
    Taunting,
    /// Green, clickable
    Surrendered,
}

impl Affordance {
    pub fn background(self) -> &'static str {
        match self {
            Affordance::Taunting => "#f44336",
            Affordance::Surrendered => "#4CAF50",
        }
    }
}

/// Where and how to draw the button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub offset: Vec2,
    pub rotation_deg: f32,
    pub label: &'static str,
    pub affordance: Affordance,
}

impl Pose {
    fn resting(label: &'static str) -> Self {
        Self {
            offset: Vec2::ZERO,
            rotation_deg: 0.0,
            label,
            affordance: Affordance::Taunting,
        }
    }

    /// CSS transform for this pose
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.offset.x, self.offset.y, self.rotation_deg
        )
    }
}

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Jumped away
    Dodged,
    /// Gave up; host should call `poll` once `revert_at_ms` has passed
    Surrendered { revert_at_ms: f64 },
    /// Already surrendered, nothing changes
    Ignored,
}

/// Sector of the pointer relative to the target center
pub fn sector_for(pointer: Vec2, center: Vec2) -> usize {
    let d = pointer - center;
    angle_to_sector(d.y.atan2(d.x).to_degrees())
}

/// Evasive target state machine
#[derive(Debug, Clone)]
pub struct EvasiveTarget {
    state: EvasionState,
    clicks: u32,
    revert_at_ms: Option<f64>,
    pose: Pose,
    rng: Pcg32,
}

impl EvasiveTarget {
    pub fn new(seed: u64) -> Self {
        Self {
            state: EvasionState::Evading,
            clicks: 0,
            revert_at_ms: None,
            pose: Pose::resting(RESTING_LABEL),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> EvasionState {
        self.state
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Pending revert time, if surrendered
    pub fn revert_deadline(&self) -> Option<f64> {
        self.revert_at_ms
    }

    /// Dodge away from the pointer
    pub fn on_pointer_move(&mut self, pointer: Vec2, center: Vec2) -> &Pose {
        if self.state == EvasionState::Evading {
            let escape = ESCAPES[sector_for(pointer, center)];
            let jitter = self
                .rng
                .random_range(-POINTER_JITTER_DEG..POINTER_JITTER_DEG);
            self.pose = Pose {
                offset: escape.offset,
                rotation_deg: jitter,
                label: escape.taunt,
                affordance: Affordance::Taunting,
            };
        }
        &self.pose
    }

    pub fn on_click(&mut self, now_ms: f64) -> ClickOutcome {
        if self.state == EvasionState::Surrendering {
            return ClickOutcome::Ignored;
        }

        self.clicks += 1;
        if self.clicks > SURRENDER_AFTER_CLICKS {
            let revert_at_ms = now_ms + SURRENDER_REVERT_MS;
            self.state = EvasionState::Surrendering;
            self.revert_at_ms = Some(revert_at_ms);
            self.pose = Pose {
                offset: Vec2::ZERO,
                rotation_deg: 0.0,
                label: SURRENDER_LABEL,
                affordance: Affordance::Surrendered,
            };
            log::info!("Button surrendered after {} clicks", self.clicks);
            return ClickOutcome::Surrendered { revert_at_ms };
        }

        // Random jump, not pointer-derived
        let escape = ESCAPES[self.rng.random_range(0..ESCAPES.len())];
        self.pose = Pose {
            offset: escape.offset,
            rotation_deg: self.rng.random_range(0.0..360.0),
            label: escape.taunt,
            affordance: Affordance::Taunting,
        };
        ClickOutcome::Dodged
    }

    /// Revert a surrender whose deadline has passed; returns true if it did
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.revert_at_ms {
            Some(deadline) if now_ms >= deadline => {
                self.state = EvasionState::Evading;
                self.clicks = 0;
                self.revert_at_ms = None;
                self.pose = Pose::resting(REVERTED_LABEL);
                log::debug!("Button back to evading");
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_from_literal_angles() {
        assert_eq!(angle_to_sector(180.0), 0);
        assert_eq!(angle_to_sector(-180.0), 0);
        assert_eq!(angle_to_sector(-135.0), 1);
        assert_eq!(angle_to_sector(-90.0), 2);
        assert_eq!(angle_to_sector(-45.0), 3);
        assert_eq!(angle_to_sector(0.0), 4);
        assert_eq!(angle_to_sector(45.0), 5);
        assert_eq!(angle_to_sector(90.0), 6);
        assert_eq!(angle_to_sector(135.0), 7);
        // Sector edges
        assert_eq!(angle_to_sector(-157.4), 1);
        assert_eq!(angle_to_sector(22.4), 4);
        assert_eq!(angle_to_sector(22.6), 5);
        assert_eq!(angle_to_sector(157.6), 0);
    }

    #[test]
    fn test_escape_opposes_pointer() {
        let center = Vec2::new(200.0, 100.0);
        for (dx, dy) in [(50.0, 0.0), (-50.0, 0.0), (0.0, 50.0), (0.0, -50.0), (30.0, 30.0)] {
            let pointer = center + Vec2::new(dx, dy);
            let escape = ESCAPES[sector_for(pointer, center)];
            assert!(escape.offset.dot(Vec2::new(dx, dy)) < 0.0, "({dx}, {dy})");
        }
    }

    #[test]
    fn test_pointer_move_sets_taunt() {
        let mut target = EvasiveTarget::new(1);
        assert_eq!(target.pose().label, RESTING_LABEL);

        let pose = *target.on_pointer_move(Vec2::new(150.0, 0.0), Vec2::new(100.0, 0.0));
        assert_eq!(pose.label, "Not today!");
        assert_eq!(pose.offset, Vec2::new(-120.0, 0.0));
        assert!(pose.rotation_deg.abs() <= POINTER_JITTER_DEG);
        assert_eq!(pose.affordance, Affordance::Taunting);
    }

    #[test]
    fn test_surrender_and_revert() {
        let mut target = EvasiveTarget::new(2);
        for _ in 0..3 {
            assert_eq!(target.on_click(0.0), ClickOutcome::Dodged);
            assert_eq!(target.state(), EvasionState::Evading);
        }

        let outcome = target.on_click(1000.0);
        assert_eq!(outcome, ClickOutcome::Surrendered { revert_at_ms: 3000.0 });
        assert_eq!(target.state(), EvasionState::Surrendering);
        assert_eq!(target.pose().label, SURRENDER_LABEL);
        assert_eq!(target.pose().offset, Vec2::ZERO);
        assert_eq!(target.pose().rotation_deg, 0.0);
        assert_eq!(target.pose().affordance, Affordance::Surrendered);

        assert!(!target.poll(2999.0));
        assert_eq!(target.state(), EvasionState::Surrendering);

        assert!(target.poll(3000.0));
        assert_eq!(target.state(), EvasionState::Evading);
        assert_eq!(target.clicks(), 0);
        assert_eq!(target.revert_deadline(), None);
        assert_eq!(target.pose().label, REVERTED_LABEL);
    }

    #[test]
    fn test_surrendered_ignores_input() {
        let mut target = EvasiveTarget::new(3);
        for _ in 0..4 {
            target.on_click(0.0);
        }
        assert_eq!(target.on_click(500.0), ClickOutcome::Ignored);
        // Deadline is not re-armed
        assert_eq!(target.revert_deadline(), Some(SURRENDER_REVERT_MS));

        let pose = *target.on_pointer_move(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert_eq!(pose.label, SURRENDER_LABEL);
        assert_eq!(pose.offset, Vec2::ZERO);
    }

    #[test]
    fn test_css_transform() {
        let pose = Pose {
            offset: Vec2::new(-120.0, 0.0),
            rotation_deg: 5.0,
            label: "Not today!",
            affordance: Affordance::Taunting,
        };
        assert_eq!(pose.css_transform(), "translate(-120px, 0px) rotate(5deg)");
    }
}
