use glam::{IVec3, Vec3};

/// Axis along which a contact is separated
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContactAxis {
    Vertical,
    Horizontal,
}

#[derive(Copy, Clone, Debug)]
pub struct CollisionInfo {
    /// Grid cell the capsule touches
    pub cell: IVec3,
    pub contact_point: Vec3,
    /// Unit vector pointing from the contact back towards the capsule
    pub normal: Vec3,
    /// Penetration depth along `normal`, >= 0
    pub overlap: f32,
    pub axis: ContactAxis,
}

/// Upright cylinder-shaped collider. `position` is the **top** of the capsule.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Capsule {
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Capsule {
    pub fn new(position: Vec3, radius: f32, height: f32) -> Capsule {
        debug_assert!(radius > 0.0);
        debug_assert!(height > 0.0);
        Self {
            position,
            radius,
            height,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.position - Vec3::Y * (self.height / 2.0)
    }

    pub fn bottom(&self) -> Vec3 {
        self.position - Vec3::Y * self.height
    }
}

/// Optional per-tick record of what the collision pipeline looked at.
/// Meant for an external visualizer; never read by the pipeline itself.
#[derive(Debug, Default)]
pub struct CollisionDebug {
    pub enabled: bool,
    pub candidates: Vec<IVec3>,
    pub contacts: Vec<Vec3>,
}

impl CollisionDebug {
    pub fn new(enabled: bool) -> CollisionDebug {
        Self {
            enabled,
            ..Default::default()
        }
    }

    pub fn clear(&mut self) {
        self.candidates.clear();
        self.contacts.clear();
    }

    pub fn add_candidate(&mut self, cell: IVec3) {
        if self.enabled {
            self.candidates.push(cell);
        }
    }

    pub fn add_contact(&mut self, point: Vec3) {
        if self.enabled {
            self.contacts.push(point);
        }
    }
}
