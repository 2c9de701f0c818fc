use glam::{IVec3, Vec3};

/// Axis-aligned box in continuous world space
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> AABB {
        debug_assert!(max.x >= min.x, "Invalid bounds: x axis");
        debug_assert!(max.y >= min.y, "Invalid bounds: y axis");
        debug_assert!(max.z >= min.z, "Invalid bounds: z axis");
        Self { min, max }
    }

    pub fn new_center(center: &Vec3, size: f32) -> AABB {
        debug_assert!(size > 0.0, "Size of BB needs to be > 0");
        let half = size / 2.0;
        Self {
            min: *center - Vec3::splat(half),
            max: *center + Vec3::splat(half),
        }
    }

    /// Closest point inside the box to `point`
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }
}

/// Integer box with **inclusive** min and max corners
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IAabb {
    pub min: IVec3,
    pub max: IVec3,
}

impl IAabb {
    pub fn new_rect(min: IVec3, max: IVec3) -> IAabb {
        debug_assert!(max.x >= min.x, "Invalid bounds: x axis");
        debug_assert!(max.y >= min.y, "Invalid bounds: y axis");
        debug_assert!(max.z >= min.z, "Invalid bounds: z axis");
        Self { min, max }
    }

    pub fn intersection(&self, other: &IAabb) -> Option<IAabb> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if max.x < min.x || max.y < min.y || max.z < min.z {
            return None;
        }
        Some(IAabb::new_rect(min, max))
    }

    pub fn volume(&self) -> i32 {
        let extent = self.max - self.min + IVec3::ONE;
        extent.x * extent.y * extent.z
    }

    /// All integer points of the box, x outermost
    pub fn iter_points(self) -> impl Iterator<Item = IVec3> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y).flat_map(move |y| (min.z..=max.z).map(move |z| IVec3::new(x, y, z)))
        })
    }
}

impl From<&AABB> for IAabb {
    fn from(other: &AABB) -> Self {
        IAabb::new_rect(other.min.floor().as_ivec3(), other.max.ceil().as_ivec3())
    }
}
