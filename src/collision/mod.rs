mod capsule;
mod model;
mod resolve;

pub use capsule::get_capsule_cell_collision_info;
pub use capsule::point_in_capsule;
pub use model::Capsule;
pub use model::CollisionDebug;
pub use model::CollisionInfo;
pub use model::ContactAxis;
pub use resolve::resolve_collisions;
pub use resolve::sort_by_overlap;
