mod steps;

pub use bistro_world::BistroWorld;
