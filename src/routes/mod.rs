pub mod classes;

pub mod subjects;

pub mod system;

pub use classes::configure_classes_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
