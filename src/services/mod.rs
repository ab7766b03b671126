pub mod classes;
pub mod subjects;
pub mod system;

pub use classes::ClassService;
pub use subjects::SubjectService;
pub use system::SystemService;
