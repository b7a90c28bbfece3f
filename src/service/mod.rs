//! Business rules and store operations per entity.

mod courses;
mod enrollments;
mod students;
pub mod validation;

pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use students::StudentService;
