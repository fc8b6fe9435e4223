pub mod prelude;

pub mod enrollments;
pub mod feedback;
pub mod notes;
pub mod question_papers;
pub mod users;
pub mod videos;
