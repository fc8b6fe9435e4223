pub use super::enrollments::Entity as Enrollments;
pub use super::feedback::Entity as Feedback;
pub use super::notes::Entity as Notes;
pub use super::question_papers::Entity as QuestionPapers;
pub use super::users::Entity as Users;
pub use super::videos::Entity as Videos;
