//! Question use cases.

mod create_question;
mod delete_question;
mod get_question;
mod list_questions;
mod update_question;

pub use create_question::CreateQuestionHandler;
pub use delete_question::DeleteQuestionHandler;
pub use get_question::GetQuestionHandler;
pub use list_questions::ListQuestionsHandler;
pub use update_question::UpdateQuestionHandler;
