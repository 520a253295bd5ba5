pub mod account;
pub mod answer;
pub mod comment;
pub mod profile;
pub mod question;
pub mod request;

pub use account::Account;
pub use answer::Answer;
pub use comment::Comment;
pub use profile::{AnswerSummary, Profile, QuestionSummary};
pub use question::Question;
pub use request::ContentPayload;
