pub mod chunker;
pub mod distributor;
pub mod prompts;
pub mod scorer;

pub use chunker::chunk_text;
pub use distributor::distribute_questions;
pub use scorer::{parse_answer_key, score, QuestionFeedback, ScoringResult};
