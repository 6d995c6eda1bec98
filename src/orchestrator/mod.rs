pub mod fanout;
pub mod pipeline;

pub use fanout::run_all;
pub use pipeline::{PipelineOutput, QuizPipeline};
