pub mod dto;

pub use dto::{
    GenerateQuizRequest, GenerateQuizResponse, ProcessPdfResponse, SubmitQuizRequest,
    SubmitQuizResponse,
};
