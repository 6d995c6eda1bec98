pub mod ollama;
pub mod pdf_extractor;
pub mod pdf_renderer;

pub use ollama::{check_ollama_installed, ModelInvoker, OllamaInvoker};
pub use pdf_renderer::SummaryRenderer;
