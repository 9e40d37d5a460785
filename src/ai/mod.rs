mod generator;
mod prompt;

pub use generator::PostGenerator;
pub use prompt::build_prompt;
