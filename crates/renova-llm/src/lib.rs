pub mod client;
pub mod mock;
pub mod prompt;
pub mod response;

pub use client::{AnthropicGenerator, GenerationError, Generator, DEFAULT_MODEL};
pub use mock::{MockGenerator, MockResponse};
pub use response::{extract_change_set, ResponseError};
