pub mod openai;
pub mod provider;
pub mod relay;
pub mod system_prompt;
