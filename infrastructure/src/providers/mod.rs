//! LLM provider adapters implementing the `LlmGateway` port

pub mod openai;
