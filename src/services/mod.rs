//! Services — orchestration over state, prompts and the LLM client.

pub mod assistant;
