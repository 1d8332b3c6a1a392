pub mod openrouter_api_agent;

pub use openrouter_api_agent::{
    INTERVIEW_MAX_TOKENS, INTERVIEW_MODEL, OpenRouterAgent, STRUCTURING_MAX_TOKENS,
    STRUCTURING_MODEL,
};
