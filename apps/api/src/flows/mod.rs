//! AI flows — the orchestrated tasks that call the LLM on behalf of a
//! session and merge the results back into its document.

pub mod capabilities;
pub mod extract;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod types;
