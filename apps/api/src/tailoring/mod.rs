// Job analysis, skill matching and resume rewriting.
// All LLM calls go through the LanguageModel trait; no client is built here.

pub mod handlers;
pub mod job_parser;
pub mod prompts;
pub mod rewriter;
pub mod skill_matcher;
