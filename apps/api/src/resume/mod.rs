// Resume ingestion: raw text or PDF in, typed ResumeRecord out.
// No LLM calls happen in this module.

pub mod contact;
pub mod handlers;
pub mod loader;
pub mod normalize;
pub mod segmenter;
