pub mod job;
mod lenient;
pub mod resume;
