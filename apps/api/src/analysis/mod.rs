// Resume analysis core: skills are normalized against the taxonomy, the job
// description and resume are parsed into structured records, and those records
// are scored and turned into suggestions. Everything except `handlers` is pure
// and synchronous: no I/O, no clock, no env.

pub mod handlers;
pub mod jd_parser;
pub mod models;
pub mod pipeline;
pub mod resume_parser;
pub mod scoring;
pub mod suggestions;
pub mod taxonomy;
pub mod text;

pub use pipeline::run_analysis;
pub use taxonomy::SkillTaxonomy;
