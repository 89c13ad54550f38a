pub mod scam_filter;
pub mod scoring;
