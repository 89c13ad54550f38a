pub mod auto_learn;
pub mod ranking;
