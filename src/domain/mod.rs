pub mod chunk_error;
pub mod chunk_plan;
pub mod dump_target;
