pub mod extract;
pub mod handlers;
pub mod pipeline;
pub mod repository;
pub mod storage;
