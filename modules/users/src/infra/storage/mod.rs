pub mod entity;
pub mod filter;
pub mod mapper;
pub mod migrations;
pub mod repo;
