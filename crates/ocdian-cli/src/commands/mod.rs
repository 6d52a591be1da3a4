pub mod config;
pub mod coping;
pub mod erp;
pub mod journal;
pub mod mood;
pub mod relax;

mod exercise;
