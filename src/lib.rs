pub mod config;
pub mod echo;
pub mod export;
pub mod logs;
pub mod passes;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod testing;
