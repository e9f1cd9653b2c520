pub mod analyzer;
pub mod builder;
pub mod config;
pub mod coverage;
pub mod edge;
pub mod error;
pub mod network;
pub mod node;
pub mod ports;
pub mod resolver;
pub mod shrink;
pub mod topology;
