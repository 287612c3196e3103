//! 核心抽象

pub mod service;

pub use service::Service;
