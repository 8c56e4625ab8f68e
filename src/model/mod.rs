//! 数据核心：树遍历、CRS识别、投影绑定与重投影编排

pub mod crs;
pub mod performance;
pub mod projection;
pub mod reproject;
pub mod traverse;
