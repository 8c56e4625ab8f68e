//! IO helper: safe file read/write for JSON

use std::{fs::File, io::BufReader, path::Path};

use serde_json::Value;
use thiserror::Error;

/// 文件读写错误；JSON格式问题属于上游输入环节，不进入重投影核心
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 从文件读取JSON数据
pub fn read_json_file(p: &Path) -> Result<Value, FsError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: Value = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 将JSON数据保存到文件（格式化输出）
pub fn write_json_file(p: &Path, value: &Value) -> Result<(), FsError> {
    let f = File::create(p)?;
    serde_json::to_writer_pretty(f, value)?;
    Ok(())
}
