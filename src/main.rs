//! 命令行入口：初始化日志，读取GeoJSON文件，必要时重投影为WGS84后输出

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::fmt::SubscriberBuilder;

use zuobiao_zhuanhuan::{
    inspect_crs, read_json_file, reproject_geojson_if_needed, write_json_file,
};

/// 命令行用法说明
const USAGE: &str = "用法: zuobiao_zhuanhuan [--check] <输入.geojson> [输出.geojson]";

struct CliArgs {
    /// 仅输出CRS检查报告，不做变换
    check_only: bool,
    input: PathBuf,
    /// 缺省时将结果打印到标准输出
    output: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut check_only = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--check" | "-c" => check_only = true,
            "--help" | "-h" => bail!("{}", USAGE),
            _ => paths.push(PathBuf::from(arg)),
        }
    }
    if paths.is_empty() || paths.len() > 2 {
        bail!("{}", USAGE);
    }
    let input = paths.remove(0);
    let output = paths.pop();
    Ok(CliArgs {
        check_only,
        input,
        output,
    })
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = parse_args()?;
    let geojson = read_json_file(&args.input)
        .with_context(|| format!("无法读取输入文件: {}", args.input.display()))?;

    if args.check_only {
        let info = inspect_crs(&geojson);
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let result = reproject_geojson_if_needed(&geojson).context("重投影失败")?;
    match &args.output {
        Some(path) => {
            write_json_file(path, result.as_ref())
                .with_context(|| format!("无法写入输出文件: {}", path.display()))?;
            tracing::info!("已写出: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(result.as_ref())?),
    }
    Ok(())
}
