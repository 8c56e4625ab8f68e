//! 性能探针模块
//!
//! 生成大型FeatureCollection并测量一次完整重投影的耗时

use std::time::Instant;

use serde_json::{json, Value};

use crate::model::reproject::reproject_geojson_if_needed;

/// 性能测量结果
#[derive(Debug)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

/// 生成带UTM坐标与CRS声明的大型测试FeatureCollection
pub fn generate_large_geojson(feature_count: usize) -> Value {
    let features: Vec<Value> = (0..feature_count)
        .map(|i| {
            let x = 600000.0 + (i % 100) as f64 * 10.0;
            let y = 5000000.0 + (i / 100) as f64 * 10.0;
            json!({
                "type": "Feature",
                "properties": {"id": i, "name": format!("要素_{}", i)},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [x, y],
                        [x + 5.0, y],
                        [x + 5.0, y + 5.0],
                        [x, y + 5.0],
                        [x, y]
                    ]]
                }
            })
        })
        .collect();
    json!({
        "type": "FeatureCollection",
        "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::32612"}},
        "features": features
    })
}

/// 测量一次完整重投影（深拷贝 + 全树改写）的耗时
pub fn measure_reproject(feature_count: usize) -> PerformanceResult {
    let geojson = generate_large_geojson(feature_count);
    let start = Instant::now();
    let outcome = reproject_geojson_if_needed(&geojson);
    let duration_ms = start.elapsed().as_millis();
    match outcome {
        Ok(_) => PerformanceResult {
            operation: format!("reproject_{}_features", feature_count),
            duration_ms,
            success: true,
            details: format!("{} 个要素重投影完成", feature_count),
        },
        Err(e) => PerformanceResult {
            operation: format!("reproject_{}_features", feature_count),
            duration_ms,
            success: false,
            details: e.to_string(),
        },
    }
}
