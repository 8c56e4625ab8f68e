//! 重投影核心：识别CRS，判定是否需要变换，在私有副本上改写坐标
//!
//! 判定无需变换时原样返回输入引用；需要变换时深拷贝后原位改写，
//! 原始输入在整个调用期间保持不变

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::crs::{self, CrsError, WGS84_CRS_URN};
use crate::model::projection::{self, ProjectionError, WgsTransformer};
use crate::model::traverse::traverse_mut;

/// 重投影错误：CRS解析契约错误或外部测地库失败，本层不做恢复，
/// 由调用方负责面向用户的报告
#[derive(Error, Debug)]
pub enum ReprojectError {
    #[error(transparent)]
    Crs(#[from] CrsError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
}

/// CRS检查报告（命令行--check模式的输出）
#[derive(Debug, Clone, Serialize)]
pub struct CrsInfo {
    /// 提取到的URN，未找到为空串
    pub urn: String,
    /// 解析出的EPSG标识（URN存在且可解析时）
    pub epsg: Option<String>,
    /// 是否需要重投影
    pub requires_transform: bool,
}

/// 汇总CRS识别结果，不做任何变换
pub fn inspect_crs(geojson: &Value) -> CrsInfo {
    let urn = crs::get_crs_urn(geojson);
    let requires_transform = crs::requires_transform(&urn, geojson);
    let epsg = if urn.is_empty() {
        None
    } else {
        crs::detect_crs(&urn).ok()
    };
    CrsInfo {
        urn,
        epsg,
        requires_transform,
    }
}

/// 将GeoJSON重投影到WGS84（如有必要）。
///
/// 无需变换时返回`Cow::Borrowed`（与输入同一引用）；需要变换时
/// 返回深拷贝改写后的`Cow::Owned`，结构与输入同构：仅Position
/// 叶子与等于源URN的字符串叶子被改写。
pub fn reproject_geojson_if_needed(geojson: &Value) -> Result<Cow<'_, Value>, ReprojectError> {
    let urn = crs::get_crs_urn(geojson);
    if !crs::requires_transform(&urn, geojson) {
        debug!("无需重投影，原样返回");
        return Ok(Cow::Borrowed(geojson));
    }

    let epsg_id = crs::detect_crs(&urn)?;
    let code = projection::supported_epsg(&epsg_id).ok_or(CrsError::UnsupportedCrs)?;
    let transformer = WgsTransformer::from_epsg(code)?;
    info!("检测到源坐标系 {}，开始重投影", epsg_id);

    let mut copy = geojson.clone();
    let mut rewritten = 0usize;
    traverse_mut(&mut copy, &mut |slot: &mut Value| -> Result<(), ReprojectError> {
        if let Some(next) = transform_position(slot, &transformer)? {
            *slot = next;
            rewritten += 1;
        } else if slot.as_str() == Some(urn.as_str()) {
            *slot = Value::String(WGS84_CRS_URN.to_string());
        }
        Ok(())
    })?;
    info!("重投影完成，共改写 {} 组坐标", rewritten);
    Ok(Cow::Owned(copy))
}

/// 对Position槽位计算替换值：前两个分量正向投影，其余分量原样保留；
/// 非Position槽位返回None
fn transform_position(
    value: &Value,
    transformer: &WgsTransformer,
) -> Result<Option<Value>, ReprojectError> {
    if !crs::is_position(value) {
        return Ok(None);
    }
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(None),
    };
    let (Some(x), Some(y)) = (items[0].as_f64(), items[1].as_f64()) else {
        return Ok(None);
    };
    let (lng, lat) = transformer.forward(x, y)?;
    let (Some(lng_num), Some(lat_num)) = (
        serde_json::Number::from_f64(lng),
        serde_json::Number::from_f64(lat),
    ) else {
        return Err(ProjectionError::NonFinite { x, y }.into());
    };
    let mut next = Vec::with_capacity(items.len());
    next.push(Value::Number(lng_num));
    next.push(Value::Number(lat_num));
    next.extend(items.iter().skip(2).cloned());
    Ok(Some(Value::Array(next)))
}
