//! CRS识别：URN提取、EPSG代码解析与WGS84边界启发式判定

use serde_json::Value;
use thiserror::Error;

use crate::model::traverse::traverse;

/// Web地图原生使用的WGS84/CRS84规范URN
pub const WGS84_CRS_URN: &str = "urn:ogc:def:crs:OGC:1.3:CRS84";

/// URN识别子串：凡包含它的字符串都视为CRS声明
const CRS_URN_MARKER: &str = "urn:ogc:def:crs";

/// URN固定前缀，解析时剥除一次
const CRS_URN_PREFIX: &str = "urn:ogc:def:crs:";

/// CRS解析契约错误：仅在确需变换而URN无法映射到受支持的
/// EPSG标识时出现；无需变换时即使CRS缺失或含糊也不报错
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CrsError {
    #[error("CRS URN invalid or missing. Only EPSG namespaces are supported")]
    UnsupportedCrs,
}

/// 从crs成员子树中提取第一个URN字符串；无crs成员或无匹配返回空串。
/// 不强制 {type: "name", properties: {name: ...}} 形状，整个子树内
/// 任何包含URN子串的字符串都算
pub fn get_crs_urn(geojson: &Value) -> String {
    let mut urn = String::new();
    if let Some(crs) = geojson.get("crs") {
        traverse(crs, &mut |node| {
            // 先到者优先，后续匹配不覆盖
            if urn.is_empty() {
                if let Value::String(s) = node {
                    if s.contains(CRS_URN_MARKER) {
                        urn = s.clone();
                    }
                }
            }
        });
    }
    urn
}

/// 将URN解析为 "EPSG:<code>" 标识；版本段解析后丢弃
pub fn detect_crs(urn: &str) -> Result<String, CrsError> {
    let rest = urn.replacen(CRS_URN_PREFIX, "", 1);
    let mut parts = rest.split(':');
    let namespace = parts.next().unwrap_or_default();
    let _version = parts.next();
    let code = parts.next().unwrap_or_default();
    if namespace != "EPSG" || code.is_empty() {
        return Err(CrsError::UnsupportedCrs);
    }
    Ok(format!("EPSG:{}", code))
}

/// 判断值是否形如坐标Position：长度≥2且元素全为有限数字的数组。
/// 树中任何位置的此类数组（包括properties内）都按Position对待
pub fn is_position(value: &Value) -> bool {
    match value {
        Value::Array(items) if items.len() >= 2 => items
            .iter()
            .all(|item| item.as_f64().map(f64::is_finite).unwrap_or(false)),
        _ => false,
    }
}

/// 取Position的前两个分量（经度、纬度）；非Position返回None
fn position_lng_lat(value: &Value) -> Option<(f64, f64)> {
    if !is_position(value) {
        return None;
    }
    let items = value.as_array()?;
    Some((items[0].as_f64()?, items[1].as_f64()?))
}

/// 判定是否需要坐标变换：
/// - 声明为CRS84：不需要
/// - 未声明CRS：默认视为WGS84，除非任一Position越出经纬度边界
/// - 声明为其他CRS：需要
///
/// 落在经纬度边界内的外源CRS数据会被误放行，这是已知局限
pub fn requires_transform(urn: &str, geojson: &Value) -> bool {
    if urn == WGS84_CRS_URN {
        return false;
    }
    if urn.is_empty() {
        let mut bounds_valid = true;
        traverse(geojson, &mut |node| {
            if let Some((lng, lat)) = position_lng_lat(node) {
                if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
                    bounds_valid = false;
                }
            }
        });
        return !bounds_valid;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_crs_urn_standard_shape() {
        let v = json!({
            "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::32612"}}
        });
        assert_eq!(get_crs_urn(&v), "urn:ogc:def:crs:EPSG::32612");
    }

    #[test]
    fn test_get_crs_urn_missing() {
        assert_eq!(get_crs_urn(&json!({})), "");
        assert_eq!(get_crs_urn(&json!({"type": "FeatureCollection"})), "");
        assert_eq!(get_crs_urn(&json!({"crs": null})), "");
    }

    #[test]
    fn test_get_crs_urn_first_match_wins() {
        let v = json!({
            "crs": {"a": "urn:ogc:def:crs:EPSG::1111", "b": "urn:ogc:def:crs:EPSG::2222"}
        });
        assert_eq!(get_crs_urn(&v), "urn:ogc:def:crs:EPSG::1111", "后续匹配不应覆盖先到者");
    }

    #[test]
    fn test_get_crs_urn_searches_nested_subtree() {
        let v = json!({
            "crs": {"note": "no urn here", "nested": [{"name": "urn:ogc:def:crs:OGC:1.3:CRS84"}]}
        });
        assert_eq!(get_crs_urn(&v), WGS84_CRS_URN);
    }

    #[test]
    fn test_detect_crs_epsg() {
        assert_eq!(detect_crs("urn:ogc:def:crs:EPSG::32612").unwrap(), "EPSG:32612");
        assert_eq!(detect_crs("urn:ogc:def:crs:EPSG:8.8.1:4326").unwrap(), "EPSG:4326");
    }

    #[test]
    fn test_detect_crs_rejects_non_epsg() {
        let err = detect_crs("urn:ogc:def:crs:OGC:2:CRS84").unwrap_err();
        assert_eq!(
            err.to_string(),
            "CRS URN invalid or missing. Only EPSG namespaces are supported"
        );
        assert!(detect_crs("").is_err(), "空URN无法解析");
        assert!(detect_crs("urn:ogc:def:crs:EPSG").is_err(), "缺少代码段应视为无法解析");
    }

    #[test]
    fn test_is_position() {
        assert!(is_position(&json!([607059.5, 5004456.0])));
        assert!(is_position(&json!([1, 2, 3])), "整数分量同样有效");
        assert!(!is_position(&json!([])));
        assert!(!is_position(&json!([1.0])), "长度不足2不是Position");
        assert!(!is_position(&json!(["a", 2.0])));
        assert!(!is_position(&json!([true, false])));
        assert!(!is_position(&json!({"x": 1, "y": 2})));
    }

    #[test]
    fn test_requires_transform_table() {
        let in_bounds = json!({
            "geometry": {"coordinates": [[-85.4, 38.8], [120.1, 30.2]]}
        });
        let out_of_bounds = json!({
            "geometry": {"coordinates": [[607059.5, 5004456.0]]}
        });

        assert!(!requires_transform(WGS84_CRS_URN, &out_of_bounds), "声明CRS84一律放行");
        assert!(!requires_transform("", &in_bounds), "未声明且边界内视为WGS84");
        assert!(requires_transform("", &out_of_bounds), "未声明且越界需要变换");
        assert!(
            requires_transform("urn:ogc:def:crs:EPSG::32612", &in_bounds),
            "声明外源CRS一律变换"
        );
    }

    #[test]
    fn test_requires_transform_boundary_inclusive() {
        let v = json!({"coordinates": [[-180.0, -90.0], [180.0, 90.0]]});
        assert!(!requires_transform("", &v), "边界值本身视为有效");
    }

    #[test]
    fn test_requires_transform_scans_arrays_everywhere() {
        // 启发式对树中任何数字数组生效，properties也不例外
        let v = json!({"properties": {"values": [99999.0, 5.0]}});
        assert!(requires_transform("", &v));
    }
}
