//! 投影变换绑定：基于proj4rs的EPSG源坐标系到WGS84正向变换
//!
//! 本模块只负责绑定策略：EPSG代码到proj定义串的推导、地理坐标系
//! 边界上的度/弧度换算，以及投影的一次性编译与逐点调用

use proj4rs::Proj;
use proj4rs::transform::transform;
use thiserror::Error;

/// WGS84经纬度（变换目标）的proj定义
const WGS84_PROJ_DEF: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// 外部测地库失败：投影编译或数值变换出错
#[derive(Error, Debug)]
pub enum ProjectionError {
    /// 投影编译失败
    #[error("投影初始化失败 ({code}): {detail}")]
    Init { code: String, detail: String },
    /// 单点变换失败
    #[error("坐标变换失败 ({x:.6}, {y:.6}): {detail}")]
    Transform { x: f64, y: f64, detail: String },
    /// 变换产生非有限结果
    #[error("坐标变换结果非有限 ({x:.6}, {y:.6})")]
    NonFinite { x: f64, y: f64 },
}

/// 解析 "EPSG:<code>" 标识并检查是否受支持，返回数字代码
pub fn supported_epsg(epsg_id: &str) -> Option<u32> {
    let code = epsg_id.strip_prefix("EPSG:")?.parse::<u32>().ok()?;
    proj_string_for(code).map(|_| code)
}

/// 从EPSG代码推导proj4定义串；UTM带号按代码参数化生成。
/// 不在此集合内的代码返回None
fn proj_string_for(code: u32) -> Option<String> {
    match code {
        // WGS84 经纬度
        4326 => Some(WGS84_PROJ_DEF.to_string()),
        // Web墨卡托（球面）
        3857 => Some(
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs"
                .to_string(),
        ),
        // ETRS89 / LAEA Europe
        3035 => Some(
            "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +units=m +no_defs"
                .to_string(),
        ),
        // WGS84 UTM 北半球 1-60带
        32601..=32660 => Some(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs",
            code - 32600
        )),
        // WGS84 UTM 南半球 1-60带
        32701..=32760 => Some(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs",
            code - 32700
        )),
        // ETRS89 UTM 28-38带
        25828..=25838 => Some(format!(
            "+proj=utm +zone={} +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
            code - 25800
        )),
        _ => None,
    }
}

/// 经纬度（单位为度）的地理坐标系代码
fn is_geographic(code: u32) -> bool {
    code == 4326
}

/// 源坐标系到WGS84的正向变换器；投影只编译一次，逐点复用
pub struct WgsTransformer {
    source: Proj,
    target: Proj,
    source_is_geographic: bool,
}

impl WgsTransformer {
    /// 依据受支持的EPSG代码构建变换器
    pub fn from_epsg(code: u32) -> Result<Self, ProjectionError> {
        let def = proj_string_for(code).ok_or_else(|| ProjectionError::Init {
            code: format!("EPSG:{}", code),
            detail: "无对应的proj定义".to_string(),
        })?;
        let source = Proj::from_proj_string(&def).map_err(|e| ProjectionError::Init {
            code: format!("EPSG:{}", code),
            detail: format!("{:?}", e),
        })?;
        let target = Proj::from_proj_string(WGS84_PROJ_DEF).map_err(|e| ProjectionError::Init {
            code: "WGS84".to_string(),
            detail: format!("{:?}", e),
        })?;
        Ok(Self {
            source,
            target,
            source_is_geographic: is_geographic(code),
        })
    }

    /// 单点正向变换：源坐标 -> WGS84经纬度（度）
    pub fn forward(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        // proj4rs对地理坐标系使用弧度，度/弧度换算在绑定层完成
        let (in_x, in_y) = if self.source_is_geographic {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };
        let mut point = (in_x, in_y, 0.0);
        transform(&self.source, &self.target, &mut point).map_err(|e| {
            ProjectionError::Transform {
                x,
                y,
                detail: format!("{:?}", e),
            }
        })?;
        let (lng, lat) = (point.0.to_degrees(), point.1.to_degrees());
        if !lng.is_finite() || !lat.is_finite() {
            return Err(ProjectionError::NonFinite { x, y });
        }
        Ok((lng, lat))
    }
}
