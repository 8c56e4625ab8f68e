//! GeoJSON坐标转换工具库
//!
//! 识别GeoJSON中声明的坐标参考系统（CRS），必要时在私有副本上把
//! 全部坐标重投影为Web地图原生的WGS84/CRS84；无需变换时原样返回
//!
//! 文本编辑、JSON查看、地图渲染等界面均为外部协作方，本库只约定
//! “输入/输出GeoJSON形状的JSON树”这一契约

pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::crs::{CrsError, WGS84_CRS_URN};
pub use model::projection::{ProjectionError, WgsTransformer};
pub use model::reproject::{inspect_crs, reproject_geojson_if_needed, CrsInfo, ReprojectError};
pub use utils::fs::{read_json_file, write_json_file, FsError};
