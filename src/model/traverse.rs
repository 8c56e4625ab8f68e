//! 通用JSON树遍历：深度优先、前序访问每个子节点槽位
//!
//! GeoJSON按构造是树形的（无环），因此不做环检测

use serde_json::Value;

/// 只读遍历：按键序/下标序访问node的每个子值，先访问后递归
pub fn traverse<F>(node: &Value, visit: &mut F)
where
    F: FnMut(&Value),
{
    match node {
        Value::Object(map) => {
            for (_key, child) in map {
                visit(child);
                traverse(child, visit);
            }
        }
        Value::Array(items) => {
            for child in items {
                visit(child);
                traverse(child, visit);
            }
        }
        _ => {}
    }
}

/// 可变遍历：visitor拿到子节点槽位的可变引用，可整体替换其值；
/// 随后对槽位中（可能刚被替换的）值继续递归。替换值若是纯数字
/// 数组，后续递归只会遇到标量，自然为空操作。
/// visitor返回错误时中止整个遍历。
pub fn traverse_mut<F, E>(node: &mut Value, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&mut Value) -> Result<(), E>,
{
    match node {
        Value::Object(map) => {
            for (_key, child) in map.iter_mut() {
                visit(child)?;
                traverse_mut(child, visit)?;
            }
        }
        Value::Array(items) => {
            for child in items.iter_mut() {
                visit(child)?;
                traverse_mut(child, visit)?;
            }
        }
        _ => {}
    }
    Ok(())
}
