// 領域層：道具資料模型與資料來源介面

pub mod model;
pub mod ports;
