// 领域模块 - 用于组织应用的业务逻辑
//
// 包含2个领域:存储(启动时加载的数据快照)、仪表盘(输入解析、情景计算与页面渲染)

pub mod dashboard;
pub mod storage;

pub use dashboard::DashboardDomain;
pub use storage::StorageDomain;
