pub mod config;
pub mod logging;

pub mod dispatch;
pub mod normalize;
pub mod pipeline;
pub mod precheck;
pub mod sink;
pub mod timing;
pub mod validate;
pub mod verdict;
