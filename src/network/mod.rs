pub mod cache;
pub mod mlp;
pub mod network;

pub use cache::ForwardCache;
pub use mlp::MlpRegressor;
pub use network::Network;
