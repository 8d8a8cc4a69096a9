pub mod directory;
pub mod hiring;
pub(crate) mod http;
pub mod ids;
