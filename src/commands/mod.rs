// Organized command modules by domain
pub mod permissions;
pub use permissions::*;

pub mod settings;
pub use settings::*;

pub mod logs;
pub use logs::*;
