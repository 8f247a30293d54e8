pub mod icons;
pub mod money;
pub mod records;
pub mod session;
pub mod theme;
