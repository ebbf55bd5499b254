pub mod device;
pub mod estimate;
