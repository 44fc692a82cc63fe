pub mod access_log;
pub mod dots;
pub mod fluorescent;
pub mod geometry;
pub mod symbology;
