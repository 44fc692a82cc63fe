pub mod geodesy;
pub mod graticule;
pub mod projection;
pub mod vec;

pub use geodesy::*;
pub use graticule::*;
pub use projection::*;
pub use vec::*;
