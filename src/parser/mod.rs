pub mod competitions;
pub mod covid;
pub mod normalize;
pub mod record;

pub use competitions::*;
pub use covid::*;
pub use normalize::*;
pub use record::*;
