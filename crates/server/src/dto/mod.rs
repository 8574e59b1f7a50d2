mod museum;
mod route;

pub use museum::*;
pub use route::*;
