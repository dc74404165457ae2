pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod roi;
pub mod signal;
pub mod pipeline;
