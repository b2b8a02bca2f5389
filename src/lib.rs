pub mod analysis;
pub mod cli;
pub mod ctx;
pub mod io;
pub mod math;
pub mod metadata;
pub mod pipeline;
pub mod plot;
pub mod schema;
