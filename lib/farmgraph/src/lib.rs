#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]

mod advisor;
mod plots;
mod report;

pub use advisor::*;
pub use report::*;

pub mod model {
    pub use farmgraph_model::*;
}

pub mod engine {
    pub use farmgraph_engine::*;
}

pub mod storage {
    pub use farmgraph_storage::*;
}
