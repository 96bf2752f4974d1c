pub mod graph;

pub use graph::ReqwestTransport;
