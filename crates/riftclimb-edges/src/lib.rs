pub mod settings;
pub mod extractor;
pub mod tracker;

pub use settings::EdgeDetectionSettings;
pub use extractor::{EdgeCache, EdgeMap, extract_edges, build_edge_pairs};
pub use tracker::{EdgeData, EdgeHandle, EdgeKey, EdgeTracker, TrackerStats};
