pub mod analyzer;
pub mod auth;
pub mod config;
pub mod extractor;
pub mod geo;
pub mod hops;
pub mod risk;

pub use analyzer::{AnalysisEngine, AnalysisResult};
pub use auth::{AuthExtractor, AuthResults, AuthVerdict};
pub use config::{Config, GeoConfig};
pub use extractor::{FieldExtractor, MessageFields};
pub use geo::{DisabledResolver, GeoResolver, IpinfoResolver, GEO_UNAVAILABLE};
pub use hops::{Hop, HopExtractor};
pub use risk::RiskAnnotator;
