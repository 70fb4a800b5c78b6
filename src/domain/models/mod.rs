pub mod config;
pub mod connector;
pub mod context;
pub mod lookup;
pub mod profile;

pub use config::{
    AttributeKeys, Config, ConnectorConfig, LogFormat, LoggingConfig, RotationPolicy,
    ServerConfig, SummaryConfig, SummaryMode,
};
pub use connector::{ConnectorInstance, ConnectorInstanceId};
pub use context::{ContextLink, ContextRecord, LookupIdRequest, NewContext};
pub use lookup::{LookupAttribute, LookupRequest};
pub use profile::{select_profile, CandidateProfile, FindProfilesResponse, ProfileStatus};
