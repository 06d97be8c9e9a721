// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Catalog, MatchLimits, Recommendation, ShoeDetail, ShoeModel, ShoeSizeRecord, SizeFit, Sizing,
    UserMeasurement, FLAT_FOOT_LABEL, SUPINATION_LABEL,
};
pub use requests::{SaveMeasurementRequest, ShoeTypeQuery};
pub use responses::{
    ClearMeasurementsResponse, ErrorResponse, HealthResponse, RandomShoeResponse, ShoeTypeResponse,
};
