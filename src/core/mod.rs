pub mod engine;
pub mod filename;
pub mod materializer;
pub mod metadata;
pub mod pipeline;

pub use crate::domain::model::{
    SavedTrack, TrackMetadata, TrackQuery, TrackResponse, DEFAULT_QUALITY, DEFAULT_RESULT_INDEX,
    QUALITY_RANGE, SUCCESS_CODE,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
