use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("point sequence of length {len} is not a whole number of records of stride {stride}")]
    InvalidStride { len: usize, stride: usize },

    #[error("stacked series has no own datum for record {index}")]
    MissingSeriesDatum { index: usize },

    #[error("drawing backend failure: {0}")]
    Backend(String),
}
