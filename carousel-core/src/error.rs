use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    #[error("Carousel needs at least {required} items, got {count}")]
    InsufficientItems { count: usize, required: usize },

    #[error("Invalid size fraction '{0}': expected \"a/b\" with 0 < b <= 64")]
    InvalidSizeFraction(String),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
