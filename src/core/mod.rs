pub mod gdp;
pub mod nickname;
pub mod render;

pub use crate::domain::model::{
    CountryMetric, CountrySeries, GdpRecord, GdpView, Growth, NicknameList, NicknameRequest,
    YearRange, MAX_LIKES,
};
pub use crate::domain::ports::DataSource;
pub use crate::utils::error::Result;
