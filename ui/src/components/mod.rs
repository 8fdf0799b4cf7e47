pub mod result_presenter;

pub use result_presenter::{ResultPresenter, ResultPresenterProps};
