pub mod loaded_result;
pub mod presenter_defaults;

pub use loaded_result::{LoadedResult, use_loaded_result};
pub use presenter_defaults::{
    PresenterDefaults, PresenterDefaultsProvider, PresenterDefaultsProviderProps,
    use_presenter_defaults,
};
