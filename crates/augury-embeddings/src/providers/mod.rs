mod api_provider;
mod stand_in;

pub use api_provider::ApiProvider;
pub use stand_in::StandInProvider;
