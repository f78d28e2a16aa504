mod adapters;
mod use_cases;

pub use adapters::Adapters;
pub use use_cases::UseCases;

use vortexl2_domain::Config;

pub struct App {
    pub config: Config,
    pub adapters: Adapters,
    pub use_cases: UseCases,
}

impl App {
    pub fn build(config: Config) -> Self {
        let adapters = Adapters::new(&config);
        let use_cases = UseCases::new(&config, &adapters);
        Self {
            config,
            adapters,
            use_cases,
        }
    }
}
