use ruya::{DemoConfig, RuyaApp};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = RuyaApp::new(DemoConfig::default()).run() {
        log::error!("{:#}", error);
        std::process::exit(1);
    }
}
