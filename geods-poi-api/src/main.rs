use clap::Parser;
use geods_poi_api::{app::PoiApp, error::PoiApiError};

fn main() -> Result<(), PoiApiError> {
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if dotenv.is_err() {
        log::info!("no .env file found");
    }
    let args = PoiApp::parse();
    args.op.run()
}
