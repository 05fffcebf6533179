use std::process::ExitCode;

use map_engine::run_app;
use tracing::error;

use super::bootstrap::{build_app, init_tracing, Variant};

pub fn run(variant: Variant) -> ExitCode {
    init_tracing();

    let app = match build_app(variant) {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, variant = variant.as_str(), "startup_failed");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run_app(app.config, app.scene) {
        error!(error = %err, "startup_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
