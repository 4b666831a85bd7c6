//! Replay entry point (native).
//!
//! Usage: `dragkit-replay <config.json> <script.json>`

use dragkit_app::{ReplayResult, Script};
use dragkit_core::DraggableConfig;
use std::process::ExitCode;

fn replay(config_path: &str, script_path: &str) -> ReplayResult<String> {
    let config = DraggableConfig::load(config_path)?;
    let script = Script::load(script_path)?;
    let trace = dragkit_app::run(config, &script)?;
    Ok(serde_json::to_string_pretty(&trace)?)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let [_, config_path, script_path] = args.as_slice() else {
        eprintln!("Usage: dragkit-replay <config.json> <script.json>");
        return ExitCode::from(2);
    };

    log::info!("Replaying {} against {}", script_path, config_path);
    match replay(config_path, script_path) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
