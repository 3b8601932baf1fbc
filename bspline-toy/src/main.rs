#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use bspline_toy::{config::ToyConfig, save::Session};

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: bspline-toy [--config <file.toml>] [session.json]";

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("bspline-toy v{}", env!("CARGO_PKG_VERSION"));

    let mut config_path = None;
    let mut session_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("{}", USAGE);
                    std::process::exit(2);
                }
            },
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ => session_path = Some(PathBuf::from(arg)),
        }
    }

    let config_path = config_path.unwrap_or_else(ToyConfig::default_path);
    let config = ToyConfig::load_from_file(&config_path);
    let session = session_path.and_then(|path| match Session::load(&path) {
        Ok(session) => Some(session),
        Err(e) => {
            log::error!("could not load {}: {}", path.display(), e);
            None
        }
    });

    bspline_toy::main(config, session);
}

// The web build starts from `wasm_main` in the library.
#[cfg(target_arch = "wasm32")]
fn main() {}
