mod app;
mod audio;
mod config;
mod library;
mod mpris;
mod runtime;
mod shuffle;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
