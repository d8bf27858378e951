use circle_menu::GestureController;
use circle_menu_demo::cli::Args;
use circle_menu_demo::config;
use circle_menu_demo::gui::app::AppModel;
use circle_menu_demo::sys::runtime;
use clap::Parser;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write default config: {}", e);
    }
    let mut config = config::load_or_default();
    args.apply(&mut config);

    let controller = GestureController::from_settings(&config.menu)?;
    log::info!(
        "Circle split into {} sectors of {} degrees",
        config.menu.divisions,
        controller.state().division_angle()
    );

    let (tx, rx) = async_channel::bounded(8);

    // Start Background Services
    runtime::start_background_services(tx);

    // GTK must not see our own command line flags
    let app = RelmApp::new("org.circlemenu.demo").with_args(Vec::new());

    app.run::<AppModel>((controller, config, args, rx));
    Ok(())
}
