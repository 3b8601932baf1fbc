//! An interactive B-spline editor.
//!
//! Right click adds a control point, left click removes the one under the
//! cursor. The arrow keys change the order (up/down) and the sampling step
//! (left/right), `c` clears all points, and `m` shows a marker on the curve
//! that `,` and `.` move along it.

pub mod config;
mod editor;
pub mod save;
mod state;

use druid::{
    commands, platform_menus, AppLauncher, FileDialogOptions, FileSpec, LocalizedString, MenuDesc,
    MenuItem, SysMods, WindowDesc,
};

use config::ToyConfig;
use editor::Editor;
use save::Session;
pub use state::ToyState;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

const WINDOW_SIZE: f64 = 749.0;

#[cfg(target_arch = "wasm32")]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn wasm_main() {
    // This hook is necessary to get panic messages in the console
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let session = match Session::init_from_current_url() {
        Ok(session) => Some(session),
        Err(e) => {
            web_sys::console::log_1(&format!("could not restore session: {}", e).into());
            None
        }
    };
    main(ToyConfig::default(), session)
}

pub fn main(config: ToyConfig, session: Option<Session>) {
    let background = config.background;
    let main_window = WindowDesc::new(move || Editor::new(background))
        .title("B-Spline")
        .menu(make_menu())
        .with_min_size((200., 200.))
        .window_size((WINDOW_SIZE, WINDOW_SIZE));

    let initial_state = match session {
        Some(session) => session.into_state(),
        None => ToyState::new(Default::default(), config.params()),
    };

    AppLauncher::with_window(main_window)
        .launch(initial_state)
        .expect("Failed to launch application");
}

fn file_menu() -> MenuDesc<ToyState> {
    pub const JSON_TYPE: FileSpec = FileSpec::new("JSON Data", &["json"]);

    MenuDesc::new(LocalizedString::new("common-menu-file-menu"))
        .append(platform_menus::mac::file::close())
        .append(
            MenuItem::new(
                LocalizedString::new("save-as-json").with_placeholder("Save JSON..."),
                commands::SHOW_SAVE_PANEL
                    .with(FileDialogOptions::new().allowed_types(vec![JSON_TYPE])),
            )
            .hotkey(SysMods::Cmd, "s"),
        )
}

#[allow(unused_mut)]
fn make_menu() -> MenuDesc<ToyState> {
    let mut menu = MenuDesc::empty();
    #[cfg(target_os = "macos")]
    {
        menu = menu.append(platform_menus::mac::application::default());
    }

    menu.append(file_menu())
}
