// demos/gl_basic.rs
//
// Opens a window and cycles its clear color through red, green and blue.

use clap::{App, Arg};
use glow::HasContext;
use std::thread;
use std::time::Duration;
use waffle::{Config, ConfigAttributes, Context, ContextApi, Display, InitAttributes, Platform};
use waffle::Window;

static COLORS: [[f32; 4]; 3] = [[1.0, 0.0, 0.0, 1.0], [0.0, 1.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]];

fn main() {
    let matches = App::new("gl_basic")
        .about("Clears a window to a few colors")
        .arg(Arg::with_name("platform").short("p")
                                       .long("platform")
                                       .takes_value(true)
                                       .required(true))
        .arg(Arg::with_name("api").short("a")
                                  .long("api")
                                  .takes_value(true)
                                  .default_value("gl")
                                  .possible_values(&["gl", "gles2", "gles3"]))
        .arg(Arg::with_name("fullscreen").short("f").long("fullscreen"))
        .get_matches();

    // Set up waffle.
    let platform: Platform = matches.value_of("platform").unwrap().parse().unwrap();
    let api: ContextApi = matches.value_of("api").unwrap().parse().unwrap();
    waffle::init(&InitAttributes::new(platform)).unwrap();

    let display = Display::connect(None).unwrap();
    let attributes = ConfigAttributes::new(api).rgba_sizes(8, 8, 8, 0).double_buffered(true);
    let config = Config::choose(&display, &attributes).unwrap();
    let context = Context::create(&config, None).unwrap();
    let mut window = if matches.is_present("fullscreen") {
        Window::create_with_attributes(&config, &waffle::WindowAttributes::fullscreen()).unwrap()
    } else {
        Window::create(&config, 320, 240).unwrap()
    };
    window.show().unwrap();
    waffle::make_current(&display, Some(&window), Some(&context)).unwrap();

    // Load GL through the platform, falling back to the client library.
    let gl = unsafe {
        glow::Context::from_loader_function(|name| {
            match waffle::get_proc_address(name) {
                Ok(address) if !address.is_null() => address,
                _ => waffle::dl_sym(api.dl_library(), name).unwrap_or(std::ptr::null()),
            }
        })
    };

    for color in COLORS.iter() {
        unsafe {
            gl.clear_color(color[0], color[1], color[2], color[3]);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        window.swap_buffers().unwrap();
        thread::sleep(Duration::from_millis(500));
    }

    waffle::make_current(&display, None, None).unwrap();
    drop(window);
    drop(context);
    waffle::teardown().unwrap();
}
