// demos/glinfo.rs
//
// Prints the vendor, renderer, version and extensions of a context on the chosen platform.

use clap::{App, Arg};
use waffle::{Config, ConfigAttributes, Context, ContextApi, ContextProfile, Display};
use waffle::{GLInfo, InitAttributes, Platform, Window};

fn main() {
    let platforms: Vec<String> = Platform::built().iter()
                                                  .map(|p| p.short_name().to_owned())
                                                  .collect();
    let platform_names: Vec<&str> = platforms.iter().map(|name| name.as_str()).collect();

    let matches = App::new("glinfo")
        .about("Prints information about a GL context")
        .arg(Arg::with_name("platform").short("p")
                                       .long("platform")
                                       .takes_value(true)
                                       .required(true)
                                       .possible_values(&platform_names))
        .arg(Arg::with_name("api").short("a")
                                  .long("api")
                                  .takes_value(true)
                                  .default_value("gl")
                                  .possible_values(&["gl", "gles1", "gles2", "gles3"]))
        .arg(Arg::with_name("version").short("V")
                                      .long("version")
                                      .takes_value(true)
                                      .help("Context version, as MAJOR.MINOR"))
        .arg(Arg::with_name("profile").long("profile")
                                      .takes_value(true)
                                      .possible_values(&["core", "compat"]))
        .arg(Arg::with_name("verbose").short("v")
                                      .long("verbose")
                                      .help("Also print the extension list"))
        .get_matches();

    let platform: Platform = matches.value_of("platform").unwrap().parse().unwrap();
    let api: ContextApi = matches.value_of("api").unwrap().parse().unwrap();

    let mut attributes = ConfigAttributes::new(api);
    if let Some(version) = matches.value_of("version") {
        let mut parts = version.splitn(2, '.').map(|part| part.parse::<u8>());
        match (parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor))) => attributes = attributes.version(major, minor),
            _ => {
                eprintln!("glinfo: bad version {:?}, expected MAJOR.MINOR", version);
                std::process::exit(1);
            }
        }
    }
    if let Some(profile) = matches.value_of("profile") {
        attributes = attributes.profile(profile.parse::<ContextProfile>().unwrap());
    }

    if let Err(err) = run(platform, &attributes, matches.is_present("verbose")) {
        eprintln!("glinfo: {}", err);
        std::process::exit(1);
    }
}

fn run(platform: Platform, attributes: &ConfigAttributes, verbose: bool)
       -> Result<(), waffle::Error> {
    waffle::init(&InitAttributes::new(platform))?;
    let display = Display::connect(None)?;
    let config = Config::choose(&display, attributes)?;
    let context = Context::create(&config, None)?;
    let window = Window::create(&config, 1, 1)?;
    waffle::make_current(&display, Some(&window), Some(&context))?;

    let info = GLInfo::query(attributes.context_api)?;
    println!("Waffle platform: {}", platform.short_name());
    println!("Waffle api: {}", attributes.context_api.short_name());
    println!("OpenGL vendor string: {}", info.vendor);
    println!("OpenGL renderer string: {}", info.renderer);
    println!("OpenGL version string: {}", info.version);
    if !info.shading_language_version.is_empty() {
        println!("OpenGL shading language version string: {}", info.shading_language_version);
    }
    if verbose {
        println!("OpenGL extensions: {}", info.extensions.join(" "));
    }

    waffle::make_current(&display, None, None)?;
    window.destroy()?;
    context.destroy()?;
    config.destroy();
    display.disconnect();
    waffle::teardown()
}
