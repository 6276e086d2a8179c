use retrotoy::EtchConfig;

fn main() {
    env_logger::init();

    let mut config = EtchConfig::default();
    let mut args = std::env::args().skip(1);
    if let Some(size) = args.next() {
        match parse_size(&size) {
            Some((width, height)) => {
                config.width = width;
                config.height = height;
            }
            None => {
                eprintln!(
                    "Invalid canvas size '{}'. Expected WIDTHxHEIGHT, for example: retrotoy 600x400",
                    size
                );
                std::process::exit(1);
            }
        }
    }
    if let Some(path) = args.next() {
        config.save_path = path.into();
    }

    log::info!(
        "starting with a {}x{} canvas, saving to '{}'",
        config.width,
        config.height,
        config.save_path.display()
    );

    if let Err(err) = retrotoy::run(config) {
        eprintln!("retrotoy failed: {err:#}");
        std::process::exit(1);
    }
}

fn parse_size(arg: &str) -> Option<(usize, usize)> {
    let (width, height) = arg.split_once('x')?;
    Some((width.parse().ok()?, height.parse().ok()?))
}
