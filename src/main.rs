// SPDX-License-Identifier: MPL-2.0
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ultimate_gui::app::{self, paths, Flags};
use ultimate_gui::media;

const HELP: &str = "\
Ultimate GUI - gallery, camera, media players and file tools

USAGE:
  ultimate_gui [OPTIONS]

OPTIONS:
  -h, --help               Print this help and exit
      --lang <LOCALE>      Interface language (e.g. en-US, fr)
      --config-dir <DIR>   Directory holding settings.toml
      --img-dir <DIR>      Gallery folder (default: img/ next to the executable)

ENVIRONMENT:
  ULTIMATE_GUI_CONFIG_DIR, ULTIMATE_GUI_IMG_DIR
  RUST_LOG                 Log filter (default: ultimate_gui=info)
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        img_dir: args.opt_value_from_str("--img-dir")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }
    Ok(Some(flags))
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ultimate_gui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone(), flags.img_dir.clone());

    if let Err(err) = media::init_ffmpeg() {
        tracing::warn!(%err, "video and music playback unavailable");
    }

    app::run(flags)
}
