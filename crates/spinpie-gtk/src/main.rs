use clap::{Parser, Subcommand};
use relm4::prelude::*;
use spinpie_gtk::config;
use spinpie_gtk::gui::app::AppModel;
use spinpie_gtk::gui::chart::{self, ChartState};
use spinpie_gtk::gui::theme::ThemeColors;
use spinpie_gtk::sys::runtime;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "spinpie", version, about = "A pie chart you can spin", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file to load and watch
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the default configuration file and print its path
    Init,
    /// Render the chart to a PNG without opening a window
    Snapshot {
        output: PathBuf,
        #[arg(long, default_value_t = 400)]
        width: i32,
        #[arg(long, default_value_t = 458)]
        height: i32,
        /// Rotation in degrees, clockwise
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        rotation: i32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    match cli.command {
        Some(Commands::Init) => {
            let path = config::write_default_config(&config_path)?;
            println!("{}", path.display());
        }
        Some(Commands::Snapshot {
            output,
            width,
            height,
            rotation,
        }) => snapshot(&config_path, &output, width, height, rotation)?,
        None => run(config_path),
    }
    Ok(())
}

fn run(config_path: PathBuf) {
    let config = config::load_or_demo(&config_path);
    let state = ChartState::new(&config);

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(config_path.clone(), tx);

    // arguments were already consumed by clap
    let app = RelmApp::new("org.spinpie.Spinpie").with_args(Vec::new());

    app.run::<AppModel>((state, config_path, rx));
}

fn snapshot(
    config_path: &Path,
    output: &Path,
    width: i32,
    height: i32,
    rotation: i32,
) -> anyhow::Result<()> {
    let config = config::load_or_demo(config_path);
    let mut state = ChartState::new(&config);
    let _ = state.resize(f64::from(width), f64::from(height));
    let _ = state.chart.set_rotation(rotation);

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    {
        let cr = cairo::Context::new(&surface)?;
        chart::draw(&cr, &state.chart, &ThemeColors::default())?;
    }

    let mut file = fs_err::File::create(output)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote {}x{} snapshot to {}", width, height, output.display());
    Ok(())
}
