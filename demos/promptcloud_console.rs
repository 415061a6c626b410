//! Terminal front end for the promptcloud client
//!
//! Every stdin line is an event for the UI controller:
//! - plain text is typed into the instruction field and submitted with Enter
//! - `:example <text>` picks an example instruction (`:example custom` for free text)
//! - `:task <id>` and `:config <id>` switch the selectors
//! - `:cancel` aborts the request in flight, `:quit` exits
//!
//! Rendered scatter plots are written as plotly JSON to the `--plot-out` file.
//! The `synth` subcommand writes the placeholder shapes in the point format
//! served under `{media_base}/pcd/`.

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use parking_lot::Mutex;
use promptcloud_client::{
    ArtifactRefresher, ClientConfig, Key, Page, RefreshHandle, ReqwestTransport, RequestCoordinator, UiAction,
    UiController, UiEvent,
};
use promptcloud_core::{
    generate_with, precomputed_clouds, ColoredPointCloud3f, Notice, Notifier, Point3f, PointCloud, Severity, Shape,
    DEFAULT_POINT_COUNT,
};
use promptcloud_io::{write_points, ImageSource};
use promptcloud_visualization::{BackendError, PlotBackend, PlotLayout, ScatterTrace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Page rendered as lines on stdout
struct ConsolePage;

impl Page for ConsolePage {
    // stdin cannot be disabled; overlapping submissions are skipped by the coordinator
    fn set_input_enabled(&self, _enabled: bool) {}

    fn set_busy(&self, busy: bool) {
        if busy {
            println!("... processing");
        } else {
            println!("ready");
        }
    }

    fn set_instruction(&self, text: &str) {
        if !text.is_empty() {
            println!("> {}", text);
        }
    }

    fn set_instruction_choices(&self, choices: &[String]) {
        println!("examples:");
        for choice in choices {
            println!("  {}", choice);
        }
    }

    fn set_free_text(&self, enabled: bool) {
        if enabled {
            println!("type a custom instruction");
        }
    }

    fn show_code(&self, code: &str) {
        println!("--- generated code ---\n{}\n----------------------", code.trim_end());
    }

    fn show_image(&self, slot: usize, image: &ImageSource) {
        match image {
            ImageSource::Url(url) => println!("image {}: {}", slot, url),
            ImageSource::Inline { format, bytes } => {
                println!("image {}: inline {:?}, {} bytes", slot, format, bytes.len())
            }
        }
    }
}

/// Notices printed to stderr
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        let label = match notice.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        };
        eprintln!("[{}] {}", label, notice.message);
    }
}

/// Plot backend that writes each scatter plot as a plotly figure
struct JsonFileBackend {
    path: PathBuf,
}

impl PlotBackend for JsonFileBackend {
    fn is_ready(&self) -> bool {
        true
    }

    fn scatter3d(&self, viewport: &str, trace: &ScatterTrace, layout: &PlotLayout) -> Result<(), BackendError> {
        let figure = serde_json::json!({
            "viewport": viewport,
            "data": [trace],
            "layout": layout,
        });
        let file = File::create(&self.path).map_err(|e| BackendError(format!("{}: {}", self.path.display(), e)))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &figure).map_err(|e| BackendError(e.to_string()))?;
        println!("plotted {} points to {}", trace.len(), self.path.display());
        Ok(())
    }
}

fn cli() -> Command {
    Command::new("promptcloud")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn natural-language instructions into 3D point clouds")
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("TOML file with client settings"),
        )
        .arg(
            Arg::new("api-base")
                .long("api-base")
                .help("Base URL of the inference backend"),
        )
        .arg(
            Arg::new("media-base")
                .long("media-base")
                .help("Base URL of the precomputed media tree"),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .value_parser(value_parser!(u64))
                .help("Deadline for generation requests"),
        )
        .arg(
            Arg::new("legacy")
                .long("legacy")
                .action(ArgAction::SetTrue)
                .help("Start from the single-task settings with a 30 s deadline"),
        )
        .arg(
            Arg::new("plot-out")
                .long("plot-out")
                .default_value("plot.json")
                .value_parser(value_parser!(PathBuf))
                .help("File the rendered plot is written to"),
        )
        .arg(
            Arg::new("refresh")
                .long("refresh")
                .action(ArgAction::SetTrue)
                .help("Periodically refresh generated code and debug images"),
        )
        .subcommand(
            Command::new("synth")
                .about("Write the placeholder point clouds")
                .arg(
                    Arg::new("out-dir")
                        .long("out-dir")
                        .default_value("media/pcd")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory the clouds are written to"),
                )
                .arg(
                    Arg::new("points")
                        .long("points")
                        .default_value("1000")
                        .value_parser(value_parser!(usize))
                        .help("Points per shape"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducible clouds"),
                )
                .arg(
                    Arg::new("fallback")
                        .long("fallback")
                        .default_value("sphere")
                        .help("Shape written as precomputed.json"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<ClientConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None if matches.get_flag("legacy") => ClientConfig::legacy(),
        None => ClientConfig::default(),
    };

    if let Some(api_base) = matches.get_one::<String>("api-base") {
        config.api_base = api_base.clone();
    }
    if let Some(media_base) = matches.get_one::<String>("media-base") {
        config.media_base = media_base.clone();
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout-secs") {
        config.timeout_secs = *timeout;
    }
    Ok(config)
}

fn synth(args: &ArgMatches) -> anyhow::Result<()> {
    let out_dir = args
        .get_one::<PathBuf>("out-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("media/pcd"));
    let count = args.get_one::<usize>("points").copied().unwrap_or(DEFAULT_POINT_COUNT);
    let fallback: Shape = args
        .get_one::<String>("fallback")
        .map(String::as_str)
        .unwrap_or("sphere")
        .parse()?;

    let clouds: BTreeMap<u8, PointCloud<Point3f>> = match args.get_one::<u64>("seed") {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(*seed);
            Shape::ALL
                .into_iter()
                .map(|shape| (shape.slot(), generate_with(&mut rng, shape, count)))
                .collect()
        }
        None => precomputed_clouds(count),
    };

    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    for (slot, cloud) in clouds {
        let Some(shape) = Shape::from_slot(slot) else {
            continue;
        };
        let cloud = cloud.into_colored();
        write_cloud(&out_dir.join(format!("{}.json", shape)), &cloud)?;
        if shape == fallback {
            write_cloud(&out_dir.join("precomputed.json"), &cloud)?;
        }
        println!("{} ({} points)", shape, cloud.len());
    }
    Ok(())
}

fn write_cloud(path: &Path, cloud: &ColoredPointCloud3f) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_points(cloud, BufWriter::new(file))?;
    Ok(())
}

fn parse_event(line: &str) -> Option<UiEvent> {
    let line = line.trim();
    let event = match line.split_once(' ') {
        Some((":example", choice)) => UiEvent::ExampleSelected(choice.trim().to_string()),
        Some((":task", task)) => UiEvent::TaskSelected(task.trim().to_string()),
        Some((":config", config)) => UiEvent::ConfigSelected(config.trim().to_string()),
        _ if line.starts_with(':') => return None,
        _ => UiEvent::KeyPress {
            key: Key::Enter,
            text: line.to_string(),
        },
    };
    Some(event)
}

async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = load_config(matches)?;
    let refresh_interval = config.refresh_interval();
    let plot_out = matches
        .get_one::<PathBuf>("plot-out")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("plot.json"));
    tracing::info!(api_base = %config.api_base, media_base = %config.media_base, timeout = ?config.timeout(), "starting");

    let page: Arc<dyn Page> = Arc::new(ConsolePage);
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let coordinator = Arc::new(RequestCoordinator::new(
        config,
        Arc::new(ReqwestTransport::new()),
        Arc::new(JsonFileBackend { path: plot_out }),
        Arc::clone(&page),
        Arc::clone(&notifier),
    ));
    let controller = Arc::new(UiController::new(Arc::clone(&coordinator), page, notifier));
    let refresher: Arc<Mutex<Option<RefreshHandle>>> = Arc::new(Mutex::new(None));
    let refresh = matches.get_flag("refresh");

    let restart_refresh = {
        let coordinator = Arc::clone(&coordinator);
        let refresher = Arc::clone(&refresher);
        move |action: &UiAction| {
            if let (true, UiAction::SelectionChanged { selection, .. }) = (refresh, action) {
                let handle = ArtifactRefresher::spawn(Arc::clone(&coordinator), selection.clone(), refresh_interval);
                // replacing the old handle stops its loop
                *refresher.lock() = Some(handle);
            }
        }
    };

    let action = controller.initialize().await;
    restart_refresh(&action);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            ":quit" => break,
            ":cancel" => {
                if !coordinator.cancel() {
                    println!("nothing to cancel");
                }
                continue;
            }
            _ => {}
        }
        let Some(event) = parse_event(&line) else {
            eprintln!("unknown command: {}", line.trim());
            continue;
        };

        // events run concurrently so `:cancel` and repeated submissions reach the coordinator
        let controller = Arc::clone(&controller);
        let restart_refresh = restart_refresh.clone();
        tokio::spawn(async move {
            let action = controller.handle(event).await;
            tracing::debug!(?action, "event handled");
            restart_refresh(&action);
        });
    }

    if let Some(handle) = refresher.lock().take() {
        handle.stop();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let matches = cli().get_matches();
    match matches.subcommand() {
        Some(("synth", args)) => synth(args),
        _ => run(&matches).await,
    }
}
